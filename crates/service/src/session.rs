use serde::{Deserialize, Serialize};

/// Role claim carried by the caller's session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
    Parent,
}

impl Role {
    /// Parse a raw role claim; unknown values yield `None` and the caller
    /// is treated as role-less (no special authorization path applies).
    pub fn from_claim(raw: &str) -> Option<Role> {
        match raw {
            "admin" => Some(Role::Admin),
            "teacher" => Some(Role::Teacher),
            "student" => Some(Role::Student),
            "parent" => Some(Role::Parent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }
}

/// Caller identity and role, decoded from the session token at the HTTP
/// layer. Only the exam handlers consult it.
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: String,
    pub role: Option<Role>,
}

use serde::{Deserialize, Serialize};

/// Account as returned by the identity provider.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub username: String,
}

/// Payload for account creation. The provider generates and returns the id.
#[derive(Clone, Debug, Serialize)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// Public role marker stored on the account (e.g. "parent").
    pub public_role: Option<String>,
}

/// Partial account update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

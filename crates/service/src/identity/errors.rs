use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity api error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("identity network error: {0}")]
    Network(String),
    #[error("identity response decode error: {0}")]
    Decode(String),
    #[error("account conflict: {0}")]
    Conflict(String),
}

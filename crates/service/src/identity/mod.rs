//! Identity-provider integration.
//!
//! The provider is the store of record for user accounts; teacher, student
//! and parent rows are keyed by the account id it hands out.

pub mod domain;
pub mod errors;
pub mod http;
pub mod provider;

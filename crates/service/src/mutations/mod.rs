//! One module per entity group; each handler validates its business rules,
//! talks to the identity provider where accounts are involved, and persists
//! through the injected store connection.

pub mod attendance;
pub mod class;
pub mod exam;
pub mod parent;
pub mod result;
pub mod student;
pub mod subject;
pub mod teacher;

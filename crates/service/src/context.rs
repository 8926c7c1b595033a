use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::identity::provider::IdentityProvider;

/// Feature switches for handlers whose observed behavior is configurable.
#[derive(Clone, Copy, Debug, Default)]
pub struct MutationPolicy {
    /// When true, teacher callers may only delete exams of lessons they own.
    /// Off by default: exam deletion is open to any caller.
    pub restrict_exam_delete: bool,
}

/// Request-independent collaborators for the mutation handlers.
/// Both external clients are injected here so tests can substitute doubles.
#[derive(Clone)]
pub struct MutationContext {
    pub db: DatabaseConnection,
    pub identity: Arc<dyn IdentityProvider>,
    pub policy: MutationPolicy,
}

impl MutationContext {
    pub fn new(db: DatabaseConnection, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { db, identity, policy: MutationPolicy::default() }
    }

    pub fn with_policy(mut self, policy: MutationPolicy) -> Self {
        self.policy = policy;
        self
    }
}

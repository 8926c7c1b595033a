use async_trait::async_trait;

use super::domain::{Account, AccountUpdate, NewAccount};
use super::errors::IdentityError;

/// Abstraction over the external identity provider's user API.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account; the provider generates and returns the opaque id.
    async fn create_user(&self, account: NewAccount) -> Result<Account, IdentityError>;
    /// Partially update an account by id.
    async fn update_user(&self, id: &str, update: AccountUpdate) -> Result<Account, IdentityError>;
    /// Delete an account by id.
    async fn delete_user(&self, id: &str) -> Result<(), IdentityError>;
}

/// Simple in-memory mock provider for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    /// Every call the mock has served, in order.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Call {
        Create(String),
        Update(String),
        Delete(String),
    }

    #[derive(Default)]
    pub struct MockIdentityProvider {
        accounts: Mutex<HashMap<String, Account>>, // key: account id
        calls: Mutex<Vec<Call>>,
        seq: AtomicU64,
    }

    impl MockIdentityProvider {
        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        pub fn account_count(&self) -> usize {
            self.accounts.lock().unwrap().len()
        }

        pub fn has_account(&self, id: &str) -> bool {
            self.accounts.lock().unwrap().contains_key(id)
        }
    }

    #[async_trait]
    impl IdentityProvider for MockIdentityProvider {
        /// # Examples
        /// ```
        /// use service::identity::provider::{mock::MockIdentityProvider, IdentityProvider};
        /// use service::identity::domain::NewAccount;
        /// let mock = MockIdentityProvider::default();
        /// let account = tokio_test::block_on(mock.create_user(NewAccount {
        ///     username: "jdoe".into(), password: "pw".into(),
        ///     first_name: "Jane".into(), last_name: "Doe".into(), public_role: None,
        /// })).unwrap();
        /// assert!(!account.id.is_empty());
        /// ```
        async fn create_user(&self, account: NewAccount) -> Result<Account, IdentityError> {
            self.calls.lock().unwrap().push(Call::Create(account.username.clone()));
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.values().any(|a| a.username == account.username) {
                return Err(IdentityError::Conflict(account.username));
            }
            let id = format!("user_{}", self.seq.fetch_add(1, Ordering::SeqCst) + 1);
            let created = Account { id: id.clone(), username: account.username };
            accounts.insert(id, created.clone());
            Ok(created)
        }

        async fn update_user(&self, id: &str, update: AccountUpdate) -> Result<Account, IdentityError> {
            self.calls.lock().unwrap().push(Call::Update(id.to_string()));
            let mut accounts = self.accounts.lock().unwrap();
            let account = accounts.get_mut(id).ok_or_else(|| IdentityError::Api {
                status: 404,
                message: format!("account '{}' not found", id),
            })?;
            if let Some(username) = update.username {
                account.username = username;
            }
            Ok(account.clone())
        }

        async fn delete_user(&self, id: &str) -> Result<(), IdentityError> {
            self.calls.lock().unwrap().push(Call::Delete(id.to_string()));
            let mut accounts = self.accounts.lock().unwrap();
            accounts.remove(id).ok_or_else(|| IdentityError::Api {
                status: 404,
                message: format!("account '{}' not found", id),
            })?;
            Ok(())
        }
    }
}

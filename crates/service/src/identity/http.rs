use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::domain::{Account, AccountUpdate, NewAccount};
use super::errors::IdentityError;
use super::provider::IdentityProvider;

/// REST client for the identity provider's backend user API.
/// All requests carry the server-side secret key as a bearer token.
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    secret_key: String,
}

#[derive(Serialize)]
struct PublicMetadata<'a> {
    role: &'a str,
}

#[derive(Serialize)]
struct CreateUserBody<'a> {
    username: &'a str,
    password: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_metadata: Option<PublicMetadata<'a>>,
}

impl HttpIdentityProvider {
    pub fn new(base_url: impl Into<String>, secret_key: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url, secret_key: secret_key.into() })
    }

    fn user_url(&self, id: &str) -> String {
        format!("{}/v1/users/{}", self.base_url, id)
    }

    async fn into_account(resp: reqwest::Response) -> Result<Account, IdentityError> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(IdentityError::Api { status: status.as_u16(), message });
        }
        resp.json::<Account>().await.map_err(|e| IdentityError::Decode(e.to_string()))
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn create_user(&self, account: NewAccount) -> Result<Account, IdentityError> {
        let body = CreateUserBody {
            username: &account.username,
            password: &account.password,
            first_name: &account.first_name,
            last_name: &account.last_name,
            public_metadata: account.public_role.as_deref().map(|role| PublicMetadata { role }),
        };
        let resp = self
            .client
            .post(format!("{}/v1/users", self.base_url))
            .bearer_auth(&self.secret_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;
        let created = Self::into_account(resp).await?;
        debug!(account_id = %created.id, "identity account created");
        Ok(created)
    }

    async fn update_user(&self, id: &str, update: AccountUpdate) -> Result<Account, IdentityError> {
        let resp = self
            .client
            .patch(self.user_url(id))
            .bearer_auth(&self.secret_key)
            .json(&update)
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;
        Self::into_account(resp).await
    }

    async fn delete_user(&self, id: &str) -> Result<(), IdentityError> {
        let resp = self
            .client
            .delete(self.user_url(id))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(IdentityError::Api { status: status.as_u16(), message });
        }
        Ok(())
    }
}

use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

use models::parent;

use crate::context::MutationContext;
use crate::errors::ServiceError;
use crate::identity::domain::{AccountUpdate, NewAccount};

#[derive(Debug, Clone, Deserialize)]
pub struct ParentInput {
    pub id: Option<String>,
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Create the identity account (marked with the public "parent" role), then
/// the profile row. Absent profile fields are stored as empty strings.
#[instrument(skip(ctx, input), fields(username = %input.username))]
pub async fn create_parent(ctx: &MutationContext, input: ParentInput) -> Result<parent::Model, ServiceError> {
    let account = ctx
        .identity
        .create_user(NewAccount {
            username: input.username.clone(),
            password: input.password.clone(),
            first_name: input.name.clone().unwrap_or_default(),
            last_name: input.surname.clone().unwrap_or_default(),
            public_role: Some("parent".into()),
        })
        .await?;

    let row = parent::ActiveModel {
        id: Set(account.id.clone()),
        username: Set(input.username.clone()),
        name: Set(input.name.clone().unwrap_or_default()),
        surname: Set(input.surname.clone().unwrap_or_default()),
        email: Set(input.email.clone().unwrap_or_default()),
        phone: Set(input.phone.clone().unwrap_or_default()),
        address: Set(input.address.clone().unwrap_or_default()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&ctx.db)
    .await
    .map_err(|e| ServiceError::Db(e.to_string()));

    match row {
        Ok(created) => {
            info!(parent_id = %created.id, "parent_created");
            Ok(created)
        }
        Err(err) => {
            warn!(account_id = %account.id, error = %err, "store insert failed; removing identity account");
            if let Err(cleanup) = ctx.identity.delete_user(&account.id).await {
                error!(account_id = %account.id, error = %cleanup, "orphaned identity account left behind");
            }
            Err(err)
        }
    }
}

#[instrument(skip(ctx, input))]
pub async fn update_parent(ctx: &MutationContext, input: ParentInput) -> Result<parent::Model, ServiceError> {
    let id = match input.id.clone() {
        Some(id) if !id.is_empty() => id,
        _ => return Err(ServiceError::Validation("id required".into())),
    };

    let mut update = AccountUpdate {
        username: Some(input.username.clone()),
        first_name: input.name.clone(),
        last_name: input.surname.clone(),
        ..Default::default()
    };
    if !input.password.is_empty() {
        update.password = Some(input.password.clone());
    }
    ctx.identity.update_user(&id, update).await?;

    let mut am: parent::ActiveModel = parent::Entity::find_by_id(id.clone())
        .one(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("parent"))?
        .into();
    am.username = Set(input.username.clone());
    am.name = Set(input.name.clone().unwrap_or_default());
    am.surname = Set(input.surname.clone().unwrap_or_default());
    am.email = Set(input.email.clone().unwrap_or_default());
    am.phone = Set(input.phone.clone().unwrap_or_default());
    am.address = Set(input.address.clone().unwrap_or_default());
    let updated = am.update(&ctx.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(parent_id = %id, "parent_updated");
    Ok(updated)
}

/// Delete the profile row first, then the identity account.
#[instrument(skip(ctx))]
pub async fn delete_parent(ctx: &MutationContext, id: &str) -> Result<(), ServiceError> {
    let res = parent::Entity::delete_by_id(id.to_string())
        .exec(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("parent"));
    }
    if let Err(err) = ctx.identity.delete_user(id).await {
        error!(account_id = %id, error = %err, "profile row removed but identity delete failed");
        return Err(err.into());
    }
    info!(parent_id = %id, "parent_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, test_ctx};
    use uuid::Uuid;

    #[tokio::test]
    async fn absent_profile_fields_become_empty_strings() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, mock) = test_ctx(db.clone());

        let created = create_parent(&ctx, ParentInput {
            id: None,
            username: format!("p_{}", Uuid::new_v4()),
            password: "s3cret-pw".into(),
            name: Some("Sam".into()),
            surname: None,
            email: None,
            phone: None,
            address: None,
        }).await?;
        assert_eq!(created.surname, "");
        assert_eq!(created.email, "");
        assert_eq!(created.phone, "");
        assert!(mock.has_account(&created.id));

        delete_parent(&ctx, &created.id).await?;
        let after = parent::Entity::find_by_id(created.id).one(&db).await?;
        assert!(after.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_without_id_fails_before_any_external_call() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, mock) = test_ctx(db);

        let err = update_parent(&ctx, ParentInput {
            id: None,
            username: "p".into(),
            password: String::new(),
            name: None,
            surname: None,
            email: None,
            phone: None,
            address: None,
        }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(mock.calls().is_empty());
        Ok(())
    }
}

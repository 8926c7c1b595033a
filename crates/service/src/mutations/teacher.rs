use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

use models::{subject_teacher, teacher};

use crate::context::MutationContext;
use crate::errors::ServiceError;
use crate::identity::domain::{AccountUpdate, NewAccount};

#[derive(Debug, Clone, Deserialize)]
pub struct TeacherInput {
    pub id: Option<String>,
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub blood_type: String,
    #[serde(default)]
    pub sex: String,
    pub birthday: NaiveDate,
    /// Subject ids this teacher is assigned to; applied as a whole set.
    #[serde(default)]
    pub subjects: Vec<i32>,
}

/// Create the identity account first, then the profile row keyed by the
/// account id. A store failure after the account exists triggers a
/// compensating account delete so the two systems stay aligned.
#[instrument(skip(ctx, input), fields(username = %input.username))]
pub async fn create_teacher(ctx: &MutationContext, input: TeacherInput) -> Result<teacher::Model, ServiceError> {
    let account = ctx
        .identity
        .create_user(NewAccount {
            username: input.username.clone(),
            password: input.password.clone(),
            first_name: input.name.clone(),
            last_name: input.surname.clone(),
            public_role: None,
        })
        .await?;

    match insert_row(ctx, &account.id, &input).await {
        Ok(created) => {
            info!(teacher_id = %created.id, "teacher_created");
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

/// Update identity account and profile row. The subject set is wholly
/// replaced; the password is forwarded only when non-empty.
#[instrument(skip(ctx, input))]
pub async fn update_teacher(ctx: &MutationContext, input: TeacherInput) -> Result<teacher::Model, ServiceError> {
    let id = match input.id.clone() {
        Some(id) if !id.is_empty() => id,
        _ => return Err(ServiceError::Validation("id required".into())),
    };

    let mut update = AccountUpdate {
        username: Some(input.username.clone()),
        first_name: Some(input.name.clone()),
        last_name: Some(input.surname.clone()),
        ..Default::default()
    };
    if !input.password.is_empty() {
        update.password = Some(input.password.clone());
    }
    ctx.identity.update_user(&id, update).await?;

    let txn = ctx.db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let mut am: teacher::ActiveModel = teacher::Entity::find_by_id(id.clone())
        .one(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("teacher"))?
        .into();
    am.username = Set(input.username.clone());
    am.name = Set(input.name.clone());
    am.surname = Set(input.surname.clone());
    am.email = Set(input.email.clone());
    am.phone = Set(input.phone.clone());
    am.address = Set(input.address.clone());
    am.img = Set(input.img.clone());
    am.blood_type = Set(input.blood_type.clone());
    am.sex = Set(input.sex.clone());
    am.birthday = Set(input.birthday);
    let updated = am.update(&txn).await.map_err(|e| ServiceError::Db(e.to_string()))?;

    subject_teacher::Entity::delete_many()
        .filter(subject_teacher::Column::TeacherId.eq(id.as_str()))
        .exec(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    link_subjects(&txn, &id, &input.subjects).await?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(teacher_id = %id, "teacher_updated");
    Ok(updated)
}

/// Delete the profile row first, then the identity account. A failed account
/// delete leaves a retryable orphan instead of a dangling row.
#[instrument(skip(ctx))]
pub async fn delete_teacher(ctx: &MutationContext, id: &str) -> Result<(), ServiceError> {
    let res = teacher::Entity::delete_by_id(id.to_string())
        .exec(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("teacher"));
    }
    if let Err(err) = ctx.identity.delete_user(id).await {
        error!(account_id = %id, error = %err, "profile row removed but identity delete failed");
        return Err(err.into());
    }
    info!(teacher_id = %id, "teacher_deleted");
    Ok(())
}

async fn insert_row(ctx: &MutationContext, id: &str, input: &TeacherInput) -> Result<teacher::Model, ServiceError> {
    let txn = ctx.db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let created = teacher::ActiveModel {
        id: Set(id.to_string()),
        username: Set(input.username.clone()),
        name: Set(input.name.clone()),
        surname: Set(input.surname.clone()),
        email: Set(input.email.clone()),
        phone: Set(input.phone.clone()),
        address: Set(input.address.clone()),
        img: Set(input.img.clone()),
        blood_type: Set(input.blood_type.clone()),
        sex: Set(input.sex.clone()),
        birthday: Set(input.birthday),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await
    .map_err(|e| ServiceError::Db(e.to_string()))?;
    link_subjects(&txn, id, &input.subjects).await?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(created)
}

async fn link_subjects(txn: &DatabaseTransaction, teacher_id: &str, subject_ids: &[i32]) -> Result<(), ServiceError> {
    if subject_ids.is_empty() {
        return Ok(());
    }
    let links = subject_ids.iter().map(|sid| subject_teacher::ActiveModel {
        subject_id: Set(*sid),
        teacher_id: Set(teacher_id.to_string()),
    });
    subject_teacher::Entity::insert_many(links)
        .exec(txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::provider::mock::Call;
    use crate::test_support::{get_db, test_ctx};
    use uuid::Uuid;

    fn input(username: String) -> TeacherInput {
        TeacherInput {
            id: None,
            username,
            password: "s3cret-pw".into(),
            name: "Ada".into(),
            surname: "Byron".into(),
            email: None,
            phone: None,
            address: "12 Analytical Way".into(),
            img: None,
            blood_type: "A+".into(),
            sex: "female".into(),
            birthday: NaiveDate::from_ymd_opt(1990, 12, 10).unwrap(),
            subjects: vec![],
        }
    }

    #[tokio::test]
    async fn create_provisions_account_then_row() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, mock) = test_ctx(db.clone());

        let username = format!("t_{}", Uuid::new_v4());
        let created = create_teacher(&ctx, input(username.clone())).await?;
        // Row id equals the provider-issued account id.
        assert!(mock.has_account(&created.id));
        assert_eq!(created.username, username);

        delete_teacher(&ctx, &created.id).await?;
        assert!(!mock.has_account(&created.id));
        let after = teacher::Entity::find_by_id(created.id).one(&db).await?;
        assert!(after.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn create_compensates_account_on_store_failure() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, mock) = test_ctx(db.clone());

        // Seed a row owning the username directly in the store (the mock
        // knows nothing about it), so the account create succeeds and the
        // row insert then violates the unique username constraint.
        let username = format!("t_{}", Uuid::new_v4());
        let seeded_id = format!("seed_{}", Uuid::new_v4());
        teacher::ActiveModel {
            id: Set(seeded_id.clone()),
            username: Set(username.clone()),
            name: Set("Grace".into()),
            surname: Set("Hopper".into()),
            email: Set(None),
            phone: Set(None),
            address: Set("1 Harbor St".into()),
            img: Set(None),
            blood_type: Set("0+".into()),
            sex: Set("female".into()),
            birthday: Set(NaiveDate::from_ymd_opt(1985, 12, 9).unwrap()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&db)
        .await?;

        let err = create_teacher(&ctx, input(username.clone())).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));

        // The freshly created account was rolled back by the compensation.
        assert_eq!(mock.account_count(), 0);
        let calls = mock.calls();
        assert!(matches!(calls.first(), Some(Call::Create(u)) if *u == username));
        assert!(matches!(calls.last(), Some(Call::Delete(_))));

        teacher::Entity::delete_by_id(seeded_id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn update_without_id_fails_before_any_external_call() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, mock) = test_ctx(db);

        let err = update_teacher(&ctx, input(format!("t_{}", Uuid::new_v4()))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(mock.calls().is_empty(), "no identity traffic on precondition failure");
        Ok(())
    }
}

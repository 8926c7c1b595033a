use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

use models::{class, student};

use crate::context::MutationContext;
use crate::errors::ServiceError;
use crate::identity::domain::{AccountUpdate, NewAccount};

#[derive(Debug, Clone, Deserialize)]
pub struct StudentInput {
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
    pub grade_id: i32,
    pub class_id: i32,
    pub parent_id: String,
}

/// Create a student. The one real business rule lives here: a full class
/// rejects the request before any identity or store mutation is issued.
/// A missing class skips the pre-check; the FK surfaces at insert time.
#[instrument(skip(ctx, input), fields(username = %input.username, class_id = input.class_id))]
pub async fn create_student(ctx: &MutationContext, input: StudentInput) -> Result<student::Model, ServiceError> {
    let target = class::Entity::find_by_id(input.class_id)
        .one(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if let Some(target) = target {
        let enrolled = student::count_in_class(&ctx.db, target.id).await?;
        if enrolled >= target.capacity as u64 {
            info!(class_id = target.id, capacity = target.capacity, "student_rejected_class_full");
            return Err(ServiceError::Validation(format!("class {} is full", target.id)));
        }
    }

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
            info!(student_id = %created.id, class_id = created.class_id, "student_created");
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
pub async fn update_student(ctx: &MutationContext, input: StudentInput) -> Result<student::Model, ServiceError> {
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

    let mut am: student::ActiveModel = student::Entity::find_by_id(id.clone())
        .one(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("student"))?
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
    am.grade_id = Set(input.grade_id);
    am.class_id = Set(input.class_id);
    am.parent_id = Set(input.parent_id.clone());
    let updated = am.update(&ctx.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(student_id = %id, "student_updated");
    Ok(updated)
}

/// Delete the profile row first, then the identity account.
#[instrument(skip(ctx))]
pub async fn delete_student(ctx: &MutationContext, id: &str) -> Result<(), ServiceError> {
    let res = student::Entity::delete_by_id(id.to_string())
        .exec(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("student"));
    }
    if let Err(err) = ctx.identity.delete_user(id).await {
        error!(account_id = %id, error = %err, "profile row removed but identity delete failed");
        return Err(err.into());
    }
    info!(student_id = %id, "student_deleted");
    Ok(())
}

async fn insert_row(ctx: &MutationContext, id: &str, input: &StudentInput) -> Result<student::Model, ServiceError> {
    student::ActiveModel {
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
        grade_id: Set(input.grade_id),
        class_id: Set(input.class_id),
        parent_id: Set(input.parent_id.clone()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&ctx.db)
    .await
    .map_err(|e| ServiceError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_class, seed_grade, seed_parent, seed_student, test_ctx};
    use uuid::Uuid;

    fn input(username: String, grade_id: i32, class_id: i32, parent_id: String) -> StudentInput {
        StudentInput {
            id: None,
            username,
            password: "s3cret-pw".into(),
            name: "Tim".into(),
            surname: "Apple".into(),
            email: None,
            phone: None,
            address: "4 Orchard Rd".into(),
            img: None,
            blood_type: "B+".into(),
            sex: "male".into(),
            birthday: NaiveDate::from_ymd_opt(2011, 4, 1).unwrap(),
            grade_id,
            class_id,
            parent_id,
        }
    }

    #[tokio::test]
    async fn full_class_rejects_without_external_calls() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, mock) = test_ctx(db.clone());

        let grade = seed_grade(&db).await?;
        let target = seed_class(&db, grade.id, 1).await?;
        let parent = seed_parent(&db).await?;
        let occupant = seed_student(&db, grade.id, target.id, &parent.id).await?;

        let err = create_student(
            &ctx,
            input(format!("s_{}", Uuid::new_v4()), grade.id, target.id, parent.id.clone()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(mock.calls().is_empty(), "no identity traffic for a full class");
        assert_eq!(student::count_in_class(&db, target.id).await?, 1);

        student::Entity::delete_by_id(occupant.id).exec(&db).await?;
        class::Entity::delete_by_id(target.id).exec(&db).await?;
        models::parent::Entity::delete_by_id(parent.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn create_then_delete_leaves_no_row() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, mock) = test_ctx(db.clone());

        let grade = seed_grade(&db).await?;
        let target = seed_class(&db, grade.id, 30).await?;
        let parent = seed_parent(&db).await?;

        let created = create_student(
            &ctx,
            input(format!("s_{}", Uuid::new_v4()), grade.id, target.id, parent.id.clone()),
        )
        .await?;
        assert!(mock.has_account(&created.id));

        delete_student(&ctx, &created.id).await?;
        assert!(!mock.has_account(&created.id));
        let after = student::Entity::find_by_id(created.id).one(&db).await?;
        assert!(after.is_none());

        class::Entity::delete_by_id(target.id).exec(&db).await?;
        models::parent::Entity::delete_by_id(parent.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn update_without_id_fails_before_any_external_call() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, mock) = test_ctx(db);

        let err = update_student(&ctx, input(format!("s_{}", Uuid::new_v4()), 1, 1, "p".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(mock.calls().is_empty());
        Ok(())
    }
}

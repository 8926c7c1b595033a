use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument};

use models::{subject, subject_teacher};

use crate::context::MutationContext;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize)]
pub struct SubjectInput {
    pub id: Option<i32>,
    pub name: String,
    /// Identity ids of the assigned teachers; the whole set is applied.
    #[serde(default)]
    pub teachers: Vec<String>,
}

/// Create a subject and its teacher assignments in one store transaction.
#[instrument(skip(ctx, input), fields(name = %input.name))]
pub async fn create_subject(ctx: &MutationContext, input: SubjectInput) -> Result<subject::Model, ServiceError> {
    if input.name.trim().is_empty() {
        return Err(ServiceError::Validation("name required".into()));
    }
    let txn = ctx.db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let created = subject::ActiveModel { name: Set(input.name.clone()), ..Default::default() }
        .insert(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    link_teachers(&txn, created.id, &input.teachers).await?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(subject_id = created.id, teachers = input.teachers.len(), "subject_created");
    Ok(created)
}

/// Update a subject. The teacher assignment set is wholly replaced, not merged.
#[instrument(skip(ctx, input))]
pub async fn update_subject(ctx: &MutationContext, input: SubjectInput) -> Result<subject::Model, ServiceError> {
    let id = input.id.ok_or_else(|| ServiceError::Validation("id required".into()))?;
    if input.name.trim().is_empty() {
        return Err(ServiceError::Validation("name required".into()));
    }
    let txn = ctx.db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let mut am: subject::ActiveModel = subject::Entity::find_by_id(id)
        .one(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("subject"))?
        .into();
    am.name = Set(input.name.clone());
    let updated = am.update(&txn).await.map_err(|e| ServiceError::Db(e.to_string()))?;

    subject_teacher::Entity::delete_many()
        .filter(subject_teacher::Column::SubjectId.eq(id))
        .exec(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    link_teachers(&txn, id, &input.teachers).await?;
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(subject_id = id, teachers = input.teachers.len(), "subject_updated");
    Ok(updated)
}

#[instrument(skip(ctx))]
pub async fn delete_subject(ctx: &MutationContext, id: i32) -> Result<(), ServiceError> {
    let res = subject::Entity::delete_by_id(id)
        .exec(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("subject"));
    }
    info!(subject_id = id, "subject_deleted");
    Ok(())
}

async fn link_teachers(
    txn: &sea_orm::DatabaseTransaction,
    subject_id: i32,
    teacher_ids: &[String],
) -> Result<(), ServiceError> {
    if teacher_ids.is_empty() {
        return Ok(());
    }
    let links = teacher_ids.iter().map(|tid| subject_teacher::ActiveModel {
        subject_id: Set(subject_id),
        teacher_id: Set(tid.clone()),
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
    use crate::test_support::{get_db, seed_teacher, test_ctx};
    use uuid::Uuid;

    #[tokio::test]
    async fn subject_crud_replaces_teacher_set() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, _mock) = test_ctx(db.clone());

        let t1 = seed_teacher(&db).await?;
        let t2 = seed_teacher(&db).await?;

        let created = create_subject(&ctx, SubjectInput {
            id: None,
            name: format!("Maths {}", Uuid::new_v4()),
            teachers: vec![t1.id.clone()],
        }).await?;

        let links = subject_teacher::Entity::find()
            .filter(subject_teacher::Column::SubjectId.eq(created.id))
            .all(&db)
            .await?;
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].teacher_id, t1.id);

        // Replace semantics: the new set fully overwrites the old one.
        let updated = update_subject(&ctx, SubjectInput {
            id: Some(created.id),
            name: format!("Maths II {}", Uuid::new_v4()),
            teachers: vec![t2.id.clone()],
        }).await?;
        assert!(updated.name.starts_with("Maths II"));

        let links = subject_teacher::Entity::find()
            .filter(subject_teacher::Column::SubjectId.eq(created.id))
            .all(&db)
            .await?;
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].teacher_id, t2.id);

        delete_subject(&ctx, created.id).await?;
        let after = subject::Entity::find_by_id(created.id).one(&db).await?;
        assert!(after.is_none());

        models::teacher::Entity::delete_by_id(t1.id).exec(&db).await?;
        models::teacher::Entity::delete_by_id(t2.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_subject_is_not_found() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, _mock) = test_ctx(db);

        let err = delete_subject(&ctx, i32::MAX).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn update_without_id_is_rejected() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, _mock) = test_ctx(db);

        let err = update_subject(&ctx, SubjectInput { id: None, name: "X".into(), teachers: vec![] })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }
}

use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::{result, student, subject};

use crate::context::MutationContext;
use crate::errors::ServiceError;

/// One row of the flat create payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultEntry {
    pub student_id: String,
    pub subject_id: i32,
    pub marks: i32,
    pub grade: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubjectMark {
    pub subject_id: i32,
    pub marks: i32,
}

/// Update payload; intentionally a different shape from the create payload
/// (nested subject list, first entry applied).
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResultInput {
    pub student_id: String,
    pub subjects: Vec<SubjectMark>,
}

/// Insert a batch of result rows inside one store transaction: either every
/// row is created or none is. The referenced student is resolved from the
/// first entry only; every referenced subject must exist.
#[instrument(skip(ctx, entries), fields(rows = entries.len()))]
pub async fn create_results(ctx: &MutationContext, entries: Vec<ResultEntry>) -> Result<Vec<result::Model>, ServiceError> {
    if entries.is_empty() {
        return Err(ServiceError::Validation("no rows to insert".into()));
    }

    let first = &entries[0];
    let known = student::Entity::find_by_id(first.student_id.clone())
        .one(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if known.is_none() {
        return Err(ServiceError::NotFound(format!("student '{}' not found", first.student_id)));
    }

    // Count-based existence check: a duplicate or unknown subject id makes
    // the distinct match set smaller than the request set.
    let subject_ids: Vec<i32> = entries.iter().map(|e| e.subject_id).collect();
    let subjects = subject::find_all_by_ids(&ctx.db, &subject_ids).await?;
    if subjects.len() != subject_ids.len() {
        return Err(ServiceError::Validation("one or more subject ids are invalid".into()));
    }

    let txn = ctx.db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let mut created = Vec::with_capacity(entries.len());
    for entry in &entries {
        let row = result::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(entry.student_id.clone()),
            subject_id: Set(entry.subject_id),
            marks: Set(entry.marks),
            grade: Set(entry.grade.clone()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
        created.push(row);
    }
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(rows = created.len(), "results_created");
    Ok(created)
}

/// Update a single result row; applies the first entry of the nested
/// subject list. The stored grade is not part of this contract.
#[instrument(skip(ctx, input))]
pub async fn update_result(ctx: &MutationContext, id: Uuid, input: UpdateResultInput) -> Result<result::Model, ServiceError> {
    let first = input
        .subjects
        .first()
        .ok_or_else(|| ServiceError::Validation("at least one subject entry required".into()))?;

    let mut am: result::ActiveModel = result::Entity::find_by_id(id)
        .one(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("result"))?
        .into();
    am.student_id = Set(input.student_id.clone());
    am.subject_id = Set(first.subject_id);
    am.marks = Set(first.marks);
    let updated = am.update(&ctx.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(result_id = %id, "result_updated");
    Ok(updated)
}

#[instrument(skip(ctx))]
pub async fn delete_result(ctx: &MutationContext, id: Uuid) -> Result<(), ServiceError> {
    let res = result::Entity::delete_by_id(id)
        .exec(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("result"));
    }
    info!(result_id = %id, "result_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_class, seed_grade, seed_parent, seed_student, seed_subject, test_ctx};
    use sea_orm::{ColumnTrait, PaginatorTrait, QueryFilter};

    async fn count_for_student(db: &sea_orm::DatabaseConnection, student_id: &str) -> Result<u64, anyhow::Error> {
        Ok(result::Entity::find()
            .filter(result::Column::StudentId.eq(student_id))
            .count(db)
            .await?)
    }

    #[tokio::test]
    async fn valid_batch_commits_every_row() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, _mock) = test_ctx(db.clone());

        let grade = seed_grade(&db).await?;
        let target = seed_class(&db, grade.id, 30).await?;
        let parent = seed_parent(&db).await?;
        let pupil = seed_student(&db, grade.id, target.id, &parent.id).await?;
        let maths = seed_subject(&db).await?;
        let physics = seed_subject(&db).await?;

        let created = create_results(&ctx, vec![
            ResultEntry { student_id: pupil.id.clone(), subject_id: maths.id, marks: 88, grade: "B".into() },
            ResultEntry { student_id: pupil.id.clone(), subject_id: physics.id, marks: 95, grade: "A".into() },
        ]).await?;
        assert_eq!(created.len(), 2);
        assert_eq!(count_for_student(&db, &pupil.id).await?, 2);

        for row in &created {
            delete_result(&ctx, row.id).await?;
        }
        assert_eq!(count_for_student(&db, &pupil.id).await?, 0);

        student::Entity::delete_by_id(pupil.id).exec(&db).await?;
        subject::Entity::delete_by_id(maths.id).exec(&db).await?;
        subject::Entity::delete_by_id(physics.id).exec(&db).await?;
        models::class::Entity::delete_by_id(target.id).exec(&db).await?;
        models::parent::Entity::delete_by_id(parent.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn invalid_subject_persists_nothing() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, _mock) = test_ctx(db.clone());

        let grade = seed_grade(&db).await?;
        let target = seed_class(&db, grade.id, 30).await?;
        let parent = seed_parent(&db).await?;
        let pupil = seed_student(&db, grade.id, target.id, &parent.id).await?;
        let maths = seed_subject(&db).await?;

        let err = create_results(&ctx, vec![
            ResultEntry { student_id: pupil.id.clone(), subject_id: maths.id, marks: 71, grade: "C".into() },
            ResultEntry { student_id: pupil.id.clone(), subject_id: i32::MAX, marks: 64, grade: "C".into() },
        ]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(count_for_student(&db, &pupil.id).await?, 0);

        student::Entity::delete_by_id(pupil.id).exec(&db).await?;
        subject::Entity::delete_by_id(maths.id).exec(&db).await?;
        models::class::Entity::delete_by_id(target.id).exec(&db).await?;
        models::parent::Entity::delete_by_id(parent.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, _mock) = test_ctx(db);

        let err = create_results(&ctx, vec![]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }

    #[tokio::test]
    async fn update_applies_first_subject_entry_only() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, _mock) = test_ctx(db.clone());

        let grade = seed_grade(&db).await?;
        let target = seed_class(&db, grade.id, 30).await?;
        let parent = seed_parent(&db).await?;
        let pupil = seed_student(&db, grade.id, target.id, &parent.id).await?;
        let maths = seed_subject(&db).await?;
        let physics = seed_subject(&db).await?;

        let created = create_results(&ctx, vec![
            ResultEntry { student_id: pupil.id.clone(), subject_id: maths.id, marks: 50, grade: "D".into() },
        ]).await?;
        let row = &created[0];

        let updated = update_result(&ctx, row.id, UpdateResultInput {
            student_id: pupil.id.clone(),
            subjects: vec![
                SubjectMark { subject_id: physics.id, marks: 90 },
                SubjectMark { subject_id: maths.id, marks: 10 },
            ],
        }).await?;
        assert_eq!(updated.subject_id, physics.id);
        assert_eq!(updated.marks, 90);
        // The grade column is outside the update contract.
        assert_eq!(updated.grade, "D");

        delete_result(&ctx, row.id).await?;
        student::Entity::delete_by_id(pupil.id).exec(&db).await?;
        subject::Entity::delete_by_id(maths.id).exec(&db).await?;
        subject::Entity::delete_by_id(physics.id).exec(&db).await?;
        models::class::Entity::delete_by_id(target.id).exec(&db).await?;
        models::parent::Entity::delete_by_id(parent.id).exec(&db).await?;
        Ok(())
    }
}

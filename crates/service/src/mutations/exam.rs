use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use tracing::{info, instrument};

use models::{exam, lesson};

use crate::context::MutationContext;
use crate::errors::ServiceError;
use crate::session::{Role, Session};

#[derive(Debug, Clone, Deserialize)]
pub struct ExamInput {
    pub id: Option<i32>,
    pub title: String,
    pub start_time: chrono::DateTime<chrono::FixedOffset>,
    pub end_time: chrono::DateTime<chrono::FixedOffset>,
    pub lesson_id: i32,
}

/// Teacher callers may only touch exams of lessons they own; any other role
/// passes through. Rejection is an ordinary typed error, never a panic.
async fn authorize_lesson(ctx: &MutationContext, session: &Session, lesson_id: i32) -> Result<(), ServiceError> {
    if session.role != Some(Role::Teacher) {
        return Ok(());
    }
    let owned = lesson::Entity::find()
        .filter(lesson::Column::Id.eq(lesson_id))
        .filter(lesson::Column::TeacherId.eq(session.user_id.as_str()))
        .one(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if owned.is_none() {
        return Err(ServiceError::Unauthorized("lesson does not belong to caller".into()));
    }
    Ok(())
}

#[instrument(skip(ctx, session, input), fields(caller = %session.user_id, lesson_id = input.lesson_id))]
pub async fn create_exam(ctx: &MutationContext, session: &Session, input: ExamInput) -> Result<exam::Model, ServiceError> {
    authorize_lesson(ctx, session, input.lesson_id).await?;
    let created = exam::ActiveModel {
        title: Set(input.title),
        start_time: Set(input.start_time),
        end_time: Set(input.end_time),
        lesson_id: Set(input.lesson_id),
        ..Default::default()
    }
    .insert(&ctx.db)
    .await
    .map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(exam_id = created.id, "exam_created");
    Ok(created)
}

#[instrument(skip(ctx, session, input), fields(caller = %session.user_id))]
pub async fn update_exam(ctx: &MutationContext, session: &Session, input: ExamInput) -> Result<exam::Model, ServiceError> {
    let id = input.id.ok_or_else(|| ServiceError::Validation("id required".into()))?;
    authorize_lesson(ctx, session, input.lesson_id).await?;
    let mut am: exam::ActiveModel = exam::Entity::find_by_id(id)
        .one(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("exam"))?
        .into();
    am.title = Set(input.title);
    am.start_time = Set(input.start_time);
    am.end_time = Set(input.end_time);
    am.lesson_id = Set(input.lesson_id);
    let updated = am.update(&ctx.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(exam_id = id, "exam_updated");
    Ok(updated)
}

/// Deletion is open to every role unless `restrict_exam_delete` is set, in
/// which case teacher callers are held to the same ownership gate as
/// create/update.
#[instrument(skip(ctx, session), fields(caller = %session.user_id))]
pub async fn delete_exam(ctx: &MutationContext, session: &Session, id: i32) -> Result<(), ServiceError> {
    if ctx.policy.restrict_exam_delete && session.role == Some(Role::Teacher) {
        let existing = exam::Entity::find_by_id(id)
            .one(&ctx.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .ok_or_else(|| ServiceError::not_found("exam"))?;
        authorize_lesson(ctx, session, existing.lesson_id).await?;
    }
    let res = exam::Entity::delete_by_id(id)
        .exec(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("exam"));
    }
    info!(exam_id = id, "exam_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::MutationPolicy;
    use crate::test_support::{get_db, seed_class, seed_grade, seed_lesson, seed_subject, seed_teacher, test_ctx};
    use chrono::{Duration, Utc};

    fn window() -> (chrono::DateTime<chrono::FixedOffset>, chrono::DateTime<chrono::FixedOffset>) {
        let start = Utc::now().fixed_offset();
        (start, start + Duration::hours(2))
    }

    #[tokio::test]
    async fn teacher_role_is_gated_on_lesson_ownership() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, _mock) = test_ctx(db.clone());

        let grade = seed_grade(&db).await?;
        let target = seed_class(&db, grade.id, 30).await?;
        let subject = seed_subject(&db).await?;
        let owner = seed_teacher(&db).await?;
        let lesson = seed_lesson(&db, subject.id, target.id, &owner.id).await?;
        let (start_time, end_time) = window();

        // A different teacher is rejected before any exam row is written.
        let intruder = Session { user_id: "someone-else".into(), role: Some(Role::Teacher) };
        let err = create_exam(&ctx, &intruder, ExamInput {
            id: None,
            title: "Midterm".into(),
            start_time,
            end_time,
            lesson_id: lesson.id,
        }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));

        // The owning teacher passes the gate.
        let session = Session { user_id: owner.id.clone(), role: Some(Role::Teacher) };
        let created = create_exam(&ctx, &session, ExamInput {
            id: None,
            title: "Midterm".into(),
            start_time,
            end_time,
            lesson_id: lesson.id,
        }).await?;

        // Default policy: any caller may delete, regardless of role.
        let unrelated = Session { user_id: "someone-else".into(), role: Some(Role::Teacher) };
        delete_exam(&ctx, &unrelated, created.id).await?;
        let after = exam::Entity::find_by_id(created.id).one(&db).await?;
        assert!(after.is_none());

        lesson::Entity::delete_by_id(lesson.id).exec(&db).await?;
        models::subject::Entity::delete_by_id(subject.id).exec(&db).await?;
        models::class::Entity::delete_by_id(target.id).exec(&db).await?;
        models::teacher::Entity::delete_by_id(owner.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn restricted_policy_gates_teacher_deletes() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, _mock) = test_ctx(db.clone());
        let ctx = ctx.with_policy(MutationPolicy { restrict_exam_delete: true });

        let grade = seed_grade(&db).await?;
        let target = seed_class(&db, grade.id, 30).await?;
        let subject = seed_subject(&db).await?;
        let owner = seed_teacher(&db).await?;
        let lesson = seed_lesson(&db, subject.id, target.id, &owner.id).await?;
        let (start_time, end_time) = window();

        let admin = Session { user_id: "admin-1".into(), role: Some(Role::Admin) };
        let created = create_exam(&ctx, &admin, ExamInput {
            id: None,
            title: "Final".into(),
            start_time,
            end_time,
            lesson_id: lesson.id,
        }).await?;

        let intruder = Session { user_id: "someone-else".into(), role: Some(Role::Teacher) };
        let err = delete_exam(&ctx, &intruder, created.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));

        let session = Session { user_id: owner.id.clone(), role: Some(Role::Teacher) };
        delete_exam(&ctx, &session, created.id).await?;

        lesson::Entity::delete_by_id(lesson.id).exec(&db).await?;
        models::subject::Entity::delete_by_id(subject.id).exec(&db).await?;
        models::class::Entity::delete_by_id(target.id).exec(&db).await?;
        models::teacher::Entity::delete_by_id(owner.id).exec(&db).await?;
        Ok(())
    }
}

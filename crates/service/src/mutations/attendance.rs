use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::Deserialize;
use tracing::{info, instrument};

use models::attendance;

use crate::context::MutationContext;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceInput {
    pub class_name: String,
    /// External date representation, coerced to a date value before storage.
    pub date: String,
    pub day: String,
    pub present: i32,
    pub total: i32,
}

fn coerce_date(raw: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| ServiceError::Validation(format!("invalid date '{}': {}", raw, e)))
}

#[instrument(skip(ctx, input), fields(class_name = %input.class_name))]
pub async fn create_attendance(ctx: &MutationContext, input: AttendanceInput) -> Result<attendance::Model, ServiceError> {
    let date = coerce_date(&input.date)?;
    let created = attendance::ActiveModel {
        class_name: Set(input.class_name),
        date: Set(date),
        day: Set(input.day),
        present: Set(input.present),
        total: Set(input.total),
        ..Default::default()
    }
    .insert(&ctx.db)
    .await
    .map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(attendance_id = created.id, "attendance_created");
    Ok(created)
}

#[instrument(skip(ctx, input))]
pub async fn update_attendance(ctx: &MutationContext, id: i32, input: AttendanceInput) -> Result<attendance::Model, ServiceError> {
    let date = coerce_date(&input.date)?;
    let mut am: attendance::ActiveModel = attendance::Entity::find_by_id(id)
        .one(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("attendance"))?
        .into();
    am.class_name = Set(input.class_name);
    am.date = Set(date);
    am.day = Set(input.day);
    am.present = Set(input.present);
    am.total = Set(input.total);
    let updated = am.update(&ctx.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(attendance_id = id, "attendance_updated");
    Ok(updated)
}

#[instrument(skip(ctx))]
pub async fn delete_attendance(ctx: &MutationContext, id: i32) -> Result<(), ServiceError> {
    let res = attendance::Entity::delete_by_id(id)
        .exec(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("attendance"));
    }
    info!(attendance_id = id, "attendance_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, test_ctx};

    fn input(date: &str) -> AttendanceInput {
        AttendanceInput {
            class_name: "5A".into(),
            date: date.into(),
            day: "Monday".into(),
            present: 27,
            total: 30,
        }
    }

    #[tokio::test]
    async fn date_is_coerced_and_roundtrips() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, _mock) = test_ctx(db.clone());

        let created = create_attendance(&ctx, input("2024-09-02")).await?;
        assert_eq!(created.date, NaiveDate::from_ymd_opt(2024, 9, 2).unwrap());

        let updated = update_attendance(&ctx, created.id, input("2024-09-03")).await?;
        assert_eq!(updated.date, NaiveDate::from_ymd_opt(2024, 9, 3).unwrap());

        delete_attendance(&ctx, created.id).await?;
        let after = attendance::Entity::find_by_id(created.id).one(&db).await?;
        assert!(after.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn malformed_date_is_rejected() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, _mock) = test_ctx(db);

        let err = create_attendance(&ctx, input("02/09/2024")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }
}

use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::Deserialize;
use tracing::{info, instrument};

use models::class;

use crate::context::MutationContext;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize)]
pub struct ClassInput {
    pub id: Option<i32>,
    pub name: String,
    pub capacity: i32,
    #[serde(default)]
    pub supervisor_id: Option<String>,
    pub grade_id: i32,
}

/// Create a class; the payload passes straight through to the store.
#[instrument(skip(ctx, input), fields(name = %input.name))]
pub async fn create_class(ctx: &MutationContext, input: ClassInput) -> Result<class::Model, ServiceError> {
    let created = class::ActiveModel {
        name: Set(input.name),
        capacity: Set(input.capacity),
        supervisor_id: Set(input.supervisor_id),
        grade_id: Set(input.grade_id),
        ..Default::default()
    }
    .insert(&ctx.db)
    .await
    .map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(class_id = created.id, "class_created");
    Ok(created)
}

#[instrument(skip(ctx, input))]
pub async fn update_class(ctx: &MutationContext, input: ClassInput) -> Result<class::Model, ServiceError> {
    let id = input.id.ok_or_else(|| ServiceError::Validation("id required".into()))?;
    let mut am: class::ActiveModel = class::Entity::find_by_id(id)
        .one(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("class"))?
        .into();
    am.name = Set(input.name);
    am.capacity = Set(input.capacity);
    am.supervisor_id = Set(input.supervisor_id);
    am.grade_id = Set(input.grade_id);
    let updated = am.update(&ctx.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(class_id = id, "class_updated");
    Ok(updated)
}

#[instrument(skip(ctx))]
pub async fn delete_class(ctx: &MutationContext, id: i32) -> Result<(), ServiceError> {
    let res = class::Entity::delete_by_id(id)
        .exec(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("class"));
    }
    info!(class_id = id, "class_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_grade, test_ctx};
    use uuid::Uuid;

    #[tokio::test]
    async fn class_crud_roundtrip() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let (ctx, _mock) = test_ctx(db.clone());

        let grade = seed_grade(&db).await?;
        let created = create_class(&ctx, ClassInput {
            id: None,
            name: format!("5A {}", Uuid::new_v4()),
            capacity: 30,
            supervisor_id: None,
            grade_id: grade.id,
        }).await?;
        assert_eq!(created.capacity, 30);

        let updated = update_class(&ctx, ClassInput {
            id: Some(created.id),
            name: created.name.clone(),
            capacity: 25,
            supervisor_id: None,
            grade_id: grade.id,
        }).await?;
        assert_eq!(updated.capacity, 25);

        delete_class(&ctx, created.id).await?;
        let after = class::Entity::find_by_id(created.id).one(&db).await?;
        assert!(after.is_none());
        Ok(())
    }
}

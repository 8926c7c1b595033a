#![cfg(test)]
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tokio::sync::OnceCell;
use uuid::Uuid;

use models::{class, grade, lesson, parent, student, subject, teacher};

use crate::context::MutationContext;
use crate::identity::provider::mock::MockIdentityProvider;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    MIGRATED
        .get_or_init(|| async {
            let db = models::db::connect().await.expect("connect db for migration");
            migration::Migrator::up(&db, None).await.expect("migrate up");
            drop(db);
        })
        .await;

    // Return a fresh connection for the current test's runtime
    let db = models::db::connect().await?;
    Ok(db)
}

/// Context wired to an in-memory identity mock; the mock is also returned
/// so tests can assert on its call log.
pub fn test_ctx(db: DatabaseConnection) -> (MutationContext, Arc<MockIdentityProvider>) {
    let mock = Arc::new(MockIdentityProvider::default());
    let ctx = MutationContext::new(db, mock.clone());
    (ctx, mock)
}

/// Find-or-create the level-1 grade; the level column is unique and the
/// test database persists across runs.
pub async fn seed_grade(db: &DatabaseConnection) -> Result<grade::Model, anyhow::Error> {
    if let Some(existing) = grade::Entity::find().filter(grade::Column::Level.eq(1)).one(db).await? {
        return Ok(existing);
    }
    match grade::create(db, 1).await {
        Ok(created) => Ok(created),
        // Lost a create race with a concurrent test; the row exists now.
        Err(_) => Ok(grade::Entity::find()
            .filter(grade::Column::Level.eq(1))
            .one(db)
            .await?
            .expect("grade level 1 present after create race")),
    }
}

pub async fn seed_class(db: &DatabaseConnection, grade_id: i32, capacity: i32) -> Result<class::Model, anyhow::Error> {
    Ok(class::ActiveModel {
        name: Set(format!("class_{}", Uuid::new_v4())),
        capacity: Set(capacity),
        supervisor_id: Set(None),
        grade_id: Set(grade_id),
        ..Default::default()
    }
    .insert(db)
    .await?)
}

pub async fn seed_subject(db: &DatabaseConnection) -> Result<subject::Model, anyhow::Error> {
    Ok(subject::ActiveModel {
        name: Set(format!("subject_{}", Uuid::new_v4())),
        ..Default::default()
    }
    .insert(db)
    .await?)
}

pub async fn seed_teacher(db: &DatabaseConnection) -> Result<teacher::Model, anyhow::Error> {
    Ok(teacher::ActiveModel {
        id: Set(format!("teacher_{}", Uuid::new_v4())),
        username: Set(format!("tu_{}", Uuid::new_v4())),
        name: Set("Jean".into()),
        surname: Set("Brodie".into()),
        email: Set(None),
        phone: Set(None),
        address: Set("10 Marcia Blaine St".into()),
        img: Set(None),
        blood_type: Set("A+".into()),
        sex: Set("female".into()),
        birthday: Set(NaiveDate::from_ymd_opt(1980, 6, 15).unwrap()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?)
}

pub async fn seed_parent(db: &DatabaseConnection) -> Result<parent::Model, anyhow::Error> {
    Ok(parent::ActiveModel {
        id: Set(format!("parent_{}", Uuid::new_v4())),
        username: Set(format!("pu_{}", Uuid::new_v4())),
        name: Set("Pat".into()),
        surname: Set("Doe".into()),
        email: Set(String::new()),
        phone: Set(String::new()),
        address: Set(String::new()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?)
}

pub async fn seed_student(
    db: &DatabaseConnection,
    grade_id: i32,
    class_id: i32,
    parent_id: &str,
) -> Result<student::Model, anyhow::Error> {
    Ok(student::ActiveModel {
        id: Set(format!("student_{}", Uuid::new_v4())),
        username: Set(format!("su_{}", Uuid::new_v4())),
        name: Set("Alex".into()),
        surname: Set("Doe".into()),
        email: Set(None),
        phone: Set(None),
        address: Set("2 Schoolyard Ln".into()),
        img: Set(None),
        blood_type: Set("0-".into()),
        sex: Set("male".into()),
        birthday: Set(NaiveDate::from_ymd_opt(2012, 2, 20).unwrap()),
        grade_id: Set(grade_id),
        class_id: Set(class_id),
        parent_id: Set(parent_id.to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?)
}

pub async fn seed_lesson(
    db: &DatabaseConnection,
    subject_id: i32,
    class_id: i32,
    teacher_id: &str,
) -> Result<lesson::Model, anyhow::Error> {
    Ok(lesson::ActiveModel {
        name: Set(format!("lesson_{}", Uuid::new_v4())),
        day: Set("Monday".into()),
        subject_id: Set(subject_id),
        class_id: Set(class_id),
        teacher_id: Set(teacher_id.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?)
}

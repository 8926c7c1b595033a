use crate::db::connect;
use crate::{subject, subject_teacher, teacher};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait};
use uuid::Uuid;

/// Setup test database
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

async fn insert_teacher(db: &DatabaseConnection) -> Result<teacher::Model> {
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

/// Subject + join rows commit together
#[tokio::test]
async fn test_subject_link_commit() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let db = setup_test_db().await?;
    let t = insert_teacher(&db).await?;

    let txn = db.begin().await?;
    let s = subject::ActiveModel { name: Set(format!("subject_{}", Uuid::new_v4())), ..Default::default() }
        .insert(&txn)
        .await?;
    subject_teacher::ActiveModel { subject_id: Set(s.id), teacher_id: Set(t.id.clone()) }
        .insert(&txn)
        .await?;
    txn.commit().await?;

    let links = subject_teacher::Entity::find()
        .filter(subject_teacher::Column::SubjectId.eq(s.id))
        .all(&db)
        .await?;
    assert_eq!(links.len(), 1);

    subject::Entity::delete_by_id(s.id).exec(&db).await?;
    teacher::Entity::delete_by_id(t.id).exec(&db).await?;
    Ok(())
}

/// Rollback leaves neither the subject nor its join rows behind
#[tokio::test]
async fn test_subject_link_rollback() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let db = setup_test_db().await?;
    let t = insert_teacher(&db).await?;

    let name = format!("subject_{}", Uuid::new_v4());
    let txn = db.begin().await?;
    let s = subject::ActiveModel { name: Set(name.clone()), ..Default::default() }
        .insert(&txn)
        .await?;
    subject_teacher::ActiveModel { subject_id: Set(s.id), teacher_id: Set(t.id.clone()) }
        .insert(&txn)
        .await?;
    txn.rollback().await?;

    let found = subject::Entity::find().filter(subject::Column::Name.eq(name)).one(&db).await?;
    assert!(found.is_none());
    let links = subject_teacher::Entity::find()
        .filter(subject_teacher::Column::SubjectId.eq(s.id))
        .all(&db)
        .await?;
    assert!(links.is_empty());

    teacher::Entity::delete_by_id(t.id).exec(&db).await?;
    Ok(())
}

/// A failed insert inside the transaction poisons the whole batch
#[tokio::test]
async fn test_duplicate_name_rolls_back_batch() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let name = format!("subject_{}", Uuid::new_v4());
    let result = async {
        let txn = db.begin().await?;
        subject::ActiveModel { name: Set(name.clone()), ..Default::default() }
            .insert(&txn)
            .await?;
        // Unique name index rejects the duplicate
        subject::ActiveModel { name: Set(name.clone()), ..Default::default() }
            .insert(&txn)
            .await?;
        txn.commit().await?;
        Ok::<(), anyhow::Error>(())
    }
    .await;
    assert!(result.is_err());

    let found = subject::Entity::find().filter(subject::Column::Name.eq(name)).one(&db).await?;
    assert!(found.is_none());
    Ok(())
}

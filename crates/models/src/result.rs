use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{student, subject};

/// One scored subject for one student. String-keyed, unlike the
/// integer-keyed exam/attendance rows.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "result")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub student_id: String,
    pub subject_id: i32,
    pub marks: i32,
    pub grade: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Student,
    Subject,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Student => Entity::belongs_to(student::Entity).from(Column::StudentId).to(student::Column::Id).into(),
            Relation::Subject => Entity::belongs_to(subject::Entity).from(Column::SubjectId).to(subject::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

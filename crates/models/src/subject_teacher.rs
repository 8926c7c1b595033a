use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{subject, teacher};

/// Join table carrying the subject <-> teacher assignment set.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subject_teacher")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub subject_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub teacher_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Subject,
    Teacher,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Subject => Entity::belongs_to(subject::Entity).from(Column::SubjectId).to(subject::Column::Id).into(),
            Relation::Teacher => Entity::belongs_to(teacher::Entity).from(Column::TeacherId).to(teacher::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

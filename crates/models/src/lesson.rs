use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{class, subject, teacher};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lesson")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub day: String,
    pub subject_id: i32,
    pub class_id: i32,
    pub teacher_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Subject,
    Class,
    Teacher,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Subject => Entity::belongs_to(subject::Entity).from(Column::SubjectId).to(subject::Column::Id).into(),
            Relation::Class => Entity::belongs_to(class::Entity).from(Column::ClassId).to(class::Column::Id).into(),
            Relation::Teacher => Entity::belongs_to(teacher::Entity).from(Column::TeacherId).to(teacher::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

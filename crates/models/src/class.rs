use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{grade, teacher};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "class")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub supervisor_id: Option<String>,
    pub grade_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Grade,
    Supervisor,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Grade => Entity::belongs_to(grade::Entity).from(Column::GradeId).to(grade::Column::Id).into(),
            Relation::Supervisor => Entity::belongs_to(teacher::Entity).from(Column::SupervisorId).to(teacher::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

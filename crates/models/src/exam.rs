use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::lesson;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "exam")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub start_time: DateTimeWithTimeZone,
    pub end_time: DateTimeWithTimeZone,
    pub lesson_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Lesson,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Lesson => Entity::belongs_to(lesson::Entity).from(Column::LessonId).to(lesson::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

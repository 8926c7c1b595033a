use sea_orm::{entity::prelude::*, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{class, errors, grade, parent};

/// Student profile row, keyed by the identity-provider account id.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub username: String,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: String,
    pub img: Option<String>,
    pub blood_type: String,
    pub sex: String,
    pub birthday: Date,
    pub grade_id: i32,
    pub class_id: i32,
    pub parent_id: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Grade,
    Class,
    Parent,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Grade => Entity::belongs_to(grade::Entity).from(Column::GradeId).to(grade::Column::Id).into(),
            Relation::Class => Entity::belongs_to(class::Entity).from(Column::ClassId).to(class::Column::Id).into(),
            Relation::Parent => Entity::belongs_to(parent::Entity).from(Column::ParentId).to(parent::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Current enrollment of a class, used for the capacity pre-check.
pub async fn count_in_class(db: &DatabaseConnection, class_id: i32) -> Result<u64, errors::ModelError> {
    use sea_orm::{ColumnTrait, PaginatorTrait, QueryFilter};
    Entity::find()
        .filter(Column::ClassId.eq(class_id))
        .count(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

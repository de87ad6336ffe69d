//! Article entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(column_type = "Text", nullable)]
    pub title: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,

    pub journalist_id: Option<i64>,

    /// Category chosen at write time. Reads use `article_categories` instead.
    pub category_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::journalist::Entity",
        from = "Column::JournalistId",
        to = "super::journalist::Column::Id"
    )]
    Journalist,
}

impl Related<super::journalist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Journalist.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// 평가 태그 목록 (JSON 배열 컬럼)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct RatingTags(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub output_id: i64,
    pub stars: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback_text: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub tags: Option<RatingTags>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::output::entity::output::Entity",
        from = "Column::OutputId",
        to = "crate::domain::output::entity::output::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Output,
}

impl Related<crate::domain::output::entity::output::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Output.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

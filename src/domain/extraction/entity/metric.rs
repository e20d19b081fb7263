use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "metrics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub project_id: i64,
    pub extraction_id: Option<i64>,
    #[sea_orm(column_type = "Double")]
    pub success_rate: f64,
    /// dimension → importance
    #[sea_orm(column_type = "JsonBinary")]
    pub criteria_breakdown: Json,
    pub snapshot_time: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::project::entity::project::Entity",
        from = "Column::ProjectId",
        to = "crate::domain::project::entity::project::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Project,
    #[sea_orm(
        belongs_to = "super::extraction::Entity",
        from = "Column::ExtractionId",
        to = "super::extraction::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Extraction,
}

impl Related<crate::domain::project::entity::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::extraction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Extraction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

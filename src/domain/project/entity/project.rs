use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// 프로젝트의 AI 동작 명세 (JSON 컬럼)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ModelConfig {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub model_config: ModelConfig,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::domain::scenario::entity::scenario::Entity")]
    Scenario,
    #[sea_orm(has_many = "crate::domain::extraction::entity::extraction::Entity")]
    Extraction,
    #[sea_orm(has_many = "crate::domain::extraction::entity::metric::Entity")]
    Metric,
}

impl Related<crate::domain::scenario::entity::scenario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scenario.def()
    }
}

impl Related<crate::domain::extraction::entity::extraction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Extraction.def()
    }
}

impl Related<crate::domain::extraction::entity::metric::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Metric.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

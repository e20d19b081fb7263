use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// 생성 시점의 모델 설정과 토큰 사용량 (JSON 컬럼)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ModelSnapshot {
    pub model: String,
    pub temperature: f64,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub completion_tokens: Option<u32>,
    #[serde(default)]
    pub prompt_tokens: Option<u32>,
    #[serde(default)]
    pub total_tokens: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "outputs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub scenario_id: i64,
    #[sea_orm(column_type = "Text")]
    pub output_text: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub model_snapshot: ModelSnapshot,
    pub generated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::scenario::entity::scenario::Entity",
        from = "Column::ScenarioId",
        to = "crate::domain::scenario::entity::scenario::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Scenario,
    #[sea_orm(has_many = "crate::domain::rating::entity::rating::Entity")]
    Rating,
}

impl Related<crate::domain::scenario::entity::scenario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scenario.def()
    }
}

impl Related<crate::domain::rating::entity::rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rating.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

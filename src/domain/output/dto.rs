use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use super::entity::output::{self, ModelSnapshot};
use crate::domain::rating::dto::RatingResponse;
use crate::domain::scenario::dto::ScenarioResponse;

/// 생성 당시 모델 설정 스냅샷
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelSnapshotDto {
    pub model: String,
    pub temperature: f64,
    pub system_prompt: Option<String>,
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

impl From<ModelSnapshot> for ModelSnapshotDto {
    fn from(snapshot: ModelSnapshot) -> Self {
        Self {
            model: snapshot.model,
            temperature: snapshot.temperature,
            system_prompt: snapshot.system_prompt,
            prompt_tokens: snapshot.prompt_tokens,
            completion_tokens: snapshot.completion_tokens,
            total_tokens: snapshot.total_tokens,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutputResponse {
    pub id: i64,
    pub scenario_id: i64,
    pub output_text: String,
    pub model_snapshot: ModelSnapshotDto,
    pub generated_at: NaiveDateTime,
}

impl From<output::Model> for OutputResponse {
    fn from(model: output::Model) -> Self {
        Self {
            id: model.id,
            scenario_id: model.scenario_id,
            output_text: model.output_text,
            model_snapshot: model.model_snapshot.into(),
            generated_at: model.generated_at,
        }
    }
}

/// 시나리오 단위 생성 실패
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationError {
    pub scenario_id: i64,
    pub error: String,
}

/// 출력 생성 결과
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutputsResponse {
    /// 저장에 성공한 출력 수
    pub generated: usize,
    /// 시나리오 수
    pub total: usize,
    pub outputs: Vec<OutputResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GenerationError>>,
}

/// 시나리오와 최신 출력물, 그 평가 목록
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutputItem {
    pub scenario: ScenarioResponse,
    pub output: Option<OutputResponse>,
    pub ratings: Vec<RatingResponse>,
}

/// 프로젝트 출력물 현황
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOutputsResponse {
    pub items: Vec<ScenarioOutputItem>,
    /// 출력물이 있는 시나리오 수
    pub total_outputs: usize,
    /// 평가가 하나 이상 달린 최신 출력물 수
    pub rated_outputs: usize,
}

/// 출력물 상세
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutputDetailResponse {
    pub output: OutputResponse,
    pub scenario: ScenarioResponse,
    pub ratings: Vec<RatingResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessGenerateOutputsResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: GenerateOutputsResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessProjectOutputsResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: ProjectOutputsResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessOutputDetailResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: OutputDetailResponse,
}

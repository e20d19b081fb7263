use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use super::entity::{extraction, metric};
use super::metrics::Interpretation;

/// 추출 실행 옵션
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ExtractionQuery {
    /// true면 직전 추출 이후가 아니라 전체 평가를 다시 분석
    #[serde(default)]
    pub full: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResponse {
    pub id: i64,
    pub project_id: i64,
    /// 모델이 반환한 분석 결과 (summary, criteria, key_insights, recommendations)
    #[schema(value_type = Object)]
    pub criteria: Value,
    pub confidence_score: f64,
    pub rated_output_count: i32,
    pub created_at: NaiveDateTime,
}

impl From<extraction::Model> for ExtractionResponse {
    fn from(model: extraction::Model) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            criteria: model.criteria,
            confidence_score: model.confidence_score,
            rated_output_count: model.rated_output_count,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricResponse {
    pub id: i64,
    pub project_id: i64,
    pub extraction_id: Option<i64>,
    pub success_rate: f64,
    #[schema(value_type = Object)]
    pub criteria_breakdown: Value,
    pub snapshot_time: NaiveDateTime,
}

impl From<metric::Model> for MetricResponse {
    fn from(model: metric::Model) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            extraction_id: model.extraction_id,
            success_rate: model.success_rate,
            criteria_breakdown: model.criteria_breakdown,
            snapshot_time: model.snapshot_time,
        }
    }
}

/// 추출 실행 결과
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunExtractionResponse {
    pub extraction: ExtractionResponse,
    pub metric: MetricResponse,
    /// 이번 실행에서 분석한 출력물 수
    pub analyzed_outputs: usize,
}

/// 추출 이력 한 건
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionHistoryItem {
    pub id: i64,
    pub created_at: NaiveDateTime,
    pub confidence_score: f64,
    pub rated_output_count: i32,
    pub success_rate: f64,
    pub scenario_count: usize,
    pub success_label: String,
    pub confidence_label: String,
}

/// 인사이트 대시보드
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub extraction: Option<ExtractionResponse>,
    pub metric: Option<MetricResponse>,
    /// 평가가 하나 이상 달린 출력물 수
    pub rated_output_count: usize,
    pub success_interpretation: Option<Interpretation>,
    pub confidence_interpretation: Option<Interpretation>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessRunExtractionResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: RunExtractionResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessExtractionHistoryResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<ExtractionHistoryItem>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessInsightsResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: InsightsResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_query_should_default_to_incremental() {
        let query: ExtractionQuery = serde_json::from_str("{}").unwrap();
        assert!(!query.full);
    }

    #[test]
    fn insights_should_serialize_missing_extraction_as_null() {
        let response = InsightsResponse {
            extraction: None,
            metric: None,
            rated_output_count: 0,
            success_interpretation: None,
            confidence_interpretation: None,
        };

        let json = serde_json::to_value(&response).unwrap();

        assert!(json["extraction"].is_null());
        assert_eq!(json["ratedOutputCount"], 0);
    }
}

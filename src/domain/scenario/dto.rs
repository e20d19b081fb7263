use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::scenario;

/// 시나리오 추가 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateScenarioRequest {
    /// 모델에 전달할 테스트 입력
    #[validate(length(min = 1, message = "inputText is required"))]
    pub input_text: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResponse {
    pub id: i64,
    pub project_id: i64,
    pub input_text: String,
    /// 프로젝트 내 1부터 시작하는 순번
    pub order: i32,
    pub created_at: NaiveDateTime,
}

impl From<scenario::Model> for ScenarioResponse {
    fn from(model: scenario::Model) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            input_text: model.input_text,
            order: model.order_index,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessScenarioResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: ScenarioResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessScenarioListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<ScenarioResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fail_validation_when_input_text_is_empty() {
        let req = CreateScenarioRequest {
            input_text: String::new(),
        };

        let errors = req.validate().unwrap_err();

        assert!(errors.field_errors().contains_key("input_text"));
    }

    #[test]
    fn should_serialize_order_field_name() {
        let response = ScenarioResponse {
            id: 3,
            project_id: 1,
            input_text: "Where is my order?".to_string(),
            order: 2,
            created_at: chrono::NaiveDate::from_ymd_opt(2026, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["order"], 2);
        assert_eq!(json["inputText"], "Where is my order?");
        assert_eq!(json["projectId"], 1);
    }
}

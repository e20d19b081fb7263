use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::project::{self, ModelConfig};
use crate::domain::scenario::dto::ScenarioResponse;

/// 모델 설정 DTO
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfigDto {
    /// 사용할 모델 이름
    #[serde(default)]
    #[schema(example = "gpt-4")]
    pub model: String,

    /// 샘플링 온도 (0 ~ 2)
    #[validate(range(min = 0.0, max = 2.0, message = "temperature must be between 0 and 2"))]
    #[schema(example = 0.7)]
    pub temperature: Option<f64>,

    /// 시스템 프롬프트
    pub system_prompt: Option<String>,
}

impl From<ModelConfig> for ModelConfigDto {
    fn from(config: ModelConfig) -> Self {
        Self {
            model: config.model,
            temperature: config.temperature,
            system_prompt: config.system_prompt,
        }
    }
}

impl From<ModelConfigDto> for ModelConfig {
    fn from(dto: ModelConfigDto) -> Self {
        Self {
            model: dto.model,
            temperature: dto.temperature,
            system_prompt: dto.system_prompt,
        }
    }
}

/// 프로젝트 생성 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(nested)]
    pub model_config: ModelConfigDto,
}

/// 프로젝트 수정 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(nested)]
    pub model_config: ModelConfigDto,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub model_config: ModelConfigDto,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<project::Model> for ProjectResponse {
    fn from(model: project::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            model_config: model.model_config.into(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// 프로젝트 상세 (시나리오 포함)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailResponse {
    pub project: ProjectResponse,
    pub scenarios: Vec<ScenarioResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessProjectResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: ProjectResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessProjectListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<ProjectResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessProjectDetailResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: ProjectDetailResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_create_request_in_camel_case() {
        // Arrange
        let json = r#"{
            "name": "Support bot",
            "description": "Tier-1 support answers",
            "modelConfig": {
                "model": "gpt-4",
                "temperature": 0.7,
                "systemPrompt": "You are a helpful support agent."
            }
        }"#;

        // Act
        let req: CreateProjectRequest = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(req.name, "Support bot");
        assert_eq!(req.model_config.model, "gpt-4");
        assert_eq!(req.model_config.temperature, Some(0.7));
        assert_eq!(
            req.model_config.system_prompt.as_deref(),
            Some("You are a helpful support agent.")
        );
        assert!(req.validate().is_ok());
    }

    #[test]
    fn should_fail_validation_when_name_is_empty() {
        // Arrange
        let req = CreateProjectRequest {
            name: String::new(),
            description: None,
            model_config: ModelConfigDto {
                model: "gpt-4".to_string(),
                ..Default::default()
            },
        };

        // Act
        let result = req.validate();

        // Assert
        assert!(result.unwrap_err().field_errors().contains_key("name"));
    }

    #[test]
    fn should_fail_validation_when_temperature_out_of_range() {
        // Arrange
        let req = CreateProjectRequest {
            name: "Bot".to_string(),
            description: None,
            model_config: ModelConfigDto {
                model: "gpt-4".to_string(),
                temperature: Some(2.5),
                system_prompt: None,
            },
        };

        // Act & Assert
        assert!(req.validate().is_err());
    }

    #[test]
    fn should_reject_request_without_model_config() {
        let json = r#"{ "name": "Bot" }"#;

        let result: Result<CreateProjectRequest, _> = serde_json::from_str(json);

        assert!(result.is_err());
    }

    #[test]
    fn should_store_model_config_with_snake_case_keys() {
        // Arrange
        let dto = ModelConfigDto {
            model: "gpt-4".to_string(),
            temperature: Some(0.2),
            system_prompt: Some("Be brief.".to_string()),
        };

        // Act
        let stored = serde_json::to_value(ModelConfig::from(dto)).unwrap();

        // Assert
        assert_eq!(stored["system_prompt"], "Be brief.");
        assert_eq!(stored["model"], "gpt-4");
    }
}

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{error, info, warn};

use super::dto::{
    GenerateOutputsResponse, GenerationError, OutputDetailResponse, OutputResponse,
    ProjectOutputsResponse, ScenarioOutputItem,
};
use super::entity::output::{self, ModelSnapshot};
use super::rated::{collect_rated_outputs, group_ratings, latest_by_scenario, RatedOutput};
use crate::config::AppConfig;
use crate::domain::ai::{with_retry, Completion, CompletionRequest};
use crate::domain::project::entity::project::ModelConfig;
use crate::domain::project::service::ProjectService;
use crate::domain::rating::entity::rating;
use crate::domain::rating::service::RatingService;
use crate::domain::scenario::entity::scenario;
use crate::domain::scenario::service::ScenarioService;
use crate::state::AppState;
use crate::utils::error::AppError;

/// 프로젝트 설정에 기본값을 채운 생성 파라미터
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f64,
    pub system_prompt: Option<String>,
}

impl GenerationSettings {
    pub fn resolve(model_config: &ModelConfig, config: &AppConfig) -> Self {
        let model = if model_config.model.is_empty() {
            config.generation_default_model.clone()
        } else {
            model_config.model.clone()
        };

        Self {
            model,
            temperature: model_config
                .temperature
                .unwrap_or(config.generation_default_temperature),
            system_prompt: model_config.system_prompt.clone(),
        }
    }

    pub fn request_for(&self, input_text: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            system_prompt: self.system_prompt.clone(),
            user_prompt: input_text.to_string(),
            json_response: false,
        }
    }

    pub fn snapshot(&self, completion: &Completion) -> ModelSnapshot {
        ModelSnapshot {
            model: self.model.clone(),
            temperature: self.temperature,
            system_prompt: self.system_prompt.clone(),
            completion_tokens: completion.completion_tokens,
            prompt_tokens: completion.prompt_tokens,
            total_tokens: completion.total_tokens,
        }
    }
}

pub struct OutputService;

impl OutputService {
    /// 출력물 조회 헬퍼 (없으면 404)
    pub async fn find_output<C: ConnectionTrait>(
        db: &C,
        output_id: i64,
    ) -> Result<output::Model, AppError> {
        output::Entity::find_by_id(output_id)
            .one(db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| AppError::OutputNotFound("Output not found".to_string()))
    }

    /// 시나리오들의 출력물 전체 (생성 순)
    async fn find_by_scenarios<C: ConnectionTrait>(
        db: &C,
        scenarios: &[scenario::Model],
    ) -> Result<Vec<output::Model>, AppError> {
        if scenarios.is_empty() {
            return Ok(Vec::new());
        }
        let scenario_ids: Vec<i64> = scenarios.iter().map(|s| s.id).collect();

        output::Entity::find()
            .filter(output::Column::ScenarioId.is_in(scenario_ids))
            .order_by_asc(output::Column::GeneratedAt)
            .order_by_asc(output::Column::Id)
            .all(db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// 출력물들의 평가 전체
    async fn find_ratings<C: ConnectionTrait>(
        db: &C,
        output_ids: Vec<i64>,
    ) -> Result<Vec<rating::Model>, AppError> {
        if output_ids.is_empty() {
            return Ok(Vec::new());
        }

        rating::Entity::find()
            .filter(rating::Column::OutputId.is_in(output_ids))
            .order_by_desc(rating::Column::CreatedAt)
            .order_by_desc(rating::Column::Id)
            .all(db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// 프로젝트의 평가된 출력물 (출력물마다 최신 평가 하나)
    pub async fn load_rated_outputs<C: ConnectionTrait>(
        db: &C,
        project_id: i64,
    ) -> Result<Vec<RatedOutput>, AppError> {
        let scenarios = ScenarioService::find_by_project(db, project_id).await?;
        Self::rated_outputs_for(db, &scenarios).await
    }

    /// 이미 조회한 시나리오 목록 기준의 평가된 출력물
    pub async fn rated_outputs_for<C: ConnectionTrait>(
        db: &C,
        scenarios: &[scenario::Model],
    ) -> Result<Vec<RatedOutput>, AppError> {
        let outputs = Self::find_by_scenarios(db, scenarios).await?;
        let ratings = Self::find_ratings(db, outputs.iter().map(|o| o.id).collect()).await?;

        Ok(collect_rated_outputs(scenarios, outputs, ratings))
    }

    /// 시나리오별 출력 생성
    ///
    /// 시나리오 순서대로 하나씩 모델을 호출합니다.
    /// 개별 시나리오의 실패는 전체 실행을 중단하지 않고 `errors`에 모읍니다.
    pub async fn generate_outputs(
        state: &AppState,
        project_id: i64,
    ) -> Result<GenerateOutputsResponse, AppError> {
        let project = ProjectService::find_project(state.db.as_ref(), project_id).await?;
        let scenarios = ScenarioService::find_by_project(state.db.as_ref(), project_id).await?;
        if scenarios.is_empty() {
            return Err(AppError::NoScenarios(
                "No scenarios found for this project".to_string(),
            ));
        }

        let settings = GenerationSettings::resolve(&project.model_config, &state.config);
        let mut outputs = Vec::with_capacity(scenarios.len());
        let mut errors = Vec::new();

        for scenario in &scenarios {
            let request = settings.request_for(&scenario.input_text);
            let completion = with_retry(|| {
                let client = state.ai_client.clone();
                let request = request.clone();
                async move { client.complete(request).await }
            })
            .await;

            let completion = match completion {
                Ok(completion) => completion,
                Err(e) => {
                    warn!(
                        scenario_id = scenario.id,
                        error = %e,
                        "Output generation failed"
                    );
                    errors.push(GenerationError {
                        scenario_id: scenario.id,
                        error: e.message(),
                    });
                    continue;
                }
            };

            let output_model = output::ActiveModel {
                scenario_id: Set(scenario.id),
                output_text: Set(completion.content.clone().unwrap_or_default()),
                model_snapshot: Set(settings.snapshot(&completion)),
                generated_at: Set(Utc::now().naive_utc()),
                ..Default::default()
            };

            match output_model.insert(state.db.as_ref()).await {
                Ok(saved) => outputs.push(OutputResponse::from(saved)),
                Err(e) => {
                    error!(scenario_id = scenario.id, error = %e, "Failed to save output");
                    errors.push(GenerationError {
                        scenario_id: scenario.id,
                        error: "Failed to save output".to_string(),
                    });
                }
            }
        }

        info!(
            project_id = project_id,
            generated = outputs.len(),
            total = scenarios.len(),
            failed = errors.len(),
            "Output generation finished"
        );

        Ok(GenerateOutputsResponse {
            generated: outputs.len(),
            total: scenarios.len(),
            outputs,
            errors: (!errors.is_empty()).then_some(errors),
        })
    }

    /// 시나리오별 최신 출력물과 평가 현황
    pub async fn list_project_outputs(
        state: &AppState,
        project_id: i64,
    ) -> Result<ProjectOutputsResponse, AppError> {
        ProjectService::find_project(state.db.as_ref(), project_id).await?;
        let scenarios = ScenarioService::find_by_project(state.db.as_ref(), project_id).await?;
        let outputs = Self::find_by_scenarios(state.db.as_ref(), &scenarios).await?;
        let mut latest = latest_by_scenario(outputs);
        let latest_ids = latest.values().map(|o| o.id).collect();
        let mut ratings = group_ratings(Self::find_ratings(state.db.as_ref(), latest_ids).await?);

        let mut total_outputs = 0;
        let mut rated_outputs = 0;
        let items = scenarios
            .into_iter()
            .map(|scenario| {
                let output = latest.remove(&scenario.id);
                let output_ratings = output
                    .as_ref()
                    .and_then(|o| ratings.remove(&o.id))
                    .unwrap_or_default();

                if output.is_some() {
                    total_outputs += 1;
                }
                if !output_ratings.is_empty() {
                    rated_outputs += 1;
                }

                ScenarioOutputItem {
                    scenario: scenario.into(),
                    output: output.map(Into::into),
                    ratings: output_ratings.into_iter().map(Into::into).collect(),
                }
            })
            .collect();

        Ok(ProjectOutputsResponse {
            items,
            total_outputs,
            rated_outputs,
        })
    }

    /// 출력물 상세 (시나리오 입력과 평가 포함)
    pub async fn get_output(
        state: &AppState,
        output_id: i64,
    ) -> Result<OutputDetailResponse, AppError> {
        let output_model = Self::find_output(state.db.as_ref(), output_id).await?;
        let scenario_model = scenario::Entity::find_by_id(output_model.scenario_id)
            .one(state.db.as_ref())
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "Scenario {} missing for output {}",
                    output_model.scenario_id, output_id
                ))
            })?;
        let ratings = RatingService::find_by_output(state.db.as_ref(), output_id).await?;

        Ok(OutputDetailResponse {
            output: output_model.into(),
            scenario: scenario_model.into(),
            ratings: ratings.into_iter().map(Into::into).collect(),
        })
    }
}

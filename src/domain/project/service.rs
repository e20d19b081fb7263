use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};
use tracing::info;

use super::dto::{
    CreateProjectRequest, ProjectDetailResponse, ProjectResponse, UpdateProjectRequest,
};
use super::entity::project;
use crate::domain::scenario::service::ScenarioService;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::text::non_empty;

pub struct ProjectService;

impl ProjectService {
    /// 프로젝트 조회 헬퍼 (없으면 404)
    pub async fn find_project<C: ConnectionTrait>(
        db: &C,
        project_id: i64,
    ) -> Result<project::Model, AppError> {
        project::Entity::find_by_id(project_id)
            .one(db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .ok_or_else(|| AppError::ProjectNotFound("Project not found".to_string()))
    }

    /// 프로젝트 생성
    pub async fn create_project(
        state: &AppState,
        req: CreateProjectRequest,
    ) -> Result<ProjectResponse, AppError> {
        if req.model_config.model.trim().is_empty() {
            return Err(AppError::ValidationError(
                "modelConfig.model is required".to_string(),
            ));
        }

        let now = Utc::now().naive_utc();
        let project_model = project::ActiveModel {
            name: Set(req.name),
            description: Set(non_empty(req.description)),
            model_config: Set(req.model_config.into()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = project_model
            .insert(state.db.as_ref())
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!(project_id = created.id, "Project created");

        Ok(created.into())
    }

    /// 프로젝트 목록 (최신순)
    pub async fn list_projects(state: &AppState) -> Result<Vec<ProjectResponse>, AppError> {
        let projects = project::Entity::find()
            .order_by_desc(project::Column::CreatedAt)
            .order_by_desc(project::Column::Id)
            .all(state.db.as_ref())
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(projects.into_iter().map(Into::into).collect())
    }

    /// 프로젝트 상세 (시나리오 포함)
    pub async fn get_project(
        state: &AppState,
        project_id: i64,
    ) -> Result<ProjectDetailResponse, AppError> {
        let project_model = Self::find_project(state.db.as_ref(), project_id).await?;
        let scenarios = ScenarioService::find_by_project(state.db.as_ref(), project_id).await?;

        Ok(ProjectDetailResponse {
            project: project_model.into(),
            scenarios: scenarios.into_iter().map(Into::into).collect(),
        })
    }

    /// 프로젝트 수정
    ///
    /// 편집 화면과 동일하게 이름과 시스템 프롬프트를 필수로 요구합니다.
    /// description이 생략되면 기존 값을 유지합니다.
    pub async fn update_project(
        state: &AppState,
        project_id: i64,
        req: UpdateProjectRequest,
    ) -> Result<ProjectResponse, AppError> {
        let has_system_prompt = req
            .model_config
            .system_prompt
            .as_deref()
            .map(|prompt| !prompt.trim().is_empty())
            .unwrap_or(false);
        if !has_system_prompt {
            return Err(AppError::ValidationError(
                "name and system prompt are required".to_string(),
            ));
        }

        let existing = Self::find_project(state.db.as_ref(), project_id).await?;

        let mut active: project::ActiveModel = existing.into();
        active.name = Set(req.name);
        if let Some(description) = req.description {
            active.description = Set(non_empty(Some(description)));
        }
        active.model_config = Set(req.model_config.into());
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active
            .update(state.db.as_ref())
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!(project_id = updated.id, "Project updated");

        Ok(updated.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::dto::ModelConfigDto;
    use crate::domain::project::entity::project::ModelConfig;
    use crate::test_support::{state_with_db, timestamp};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn project_model(id: i64, name: &str) -> project::Model {
        project::Model {
            id,
            name: name.to_string(),
            description: None,
            model_config: ModelConfig {
                model: "gpt-4".to_string(),
                temperature: Some(0.7),
                system_prompt: Some("You are a helpful support agent.".to_string()),
            },
            created_at: timestamp(0),
            updated_at: timestamp(0),
        }
    }

    fn model_config(system_prompt: Option<&str>) -> ModelConfigDto {
        ModelConfigDto {
            model: "gpt-4".to_string(),
            temperature: Some(0.7),
            system_prompt: system_prompt.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn should_create_project() {
        // Arrange
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![project_model(1, "Support bot")]])
            .into_connection();
        let state = state_with_db(db);
        let req = CreateProjectRequest {
            name: "Support bot".to_string(),
            description: Some("".to_string()),
            model_config: model_config(Some("You are a helpful support agent.")),
        };

        // Act
        let result = ProjectService::create_project(&state, req).await.unwrap();

        // Assert
        assert_eq!(result.id, 1);
        assert_eq!(result.name, "Support bot");
        assert_eq!(result.model_config.model, "gpt-4");
    }

    #[tokio::test]
    async fn should_reject_project_without_model() {
        // Arrange
        let state = state_with_db(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let req = CreateProjectRequest {
            name: "Support bot".to_string(),
            description: None,
            model_config: ModelConfigDto::default(),
        };

        // Act
        let result = ProjectService::create_project(&state, req).await;

        // Assert
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_for_missing_project() {
        // Arrange
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<project::Model>::new()])
            .into_connection();
        let state = state_with_db(db);

        // Act
        let result = ProjectService::get_project(&state, 99).await;

        // Assert
        assert!(matches!(result, Err(AppError::ProjectNotFound(_))));
    }

    #[tokio::test]
    async fn should_require_system_prompt_on_update() {
        // Arrange
        let state = state_with_db(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let req = UpdateProjectRequest {
            name: "Support bot".to_string(),
            description: None,
            model_config: model_config(Some("   ")),
        };

        // Act
        let result = ProjectService::update_project(&state, 1, req).await;

        // Assert
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn should_update_existing_project() {
        // Arrange
        let mut updated = project_model(1, "Renamed bot");
        updated.model_config.system_prompt = Some("Answer in two sentences.".to_string());
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![project_model(1, "Support bot")]])
            .append_query_results([vec![updated]])
            .into_connection();
        let state = state_with_db(db);
        let req = UpdateProjectRequest {
            name: "Renamed bot".to_string(),
            description: None,
            model_config: model_config(Some("Answer in two sentences.")),
        };

        // Act
        let result = ProjectService::update_project(&state, 1, req).await.unwrap();

        // Assert
        assert_eq!(result.name, "Renamed bot");
        assert_eq!(
            result.model_config.system_prompt.as_deref(),
            Some("Answer in two sentences.")
        );
    }
}

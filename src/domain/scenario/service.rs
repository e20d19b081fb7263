use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::dto::{CreateScenarioRequest, ScenarioResponse};
use super::entity::scenario;
use crate::domain::project::service::ProjectService;
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct ScenarioService;

impl ScenarioService {
    /// 프로젝트의 시나리오를 순번 오름차순으로 조회
    pub async fn find_by_project<C: ConnectionTrait>(
        db: &C,
        project_id: i64,
    ) -> Result<Vec<scenario::Model>, AppError> {
        scenario::Entity::find()
            .filter(scenario::Column::ProjectId.eq(project_id))
            .order_by_asc(scenario::Column::OrderIndex)
            .order_by_asc(scenario::Column::Id)
            .all(db)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))
    }

    /// 시나리오 추가
    ///
    /// 순번은 프로젝트 내 최대 순번 + 1 (첫 시나리오는 1)
    pub async fn create_scenario(
        state: &AppState,
        project_id: i64,
        req: CreateScenarioRequest,
    ) -> Result<ScenarioResponse, AppError> {
        ProjectService::find_project(state.db.as_ref(), project_id).await?;

        let last = scenario::Entity::find()
            .filter(scenario::Column::ProjectId.eq(project_id))
            .order_by_desc(scenario::Column::OrderIndex)
            .one(state.db.as_ref())
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        let next_order = next_order(last.as_ref());

        let scenario_model = scenario::ActiveModel {
            project_id: Set(project_id),
            input_text: Set(req.input_text),
            order_index: Set(next_order),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let created = scenario_model
            .insert(state.db.as_ref())
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        info!(
            project_id = project_id,
            scenario_id = created.id,
            order = created.order_index,
            "Scenario created"
        );

        Ok(created.into())
    }

    /// 시나리오 목록
    pub async fn list_scenarios(
        state: &AppState,
        project_id: i64,
    ) -> Result<Vec<ScenarioResponse>, AppError> {
        let scenarios = Self::find_by_project(state.db.as_ref(), project_id).await?;
        Ok(scenarios.into_iter().map(Into::into).collect())
    }
}

fn next_order(last: Option<&scenario::Model>) -> i32 {
    last.map(|s| s.order_index + 1).unwrap_or(1)
}

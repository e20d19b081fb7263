use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use validator::Validate;

#[allow(unused_imports)]
use super::dto::{
    CreateScenarioRequest, ScenarioResponse, SuccessScenarioListResponse, SuccessScenarioResponse,
};
use super::service::ScenarioService;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 시나리오 추가 API
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/scenarios",
    params(("id" = i64, Path, description = "프로젝트 ID")),
    request_body = CreateScenarioRequest,
    responses(
        (status = 201, description = "시나리오 추가 성공", body = SuccessScenarioResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 프로젝트", body = ErrorResponse)
    ),
    tag = "Scenario"
)]
pub async fn create_scenario(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreateScenarioRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BaseResponse<ScenarioResponse>>), AppError> {
    let Path(project_id) = path?;
    let Json(req) = payload?;
    req.validate()?;

    let result = ScenarioService::create_scenario(&state, project_id, req).await?;

    Ok((StatusCode::CREATED, Json(BaseResponse::created(result))))
}

/// 시나리오 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}/scenarios",
    params(("id" = i64, Path, description = "프로젝트 ID")),
    responses(
        (status = 200, description = "조회 성공", body = SuccessScenarioListResponse)
    ),
    tag = "Scenario"
)]
pub async fn list_scenarios(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BaseResponse<Vec<ScenarioResponse>>>, AppError> {
    let Path(project_id) = path?;
    let result = ScenarioService::list_scenarios(&state, project_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

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
    CreateProjectRequest, ProjectDetailResponse, ProjectResponse, SuccessProjectDetailResponse,
    SuccessProjectListResponse, SuccessProjectResponse, UpdateProjectRequest,
};
use super::service::ProjectService;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 프로젝트 생성 API
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "프로젝트 생성 성공", body = SuccessProjectResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 500, description = "서버 내부 오류", body = ErrorResponse)
    ),
    tag = "Project"
)]
pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BaseResponse<ProjectResponse>>), AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let result = ProjectService::create_project(&state, req).await?;

    Ok((StatusCode::CREATED, Json(BaseResponse::created(result))))
}

/// 프로젝트 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    responses(
        (status = 200, description = "조회 성공", body = SuccessProjectListResponse),
        (status = 500, description = "서버 내부 오류", body = ErrorResponse)
    ),
    tag = "Project"
)]
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<BaseResponse<Vec<ProjectResponse>>>, AppError> {
    let result = ProjectService::list_projects(&state).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 프로젝트 상세 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    params(("id" = i64, Path, description = "프로젝트 ID")),
    responses(
        (status = 200, description = "조회 성공", body = SuccessProjectDetailResponse),
        (status = 404, description = "존재하지 않는 프로젝트", body = ErrorResponse)
    ),
    tag = "Project"
)]
pub async fn get_project(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BaseResponse<ProjectDetailResponse>>, AppError> {
    let Path(project_id) = path?;
    let result = ProjectService::get_project(&state, project_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 프로젝트 수정 API
#[utoipa::path(
    patch,
    path = "/api/v1/projects/{id}",
    params(("id" = i64, Path, description = "프로젝트 ID")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "수정 성공", body = SuccessProjectResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 프로젝트", body = ErrorResponse)
    ),
    tag = "Project"
)]
pub async fn update_project(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateProjectRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<ProjectResponse>>, AppError> {
    let Path(project_id) = path?;
    let Json(req) = payload?;
    req.validate()?;

    let result = ProjectService::update_project(&state, project_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

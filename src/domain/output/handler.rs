use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

#[allow(unused_imports)]
use super::dto::{
    GenerateOutputsResponse, OutputDetailResponse, ProjectOutputsResponse,
    SuccessGenerateOutputsResponse, SuccessOutputDetailResponse, SuccessProjectOutputsResponse,
};
use super::service::OutputService;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 출력 생성 API
///
/// 프로젝트의 모든 시나리오에 대해 모델 출력을 하나씩 생성합니다.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/generate",
    params(("id" = i64, Path, description = "프로젝트 ID")),
    responses(
        (status = 200, description = "생성 완료 (일부 실패 포함 가능)", body = SuccessGenerateOutputsResponse),
        (status = 400, description = "시나리오 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 프로젝트", body = ErrorResponse)
    ),
    tag = "Output"
)]
pub async fn generate_outputs(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BaseResponse<GenerateOutputsResponse>>, AppError> {
    let Path(project_id) = path?;
    let result = OutputService::generate_outputs(&state, project_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 프로젝트 출력물 현황 API
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}/outputs",
    params(("id" = i64, Path, description = "프로젝트 ID")),
    responses(
        (status = 200, description = "조회 성공", body = SuccessProjectOutputsResponse),
        (status = 404, description = "존재하지 않는 프로젝트", body = ErrorResponse)
    ),
    tag = "Output"
)]
pub async fn list_project_outputs(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BaseResponse<ProjectOutputsResponse>>, AppError> {
    let Path(project_id) = path?;
    let result = OutputService::list_project_outputs(&state, project_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 출력물 상세 API
#[utoipa::path(
    get,
    path = "/api/v1/outputs/{outputId}",
    params(("outputId" = i64, Path, description = "출력물 ID")),
    responses(
        (status = 200, description = "조회 성공", body = SuccessOutputDetailResponse),
        (status = 404, description = "존재하지 않는 출력물", body = ErrorResponse)
    ),
    tag = "Output"
)]
pub async fn get_output(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BaseResponse<OutputDetailResponse>>, AppError> {
    let Path(output_id) = path?;
    let result = OutputService::get_output(&state, output_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

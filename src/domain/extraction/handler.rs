use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

#[allow(unused_imports)]
use super::dto::{
    ExtractionHistoryItem, ExtractionQuery, InsightsResponse, RunExtractionResponse,
    SuccessExtractionHistoryResponse, SuccessInsightsResponse, SuccessRunExtractionResponse,
};
use super::service::ExtractionService;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 패턴 추출 API
///
/// 평가된 출력물을 모델로 분석해 품질 기준과 지표 스냅샷을 저장합니다.
/// 기본은 직전 추출 이후의 평가만 분석하며 `full=true`면 전체를 다시 분석합니다.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/extract",
    params(
        ("id" = i64, Path, description = "프로젝트 ID"),
        ExtractionQuery
    ),
    responses(
        (status = 200, description = "추출 성공", body = SuccessRunExtractionResponse),
        (status = 400, description = "분석할 평가 없음 (EXTRACT4001, EXTRACT4002)", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 프로젝트", body = ErrorResponse),
        (status = 502, description = "모델 호출 실패 또는 잘못된 응답", body = ErrorResponse)
    ),
    tag = "Extraction"
)]
pub async fn run_extraction(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<ExtractionQuery>, QueryRejection>,
) -> Result<Json<BaseResponse<RunExtractionResponse>>, AppError> {
    let Path(project_id) = path?;
    let Query(query) = query?;

    let result = ExtractionService::run_extraction(&state, project_id, query.full).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 추출 이력 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}/extractions",
    params(("id" = i64, Path, description = "프로젝트 ID")),
    responses(
        (status = 200, description = "조회 성공", body = SuccessExtractionHistoryResponse),
        (status = 404, description = "존재하지 않는 프로젝트", body = ErrorResponse)
    ),
    tag = "Extraction"
)]
pub async fn list_extractions(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BaseResponse<Vec<ExtractionHistoryItem>>>, AppError> {
    let Path(project_id) = path?;
    let result = ExtractionService::list_extractions(&state, project_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 인사이트 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}/insights",
    params(("id" = i64, Path, description = "프로젝트 ID")),
    responses(
        (status = 200, description = "조회 성공", body = SuccessInsightsResponse),
        (status = 404, description = "존재하지 않는 프로젝트", body = ErrorResponse)
    ),
    tag = "Extraction"
)]
pub async fn get_insights(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BaseResponse<InsightsResponse>>, AppError> {
    let Path(project_id) = path?;
    let result = ExtractionService::get_insights(&state, project_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

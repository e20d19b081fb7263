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
    CreateRatingRequest, RatingResponse, SuccessRatingListResponse, SuccessRatingResponse,
};
use super::service::RatingService;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 평가 등록 API
#[utoipa::path(
    post,
    path = "/api/v1/outputs/{outputId}/ratings",
    params(("outputId" = i64, Path, description = "출력물 ID")),
    request_body = CreateRatingRequest,
    responses(
        (status = 201, description = "평가 등록 성공", body = SuccessRatingResponse),
        (status = 400, description = "별점 범위 오류", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 출력물", body = ErrorResponse)
    ),
    tag = "Rating"
)]
pub async fn create_rating(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreateRatingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BaseResponse<RatingResponse>>), AppError> {
    let Path(output_id) = path?;
    let Json(req) = payload?;
    req.validate()?;

    let result = RatingService::create_rating(&state, output_id, req).await?;

    Ok((StatusCode::CREATED, Json(BaseResponse::created(result))))
}

/// 평가 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/v1/outputs/{outputId}/ratings",
    params(("outputId" = i64, Path, description = "출력물 ID")),
    responses(
        (status = 200, description = "조회 성공", body = SuccessRatingListResponse)
    ),
    tag = "Rating"
)]
pub async fn list_ratings(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BaseResponse<Vec<RatingResponse>>>, AppError> {
    let Path(output_id) = path?;
    let result = RatingService::list_ratings(&state, output_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

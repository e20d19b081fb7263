use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::rating;

/// 평가 등록 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRatingRequest {
    /// 별점 (1 ~ 5)
    #[validate(range(min = 1, max = 5, message = "Valid star rating (1-5) is required"))]
    #[schema(example = 4)]
    pub stars: i32,

    /// 자유 형식 피드백
    pub feedback_text: Option<String>,

    /// 평가 태그
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub id: i64,
    pub output_id: i64,
    pub stars: i32,
    pub feedback_text: Option<String>,
    pub tags: Option<Vec<String>>,
    pub created_at: NaiveDateTime,
}

impl From<rating::Model> for RatingResponse {
    fn from(model: rating::Model) -> Self {
        Self {
            id: model.id,
            output_id: model.output_id,
            stars: model.stars,
            feedback_text: model.feedback_text,
            tags: model.tags.map(|tags| tags.0),
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessRatingResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: RatingResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessRatingListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<RatingResponse>,
}

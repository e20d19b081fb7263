use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};
use validator::ValidationErrors;

use super::response::ErrorResponse;

/// 애플리케이션 전역 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("Malformed request: {0}")]
    JsonParseFailed(String),

    #[error("{0}")]
    ProjectNotFound(String),

    #[error("{0}")]
    OutputNotFound(String),

    /// 프로젝트에 시나리오가 하나도 없음
    #[error("{0}")]
    NoScenarios(String),

    /// 평가된 출력이 하나도 없음
    #[error("{0}")]
    NoRatedOutputs(String),

    /// 직전 추출 이후 새로운 평가가 없음
    #[error("{0}")]
    NoNewRatings(String),

    /// 내보낼 추출 결과가 없음
    #[error("{0}")]
    ExtractionNotFound(String),

    #[error("OpenAI authentication failed")]
    OpenAiAuthError,

    #[error("OpenAI rate limit exceeded")]
    OpenAiRateLimitError,

    #[error("OpenAI is temporarily unavailable")]
    OpenAiTemporaryError,

    #[error("OpenAI request failed: {0}")]
    OpenAiError(String),

    /// 모델 응답이 JSON으로 해석되지 않음
    #[error("Model response is not valid JSON: {0}")]
    AiResponseInvalid(String),

    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    /// 에러 코드 반환
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "COMMON400",
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::ProjectNotFound(_) => "PROJECT4041",
            AppError::OutputNotFound(_) => "OUTPUT4041",
            AppError::NoScenarios(_) => "SCENARIO4001",
            AppError::NoRatedOutputs(_) => "EXTRACT4001",
            AppError::NoNewRatings(_) => "EXTRACT4002",
            AppError::ExtractionNotFound(_) => "EXPORT4001",
            AppError::OpenAiAuthError => "AI5001",
            AppError::OpenAiRateLimitError => "AI5002",
            AppError::OpenAiTemporaryError => "AI5003",
            AppError::OpenAiError(_) => "AI5003",
            AppError::AiResponseInvalid(_) => "AI5004",
            AppError::InternalError(_) => "COMMON500",
        }
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::ValidationError(_)
            | AppError::JsonParseFailed(_)
            | AppError::NoScenarios(_)
            | AppError::NoRatedOutputs(_)
            | AppError::NoNewRatings(_)
            | AppError::ExtractionNotFound(_) => StatusCode::BAD_REQUEST,
            AppError::ProjectNotFound(_) | AppError::OutputNotFound(_) => StatusCode::NOT_FOUND,
            AppError::OpenAiRateLimitError => StatusCode::TOO_MANY_REQUESTS,
            AppError::OpenAiAuthError
            | AppError::OpenAiError(_)
            | AppError::AiResponseInvalid(_) => StatusCode::BAD_GATEWAY,
            AppError::OpenAiTemporaryError => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 클라이언트에 노출할 메시지
    ///
    /// 서버 내부 에러의 상세 내용은 로그로만 남깁니다.
    pub fn message(&self) -> String {
        match self {
            AppError::InternalError(_) => "Internal server error".to_string(),
            AppError::OpenAiError(_) => "Failed to call the language model".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() || status == StatusCode::BAD_GATEWAY {
            error!(code = code, error = %self, "request failed");
        } else {
            warn!(code = code, error = %self, "request rejected");
        }

        let body = ErrorResponse::new(code, self.message());

        (status, Json(body)).into_response()
    }
}

/// validator 에러를 AppError로 변환 (첫 번째 필드 메시지 사용)
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        AppError::ValidationError(message)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
    }

    #[test]
    fn should_map_not_found_errors_to_404() {
        let error = AppError::ProjectNotFound("Project not found".to_string());

        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.error_code(), "PROJECT4041");
    }

    #[test]
    fn should_map_precondition_errors_to_400() {
        assert_eq!(
            AppError::NoScenarios("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NoNewRatings("x".into()).error_code(),
            "EXTRACT4002"
        );
        assert_eq!(
            AppError::ExtractionNotFound("x".into()).error_code(),
            "EXPORT4001"
        );
    }

    #[test]
    fn should_hide_internal_error_details() {
        let error = AppError::InternalError("connection refused on 10.0.0.3".to_string());

        assert_eq!(error.message(), "Internal server error");
        assert!(error.to_string().contains("10.0.0.3"));
    }

    #[test]
    fn should_convert_validation_errors_with_field_message() {
        // Arrange
        let sample = Sample {
            name: String::new(),
        };

        // Act
        let error: AppError = sample.validate().unwrap_err().into();

        // Assert
        match error {
            AppError::ValidationError(msg) => assert_eq!(msg, "name is required"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_render_error_envelope() {
        // Arrange
        let error = AppError::OutputNotFound("Output not found".to_string());

        // Act
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        // Assert
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["isSuccess"], false);
        assert_eq!(body["code"], "OUTPUT4041");
        assert_eq!(body["message"], "Output not found");
        assert!(body["result"].is_null());
    }
}

use axum::{extract::State, Json};
use tracing::warn;

use super::dto::{HealthState, HealthStatus};
use super::service::check_health;
use crate::state::AppState;

/// 헬스체크 API
///
/// 상태와 무관하게 200을 반환하며 판단은 `status` 필드로 합니다.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "의존성 체크 결과", body = HealthStatus)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let health = check_health(&state).await;
    if health.status != HealthState::Healthy {
        warn!(
            status = ?health.status,
            database = health.checks.database.status,
            openai = health.checks.openai_api.status,
            "Service is not fully healthy"
        );
    }
    Json(health)
}

use std::time::Duration;

use serde::Serialize;
use utoipa::ToSchema;

/// 이 지연(ms) 이상이면 성공이어도 Degraded
pub const SLOW_CHECK_MS: u64 = 2_000;

/// `GET /health` 응답
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: HealthState,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    #[schema(example = 3600)]
    pub uptime_secs: u64,
    pub checks: HealthChecks,
}

impl HealthStatus {
    pub fn new(checks: HealthChecks, uptime_secs: u64) -> Self {
        Self {
            status: checks.overall(),
            version: env!("CARGO_PKG_VERSION"),
            uptime_secs,
            checks,
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
    Unhealthy,
}

/// 의존성별 체크 결과
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    /// Postgres ping
    pub database: CheckResult,
    /// OpenAI 모델 목록 조회
    pub openai_api: CheckResult,
}

impl HealthChecks {
    /// 데이터베이스 실패는 Unhealthy, 모델 API 실패나 느린 응답은 Degraded
    pub fn overall(&self) -> HealthState {
        if !self.database.status {
            HealthState::Unhealthy
        } else if !self.openai_api.status || self.database.is_slow() || self.openai_api.is_slow()
        {
            HealthState::Degraded
        } else {
            HealthState::Healthy
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    #[schema(example = true)]
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 12)]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    pub fn passed(latency_ms: u64) -> Self {
        Self {
            status: true,
            latency_ms: Some(latency_ms),
            error: None,
        }
    }

    pub fn failed(latency_ms: u64, error: impl Into<String>) -> Self {
        Self {
            status: false,
            latency_ms: Some(latency_ms),
            error: Some(error.into()),
        }
    }

    pub fn timed_out(limit: Duration) -> Self {
        Self::failed(
            limit.as_millis() as u64,
            format!("Timed out after {}ms", limit.as_millis()),
        )
    }

    fn is_slow(&self) -> bool {
        self.latency_ms.is_some_and(|latency| latency >= SLOW_CHECK_MS)
    }
}

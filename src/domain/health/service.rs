use std::fmt::Display;
use std::future::Future;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::{debug, warn};

use super::dto::{CheckResult, HealthChecks, HealthStatus};
use crate::state::AppState;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// 의존성 하나당 허용하는 최대 대기 시간
const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// 가동 시간 측정 시작점 기록 (main에서 한 번 호출)
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

fn uptime_secs() -> u64 {
    START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

/// 데이터베이스와 OpenAI를 동시에 확인
pub async fn check_health(state: &AppState) -> HealthStatus {
    let (database, openai_api) = tokio::join!(
        probe("database", CHECK_TIMEOUT, state.db.ping()),
        probe("openai", CHECK_TIMEOUT, state.ai_client.check_connectivity()),
    );

    HealthStatus::new(
        HealthChecks {
            database,
            openai_api,
        },
        uptime_secs(),
    )
}

async fn probe<F, E>(name: &'static str, limit: Duration, check: F) -> CheckResult
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    let start = Instant::now();
    let outcome = timeout(limit, check).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(Ok(())) => {
            debug!(check = name, latency_ms, "Health check passed");
            CheckResult::passed(latency_ms)
        }
        Ok(Err(e)) => {
            warn!(check = name, latency_ms, error = %e, "Health check failed");
            CheckResult::failed(latency_ms, e.to_string())
        }
        Err(_) => {
            warn!(check = name, limit_ms = limit.as_millis() as u64, "Health check timed out");
            CheckResult::timed_out(limit)
        }
    }
}

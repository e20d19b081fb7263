use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::ai::AiClient;
use sea_orm::DatabaseConnection;

/// 핸들러 간 공유 상태
///
/// `mock` 기능이 켜지면 `DatabaseConnection`이 `Clone`을 구현하지 않으므로 `Arc`로 감쌉니다.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: AppConfig,
    pub ai_client: AiClient,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig, ai_client: AiClient) -> Self {
        Self {
            db: Arc::new(db),
            config,
            ai_client,
        }
    }
}

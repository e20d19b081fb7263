//! 단위 테스트 공용 헬퍼

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::domain::ai::client::MockAiClientTrait;
use crate::state::AppState;

/// 기준 시각(2026-10-01 09:00:00) + `offset_secs`
pub fn timestamp(offset_secs: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid base timestamp")
        + Duration::seconds(offset_secs)
}

/// AI 호출이 없어야 하는 테스트용 상태
pub fn state_with_db(db: DatabaseConnection) -> AppState {
    state_with(db, MockAiClientTrait::new())
}

pub fn state_with(db: DatabaseConnection, ai_client: MockAiClientTrait) -> AppState {
    AppState::new(db, AppConfig::for_test(), Arc::new(ai_client))
}

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::Request,
    Router,
};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tellah_server::config::AppConfig;
use tellah_server::domain::ai::{AiClientTrait, Completion, CompletionRequest};
use tellah_server::domain::project::entity::project::{self, ModelConfig};
use tellah_server::utils::AppError;
use tellah_server::{app, AppState};

/// 고정 응답을 돌려주는 모델 클라이언트
///
/// JSON 응답 모드 요청(패턴 추출)에는 `analysis_json`, 나머지에는 `output_text`를 돌려줍니다.
pub struct StubAiClient {
    pub output_text: String,
    pub analysis_json: String,
}

impl StubAiClient {
    pub fn new(output_text: &str, analysis_json: &str) -> Self {
        Self {
            output_text: output_text.to_string(),
            analysis_json: analysis_json.to_string(),
        }
    }

    pub fn replying(content: &str) -> Self {
        Self::new(content, content)
    }
}

#[async_trait::async_trait]
impl AiClientTrait for StubAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, AppError> {
        let content = if request.json_response {
            &self.analysis_json
        } else {
            &self.output_text
        };
        Ok(Completion {
            content: Some(content.clone()),
            prompt_tokens: Some(10),
            completion_tokens: Some(20),
            total_tokens: Some(30),
        })
    }

    async fn check_connectivity(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub fn router(db: DatabaseConnection) -> Router {
    router_with(db, StubAiClient::replying("{}"))
}

pub fn router_with(db: DatabaseConnection, ai_client: StubAiClient) -> Router {
    app(AppState::new(db, AppConfig::for_test(), Arc::new(ai_client)))
}

pub async fn parse_response_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn read_text(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn create_json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn timestamp(offset_secs: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
        + Duration::seconds(offset_secs)
}

pub fn project_model(id: i64, name: &str) -> project::Model {
    project::Model {
        id,
        name: name.to_string(),
        description: Some("Answers billing questions".to_string()),
        model_config: ModelConfig {
            model: "gpt-4".to_string(),
            temperature: Some(0.7),
            system_prompt: Some("You are a concise billing assistant.".to_string()),
        },
        created_at: timestamp(0),
        updated_at: timestamp(0),
    }
}

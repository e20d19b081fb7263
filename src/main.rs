use std::net::SocketAddr;
use std::sync::Arc;

use tellah_server::config::{establish_connection, AppConfig};
use tellah_server::domain::ai::OpenAiClient;
use tellah_server::domain::health::init_start_time;
use tellah_server::shutdown::shutdown_signal;
use tellah_server::utils::logging::init_logging;
use tellah_server::{app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 설정 로드 (로깅보다 먼저 LOG_DIR가 필요)
    let config = AppConfig::from_env()?;

    // 3. 로깅 초기화 (guard는 main 종료 시까지 유지)
    let _log_guard = init_logging(&config.log_dir);
    init_start_time();
    if config.openai_api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set. Generation and extraction requests will fail.");
    }

    // 4. 의존성 구성
    let db = establish_connection(&config.database_url).await?;
    let ai_client = Arc::new(OpenAiClient::new(
        &config.openai_api_key,
        config.openai_api_base.as_deref(),
        config.openai_timeout_secs,
    ));
    let port = config.server_port;
    let state = AppState::new(db, config, ai_client);

    // 5. 서버 실행
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

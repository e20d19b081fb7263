use std::env;
use std::str::FromStr;

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub log_dir: String,

    // AI Service
    pub openai_api_key: String,
    pub openai_api_base: Option<String>,
    pub openai_timeout_secs: u64,

    // 출력 생성 시 프로젝트 설정이 비어 있으면 사용하는 기본값
    pub generation_default_model: String,
    pub generation_default_temperature: f64,

    // 패턴 추출
    pub extraction_model: String,
    pub extraction_temperature: f64,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port = parse_or("SERVER_PORT", 8080u16, ConfigError::InvalidPort)?;

        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let openai_api_base = env::var("OPENAI_API_BASE").ok().filter(|v| !v.is_empty());
        let openai_timeout_secs =
            parse_or("OPENAI_TIMEOUT_SECS", 60u64, ConfigError::InvalidTimeout)?;

        let generation_default_model =
            env::var("GENERATION_DEFAULT_MODEL").unwrap_or_else(|_| "gpt-4".to_string());
        let generation_default_temperature = parse_or(
            "GENERATION_DEFAULT_TEMPERATURE",
            0.7f64,
            ConfigError::InvalidTemperature,
        )?;

        let extraction_model =
            env::var("EXTRACTION_MODEL").unwrap_or_else(|_| "gpt-4-turbo".to_string());
        let extraction_temperature =
            parse_or("EXTRACTION_TEMPERATURE", 0.3f64, ConfigError::InvalidTemperature)?;

        Ok(Self {
            server_port,
            database_url,
            log_dir,
            openai_api_key,
            openai_api_base,
            openai_timeout_secs,
            generation_default_model,
            generation_default_temperature,
            extraction_model,
            extraction_temperature,
        })
    }

    /// 테스트용 설정 (환경 변수를 읽지 않음)
    pub fn for_test() -> Self {
        Self {
            server_port: 0,
            database_url: "postgres://localhost/tellah_test".to_string(),
            log_dir: "logs".to_string(),
            openai_api_key: "test-key".to_string(),
            openai_api_base: None,
            openai_timeout_secs: 5,
            generation_default_model: "gpt-4".to_string(),
            generation_default_temperature: 0.7,
            extraction_model: "gpt-4-turbo".to_string(),
            extraction_temperature: 0.3,
        }
    }
}

fn parse_or<T: FromStr>(key: &str, default: T, error: ConfigError) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| error),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Invalid OpenAI timeout")]
    InvalidTimeout,
    #[error("Invalid temperature value")]
    InvalidTemperature,
    #[error("DATABASE_URL environment variable is required")]
    MissingDatabaseUrl,
}

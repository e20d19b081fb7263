use std::sync::Arc;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};

use crate::utils::error::AppError;

/// 모델 호출 요청
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f64,
    /// 비어 있으면 system 메시지를 보내지 않음
    pub system_prompt: Option<String>,
    pub user_prompt: String,
    /// JSON object 응답 모드 사용 여부
    pub json_response: bool,
}

/// 모델 호출 결과
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub content: Option<String>,
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

/// OpenAI 에러를 세분화된 AppError로 변환
fn classify_openai_error(error: OpenAIError) -> AppError {
    match &error {
        OpenAIError::ApiError(api_err) => {
            let err_type = api_err.r#type.as_deref().unwrap_or("");
            let message = &api_err.message;

            if err_type == "invalid_request_error" && message.contains("API key") {
                AppError::OpenAiAuthError
            } else if err_type == "rate_limit_error" || message.contains("rate limit") {
                AppError::OpenAiRateLimitError
            } else if err_type == "server_error" || message.contains("server") {
                AppError::OpenAiTemporaryError
            } else {
                AppError::OpenAiError(message.clone())
            }
        }
        OpenAIError::Reqwest(req_err) => {
            let status = req_err.status().map(|s| s.as_u16());
            if req_err.is_timeout() || req_err.is_connect() {
                AppError::OpenAiTemporaryError
            } else if status == Some(401) {
                AppError::OpenAiAuthError
            } else if status == Some(429) {
                AppError::OpenAiRateLimitError
            } else if status.map(|s| s >= 500).unwrap_or(false) {
                AppError::OpenAiTemporaryError
            } else {
                AppError::OpenAiError(req_err.to_string())
            }
        }
        _ => AppError::OpenAiError(error.to_string()),
    }
}

/// AI 클라이언트 인터페이스
///
/// OpenAI API 호출을 추상화하여 테스트에서 Mock 객체로 대체할 수 있습니다.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AiClientTrait: Send + Sync {
    /// 채팅 완성 요청
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, AppError>;

    /// API 연결 상태 확인 (모델 목록 조회)
    async fn check_connectivity(&self) -> Result<(), AppError>;
}

/// Arc로 래핑된 AiClient (Clone 지원)
pub type AiClient = Arc<dyn AiClientTrait>;

/// OpenAI API 클라이언트 구현체
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(api_key: &str, api_base: Option<&str>, timeout_secs: u64) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base) = api_base {
            config = config.with_api_base(base);
        }
        Self {
            client: Client::with_config(config),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[async_trait::async_trait]
impl AiClientTrait for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, AppError> {
        let messages = build_messages(&request)?;

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder
            .model(request.model.as_str())
            .temperature(request.temperature as f32)
            .messages(messages);
        if request.json_response {
            builder.response_format(ResponseFormat::JsonObject);
        }
        let chat_request = builder
            .build()
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(chat_request))
            .await
            .map_err(|_| AppError::OpenAiTemporaryError)? // 타임아웃
            .map_err(classify_openai_error)?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone());
        let usage = response.usage.as_ref();

        Ok(Completion {
            content,
            prompt_tokens: usage.map(|u| u.prompt_tokens),
            completion_tokens: usage.map(|u| u.completion_tokens),
            total_tokens: usage.map(|u| u.total_tokens),
        })
    }

    async fn check_connectivity(&self) -> Result<(), AppError> {
        self.client
            .models()
            .list()
            .await
            .map_err(classify_openai_error)?;
        Ok(())
    }
}

/// system(선택) + user 메시지 구성
pub(crate) fn build_messages(
    request: &CompletionRequest,
) -> Result<Vec<ChatCompletionRequestMessage>, AppError> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system_prompt) = request
        .system_prompt
        .as_deref()
        .filter(|prompt| !prompt.is_empty())
    {
        messages.push(build_system_message(system_prompt)?);
    }
    messages.push(build_user_message(&request.user_prompt)?);
    Ok(messages)
}

pub(crate) fn build_system_message(content: &str) -> Result<ChatCompletionRequestMessage, AppError> {
    Ok(ChatCompletionRequestMessage::System(
        ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| AppError::InternalError(e.to_string()))?,
    ))
}

pub(crate) fn build_user_message(content: &str) -> Result<ChatCompletionRequestMessage, AppError> {
    Ok(ChatCompletionRequestMessage::User(
        ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| AppError::InternalError(e.to_string()))?,
    ))
}

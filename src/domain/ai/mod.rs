pub mod client;
pub mod retry;

pub use client::{AiClient, AiClientTrait, Completion, CompletionRequest, OpenAiClient};
pub use retry::with_retry;

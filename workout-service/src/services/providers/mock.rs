//! Mock provider implementation for testing and offline development.

use super::{
    ChatMessage, CompletionProvider, FinishReason, GenerationParams, ProviderError,
    ProviderResponse,
};
use crate::services::prompt::EXAMPLE_PLAN_JSON;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Reply with this text.
    Text(String),
    /// Fail with a network error carrying this message.
    Failure(String),
}

/// Mock completion provider that returns a canned reply and records calls.
pub struct MockCompletionProvider {
    reply: MockReply,
    calls: AtomicUsize,
    last_request: Mutex<Option<(Vec<ChatMessage>, GenerationParams)>>,
}

impl MockCompletionProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Mock that always replies with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockReply::Text(text.into()))
    }

    /// Mock that always fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockReply::Failure(message.into()))
    }

    /// Mock that answers with the prompt's example plan.
    pub fn example_plan() -> Self {
        Self::replying(EXAMPLE_PLAN_JSON)
    }

    /// Number of completion calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Messages and parameters of the most recent call.
    pub fn last_request(&self) -> Option<(Vec<ChatMessage>, GenerationParams)> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some((messages.to_vec(), params.clone()));
        }

        match &self.reply {
            MockReply::Text(text) => Ok(ProviderResponse {
                text: text.clone(),
                input_tokens: messages.iter().map(|m| m.content.len() as u32 / 4).sum(),
                output_tokens: text.len() as u32 / 4,
                finish_reason: FinishReason::Complete,
            }),
            MockReply::Failure(message) => Err(ProviderError::NetworkError(message.clone())),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

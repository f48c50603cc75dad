//! A provider that replays queued completions
//!
//! Used as the stub model in tests: every request is recorded so callers can
//! assert on ordering and prompt content afterwards.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{LlmError, Result};
use crate::provider::LlmProvider;
use crate::types::{Completion, CompletionRequest, Usage};

/// Replays completions in FIFO order and records the requests it sees
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<Completion>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new(replies: impl IntoIterator<Item = Completion>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue one plain-text answer per string, each costing 10 prompt / 5 completion tokens
    pub fn with_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            texts
                .into_iter()
                .map(|t| Completion::text_reply(t, Usage::new(10, 5))),
        )
    }

    /// Queue a failure at the end of the script
    pub fn then_fail(self, error: LlmError) -> Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(Err(error));
        }
        self
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        self.requests
            .lock()
            .map_err(|_| LlmError::Provider("request log poisoned".to_string()))?
            .push(request);

        self.replies
            .lock()
            .map_err(|_| LlmError::Provider("reply queue poisoned".to_string()))?
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Provider("scripted provider has no replies left".to_string())))
    }
}

//! The completion capability seam

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Completion, CompletionRequest};

/// Anything that can answer a chat completion request
///
/// Implementations perform exactly one round-trip per call: no retries, no
/// tool execution. A failed call is returned to the caller as-is.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion>;
}

#[async_trait]
impl<P: LlmProvider + ?Sized> LlmProvider for std::sync::Arc<P> {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        (**self).complete(request).await
    }
}

//! Chat-completion capability used by crew-analyzer agents.
//!
//! The crate knows how to describe a conversation
//! ([`ChatMessage`]), the functions a model may call ([`ToolSpec`]), and how to
//! send one completion round-trip to a provider ([`LlmProvider`]). Looping over
//! tool calls, prompt assembly and result bookkeeping live in the application.
//!
//! # Example
//!
//! ```no_run
//! use crew_llm::{ChatMessage, CompletionRequest, LlmProvider, ModelId, OpenAiClient};
//!
//! # async fn example() -> Result<(), crew_llm::LlmError> {
//! let model: ModelId = "openai/gpt-4o-mini".parse()?;
//! let client = OpenAiClient::from_env(&model, None)?;
//!
//! let request = CompletionRequest::new(
//!     model.name(),
//!     vec![
//!         ChatMessage::system("You are a terse assistant."),
//!         ChatMessage::user("Say hello."),
//!     ],
//! );
//! let completion = client.complete(request).await?;
//! println!("{}", completion.text());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod model;
pub mod openai;
pub mod provider;
pub mod scripted;
pub mod types;

pub use error::{LlmError, Result};
pub use model::{ModelId, Provider};
pub use openai::{ClientConfig, OpenAiClient};
pub use provider::LlmProvider;
pub use scripted::ScriptedProvider;
pub use types::{
    ChatMessage, Completion, CompletionRequest, FunctionCall, Role, ToolCall, ToolSpec, Usage,
};

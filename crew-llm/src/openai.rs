//! OpenAI-compatible chat/completions client
//!
//! Works against any endpoint speaking the chat/completions dialect with
//! function tools: OpenAI itself, OpenRouter and a local Ollama server.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{LlmError, Result};
use crate::model::ModelId;
use crate::provider::LlmProvider;
use crate::types::{ChatMessage, Completion, CompletionRequest, Role, ToolCall, Usage};

/// Connection settings for [`OpenAiClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL without the `/chat/completions` suffix
    pub base_url: String,
    /// Bearer token; `None` for providers that need no auth
    pub api_key: Option<String>,
}

impl ClientConfig {
    /// Full endpoint URL
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// HTTP client for one provider endpoint
pub struct OpenAiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl OpenAiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config })
    }

    /// Build a client for `model`, reading the provider's key from the environment
    ///
    /// `base_url` overrides the provider's default endpoint.
    pub fn from_env(model: &ModelId, base_url: Option<&str>) -> Result<Self> {
        let provider = model.provider();
        let api_key = match provider.api_key_env() {
            Some(var) => Some(
                std::env::var(var)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
                    .ok_or_else(|| LlmError::MissingApiKey {
                        env_var: var.to_string(),
                    })?,
            ),
            None => None,
        };

        Self::new(ClientConfig {
            base_url: base_url
                .unwrap_or(provider.default_base_url())
                .to_string(),
            api_key,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request_body(request: &CompletionRequest) -> Result<Value> {
        let mut messages = Vec::with_capacity(request.messages.len());
        for message in &request.messages {
            let mut value = serde_json::to_value(message)?;
            // Assistant tool-call turns must carry an explicit null content
            if message.role == Role::Assistant && message.content.is_none() {
                value["content"] = Value::Null;
            }
            messages.push(value);
        }

        let mut body = json!({
            "model": request.model,
            "messages": messages,
        });

        if !request.tools.is_empty() {
            body["tools"] = request
                .tools
                .iter()
                .map(|tool| {
                    json!({
                        "type": "function",
                        "function": {
                            "name": tool.name,
                            "description": tool.description,
                            "parameters": tool.parameters,
                        }
                    })
                })
                .collect();
        }

        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

/// Convert a raw chat/completions payload into a [`Completion`]
fn parse_response(payload: ChatResponse) -> Result<Completion> {
    let choice = payload
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::MalformedResponse("response has no choices".to_string()))?;

    let tool_calls = choice.message.tool_calls.unwrap_or_default();
    if choice.message.content.is_none() && tool_calls.is_empty() {
        return Err(LlmError::MalformedResponse(
            "choice has neither content nor tool calls".to_string(),
        ));
    }

    Ok(Completion {
        message: ChatMessage {
            role: Role::Assistant,
            content: choice.message.content,
            tool_calls,
            tool_call_id: None,
        },
        usage: payload.usage.unwrap_or_default(),
    })
}

#[async_trait]
impl LlmProvider for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        let body = Self::request_body(&request)?;

        #[cfg(feature = "tracing-support")]
        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending chat completion request"
        );

        let mut builder = self.http.post(self.config.endpoint()).json(&body);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            #[cfg(feature = "tracing-support")]
            tracing::error!(status = status.as_u16(), "Chat completion request failed");
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        let completion = parse_response(payload)?;

        #[cfg(feature = "tracing-support")]
        tracing::debug!(
            prompt_tokens = completion.usage.prompt_tokens,
            completion_tokens = completion.usage.completion_tokens,
            tool_calls = completion.message.tool_calls.len(),
            "Chat completion received"
        );

        Ok(completion)
    }
}

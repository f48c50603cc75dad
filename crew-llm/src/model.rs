//! Model identifiers of the form `provider/model`

use std::fmt;
use std::str::FromStr;

use crate::error::LlmError;

/// Providers reachable through an OpenAI-compatible chat/completions endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    OpenRouter,
    Ollama,
}

impl Provider {
    pub fn prefix(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::OpenRouter => "openrouter",
            Provider::Ollama => "ollama",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::OpenAi => "https://api.openai.com/v1",
            Provider::OpenRouter => "https://openrouter.ai/api/v1",
            Provider::Ollama => "http://localhost:11434/v1",
        }
    }

    /// Environment variable holding the API key, if the provider needs one
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Provider::OpenAi => Some("OPENAI_API_KEY"),
            Provider::OpenRouter => Some("OPENROUTER_API_KEY"),
            Provider::Ollama => None,
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "openai" => Some(Provider::OpenAi),
            "openrouter" => Some(Provider::OpenRouter),
            "ollama" => Some(Provider::Ollama),
            _ => None,
        }
    }
}

/// Parsed model identifier
///
/// `openai/gpt-4o-mini` selects the OpenAI provider and the `gpt-4o-mini`
/// model. Only the first `/` separates the provider, so
/// `openrouter/anthropic/claude-3.5-sonnet` keeps `anthropic/claude-3.5-sonnet`
/// as the model name. A bare name defaults to OpenAI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelId {
    provider: Provider,
    name: String,
}

impl ModelId {
    pub fn new(provider: Provider, name: impl Into<String>) -> Self {
        Self {
            provider,
            name: name.into(),
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Model name as sent to the provider
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for ModelId {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LlmError::UnsupportedProvider(String::new()));
        }

        match s.split_once('/') {
            Some((prefix, name)) => {
                let provider = Provider::from_prefix(prefix)
                    .ok_or_else(|| LlmError::UnsupportedProvider(prefix.to_string()))?;
                if name.is_empty() {
                    return Err(LlmError::Provider(format!("model identifier `{}` has no model name", s)));
                }
                Ok(Self::new(provider, name))
            }
            None => Ok(Self::new(Provider::OpenAi, s)),
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider.prefix(), self.name)
    }
}

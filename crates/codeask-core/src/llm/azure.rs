//! Azure OpenAI provider.
//!
//! Implements [`ChatProvider`] against an Azure OpenAI deployment. Azure
//! routes by deployment name in the URL path and authenticates with an
//! `api-key` header rather than a bearer token:
//!
//! ```text
//! {endpoint}/openai/deployments/{deployment}/chat/completions?api-version={version}
//! ```

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use codeask_config::{ApiKey, AzureOpenAiConfig};

use crate::BoxFuture;

use super::provider::{ChatProvider, LlmError};
use super::types::*;

/// Azure OpenAI chat-completion provider.
pub struct AzureOpenAiProvider {
    client: Client,
    endpoint: String,
    api_key: ApiKey,
    deployment: String,
    api_version: String,
}

impl AzureOpenAiProvider {
    /// Create a provider from startup credentials.
    pub fn new(config: &AzureOpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            deployment: config.deployment.clone(),
            api_version: config.api_version.clone(),
        }
    }

    /// The deployment this provider submits requests to.
    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    /// Full chat-completions URL for the configured deployment.
    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }

    /// Convert our ChatRequest into Azure's wire format.
    fn build_request_body(&self, request: &ChatRequest) -> AzureChatRequest {
        let model = if request.model.is_empty() {
            self.deployment.clone()
        } else {
            request.model.clone()
        };

        AzureChatRequest {
            model,
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.clone(),
                    content: Some(m.content.clone()),
                })
                .collect(),
            temperature: Some(request.temperature),
            max_tokens: request.max_tokens,
        }
    }

    /// Parse Azure's response into our ChatResponse.
    fn parse_response(&self, resp: AzureChatResponse) -> Result<ChatResponse, LlmError> {
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Parse("no choices in response".to_string()))?;

        let content = choice
            .message
            .content
            .ok_or_else(|| LlmError::Parse("choice has no text content".to_string()))?;

        Ok(ChatResponse {
            content,
            model: resp.model,
            usage: resp.usage.map_or_else(TokenUsage::default, |u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }
}

impl ChatProvider for AzureOpenAiProvider {
    fn name(&self) -> &str {
        "Azure OpenAI"
    }

    fn chat(&self, request: &ChatRequest) -> BoxFuture<'_, Result<ChatResponse, LlmError>> {
        let body = self.build_request_body(request);
        Box::pin(async move {
            debug!(deployment = %self.deployment, "Azure OpenAI chat request");

            let resp = self
                .client
                .post(self.completions_url())
                .header("api-key", self.api_key.expose())
                .header("content-type", "application/json")
                .json(&body)
                .send()
                .await
                .map_err(|e| LlmError::Network(e.to_string()))?;

            let status = resp.status().as_u16();
            if status == 401 {
                return Err(LlmError::Auth("invalid API key".to_string()));
            }
            if status == 429 {
                let retry_after = resp
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);
                return Err(LlmError::RateLimited {
                    retry_after_secs: retry_after,
                });
            }
            if !resp.status().is_success() {
                let error_body = resp.text().await.unwrap_or_default();
                return Err(LlmError::ProviderError {
                    status,
                    message: error_body,
                });
            }

            let api_resp: AzureChatResponse = resp
                .json()
                .await
                .map_err(|e| LlmError::Parse(e.to_string()))?;

            self.parse_response(api_resp)
        })
    }
}

// ── Azure wire types (private) ──────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AzureChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AzureChatResponse {
    #[serde(default)]
    model: String,
    choices: Vec<AzureChoice>,
    usage: Option<AzureUsage>,
}

#[derive(Debug, Deserialize)]
struct AzureChoice {
    message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct AzureUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#![deny(unsafe_code)]

//! Credential loading and startup validation for codeask.
//!
//! All credentials come from the process environment, read exactly once at
//! startup into an [`AzureOpenAiConfig`]. Three variables are required and
//! have no defaults:
//!
//! - `AZURE_OPENAI_ENDPOINT` — resource endpoint URL
//! - `AZURE_OPENAI_KEY` — API key
//! - `AZURE_OPENAI_DEPLOYMENT_NAME` — deployment (model) identifier
//!
//! A missing or empty value is a fatal configuration error: the binary
//! reports which variables are required and exits non-zero before any
//! query is accepted. There is no retry path; fixing the environment is
//! an operator action.

use std::fmt;

use zeroize::Zeroize;

/// Environment variable holding the Azure OpenAI resource endpoint.
pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
/// Environment variable holding the Azure OpenAI API key.
pub const ENV_API_KEY: &str = "AZURE_OPENAI_KEY";
/// Environment variable holding the deployment (model) identifier.
pub const ENV_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT_NAME";
/// Optional override for the API version query parameter.
pub const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";

/// API version used when `AZURE_OPENAI_API_VERSION` is not set.
pub const DEFAULT_API_VERSION: &str = "2024-12-01-preview";

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<String>),
}

/// An API key with automatic zeroization on drop.
///
/// The value is redacted in `Debug` output so credentials never leak
/// through logs or panic messages.
#[derive(Clone)]
pub struct ApiKey {
    inner: String,
}

impl ApiKey {
    /// Wrap a raw key value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Get the key as a string slice.
    ///
    /// Use sparingly — only at the point where the request header is built.
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Key length (without exposing the value).
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the key is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("inner", &"[REDACTED]")
            .field("len", &self.inner.len())
            .finish()
    }
}

impl Drop for ApiKey {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

/// Process-wide Azure OpenAI credentials, constructed once at startup.
#[derive(Debug, Clone)]
pub struct AzureOpenAiConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`.
    pub endpoint: String,
    /// API key sent in the `api-key` header.
    pub api_key: ApiKey,
    /// Deployment identifier, e.g. `gpt-4o`.
    pub deployment: String,
    /// API version query parameter.
    pub api_version: String,
}

impl AzureOpenAiConfig {
    /// Load credentials from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary lookup function.
    ///
    /// This is the seam tests use to supply variables without mutating
    /// process-global environment state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();

        let endpoint = required(&lookup, ENV_ENDPOINT, &mut missing);
        let api_key = required(&lookup, ENV_API_KEY, &mut missing);
        let deployment = required(&lookup, ENV_DEPLOYMENT, &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        let api_version = lookup(ENV_API_VERSION)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        Ok(Self {
            endpoint: endpoint.unwrap_or_default(),
            api_key: ApiKey::new(api_key.unwrap_or_default()),
            deployment: deployment.unwrap_or_default(),
            api_version,
        })
    }
}

/// Fetch a required variable, recording its name when missing or empty.
fn required(
    lookup: impl Fn(&str) -> Option<String>,
    name: &str,
    missing: &mut Vec<String>,
) -> Option<String> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Some(value),
        _ => {
            missing.push(name.to_string());
            None
        }
    }
}

//! LLM: multi-provider adapter for structured image analysis.
//!
//! DESIGN
//! ======
//! Configuration comes from environment variables, read once at startup.
//! The `LlmClient` enum dispatches to Gemini or an OpenAI-compatible API
//! based on `LLM_PROVIDER`. Callers depend on the [`VisionModel`] trait so
//! tests can swap in a mock.

pub mod config;
pub mod gemini;
pub mod openai;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::{ImagePayload, LlmError, VisionModel, VisionRequest};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client that dispatches to either Gemini or `OpenAI`.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: LlmProvider,
    temperature: f32,
}

enum LlmProvider {
    Gemini(gemini::GeminiClient),
    OpenAi(openai::OpenAiClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables. See [`LlmConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing, a value fails to parse, or
    /// the HTTP client fails to build.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = match config.provider {
            LlmProviderKind::Gemini => LlmProvider::Gemini(gemini::GeminiClient::new(
                config.api_key,
                config.model,
                config.base_url,
                config.timeouts,
            )?),
            LlmProviderKind::OpenAi => LlmProvider::OpenAi(openai::OpenAiClient::new(
                config.api_key,
                config.model,
                config.base_url,
                config.timeouts,
            )?),
        };
        Ok(Self { inner, temperature: config.temperature })
    }

    /// Sampling temperature every analysis request should use.
    #[must_use]
    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

#[async_trait::async_trait]
impl VisionModel for LlmClient {
    fn model(&self) -> &str {
        match &self.inner {
            LlmProvider::Gemini(c) => c.model(),
            LlmProvider::OpenAi(c) => c.model(),
        }
    }

    async fn generate(&self, request: &VisionRequest<'_>) -> Result<String, LlmError> {
        match &self.inner {
            LlmProvider::Gemini(c) => c.generate(request).await,
            LlmProvider::OpenAi(c) => c.generate(request).await,
        }
    }
}

//! Analysis gateway: image in, provider call, schema-checked result out.
//!
//! DESIGN
//! ======
//! Every analysis kind is the same round trip: one image, one fixed
//! instruction, one strict output schema, one outbound request. The kinds
//! differ only in prompt, schema, post-parse normalisation, and what happens
//! when the provider is unavailable:
//!
//! - blood slide and urine degrade: no credential yields a fixed fallback
//!   after a short delay, and any provider or parse failure yields a fixed
//!   error-shaped result. Their methods cannot fail.
//! - skin and X-ray fail: no credential, provider failure, or parse failure
//!   is returned as an [`AnalysisError`] for the caller to handle.
//!
//! No retries, no caching, no rate limiting.

pub mod blood;
pub(crate) mod schema;
pub mod skin;
pub mod urine;
pub mod xray;

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::llm::config::{DEFAULT_TEMPERATURE, env_parse_u64};
use crate::llm::{ImagePayload, LlmClient, LlmError, VisionModel, VisionRequest};

pub use blood::BloodResult;
pub use skin::{SkinResult, SkinSeverity};
pub use urine::{HcgReading, UrineFinding, UrineMode, UrineSeverity};
pub use xray::XrayResult;

pub const DEFAULT_FALLBACK_DELAY_MS: u64 = 2000;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("API Key missing")]
    NotConfigured,
    #[error("provider error: {0}")]
    Provider(#[from] LlmError),
    #[error("response did not match schema: {0}")]
    Schema(String),
}

impl ErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotConfigured => "E_NOT_CONFIGURED",
            Self::Provider(_) => "E_PROVIDER",
            Self::Schema(_) => "E_SCHEMA",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Provider(e) if e.retryable())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    BloodSlide,
    Urine,
    Pregnancy,
    Skin,
    Xray,
}

impl AnalysisKind {
    /// Stable snake-case name; also used as the provider-side schema name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::BloodSlide => "blood_slide",
            Self::Urine => "urine",
            Self::Pregnancy => "hcg_strip",
            Self::Skin => "skin",
            Self::Xray => "xray",
        }
    }
}

/// Per-kind prompt, schema, and post-parse step.
pub(crate) trait KindSpec {
    type Output: DeserializeOwned;

    fn kind(&self) -> AnalysisKind;
    fn instruction(&self) -> &'static str;
    fn schema(&self) -> Value;

    /// Normalise and check invariants serde cannot express. An `Err` is a
    /// schema violation.
    fn finish(&self, raw: Self::Output) -> Result<Self::Output, String> {
        Ok(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GatewayConfig {
    pub temperature: f32,
    /// How long an offline fallback takes to resolve.
    pub fallback_delay: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { temperature: DEFAULT_TEMPERATURE, fallback_delay: Duration::from_millis(DEFAULT_FALLBACK_DELAY_MS) }
    }
}

impl GatewayConfig {
    /// Reads `QUICKMED_FALLBACK_DELAY_MS` (default 2000). Temperature comes
    /// from the LLM config when a client exists.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            fallback_delay: Duration::from_millis(env_parse_u64(
                "QUICKMED_FALLBACK_DELAY_MS",
                DEFAULT_FALLBACK_DELAY_MS,
            )),
            ..Self::default()
        }
    }
}

// =============================================================================
// GATEWAY
// =============================================================================

/// The single entry point for image analysis.
///
/// Built once at startup; `model` is `None` when no credential is configured.
pub struct AnalysisGateway {
    model: Option<Arc<dyn VisionModel>>,
    config: GatewayConfig,
}

impl AnalysisGateway {
    #[must_use]
    pub fn new(model: Option<Arc<dyn VisionModel>>, config: GatewayConfig) -> Self {
        Self { model, config }
    }

    /// Build from `LLM_*` and `QUICKMED_*` env vars.
    ///
    /// # Errors
    ///
    /// Same as [`AnalysisGateway::from_client`].
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_client(LlmClient::from_env(), GatewayConfig::from_env())
    }

    /// Only a missing credential yields an offline gateway.
    ///
    /// # Errors
    ///
    /// Any other client error ([`LlmError::ConfigParse`],
    /// [`LlmError::HttpClientBuild`]) is returned unchanged.
    pub fn from_client(client: Result<LlmClient, LlmError>, config: GatewayConfig) -> Result<Self, LlmError> {
        match client {
            Ok(client) => {
                let config = GatewayConfig { temperature: client.temperature(), ..config };
                let model: Arc<dyn VisionModel> = Arc::new(client);
                Ok(Self::new(Some(model), config))
            }
            Err(LlmError::MissingApiKey { var }) => {
                warn!(var = %var, "analysis: no API key configured, running offline");
                Ok(Self::new(None, config))
            }
            Err(e) => Err(e),
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    /// Blood typing slide. Never fails: see module docs.
    pub async fn analyze_blood_slide(&self, image: &ImagePayload) -> BloodResult {
        self.degrading(&blood::BloodSlide, image, BloodResult::fallback, BloodResult::failed)
            .await
    }

    /// Urine dipstick (`Standard`) or HCG strip (`Pregnancy`). Never fails.
    pub async fn analyze_urine(&self, image: &ImagePayload, mode: UrineMode) -> Vec<UrineFinding> {
        self.degrading(&urine::Urine(mode), image, UrineFinding::fallback, UrineFinding::failed)
            .await
    }

    /// Skin lesion.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::NotConfigured`] without a credential, otherwise
    /// [`AnalysisError::Provider`] or [`AnalysisError::Schema`] on failure.
    pub async fn analyze_skin(&self, image: &ImagePayload) -> Result<SkinResult, AnalysisError> {
        self.strict(&skin::Skin, image).await
    }

    /// X-ray.
    ///
    /// # Errors
    ///
    /// Same policy as [`AnalysisGateway::analyze_skin`].
    pub async fn analyze_xray(&self, image: &ImagePayload) -> Result<XrayResult, AnalysisError> {
        self.strict(&xray::Xray, image).await
    }

    async fn degrading<K: KindSpec>(
        &self,
        spec: &K,
        image: &ImagePayload,
        fallback: fn() -> K::Output,
        failed: fn() -> K::Output,
    ) -> K::Output {
        let kind = spec.kind().name();
        if !self.is_configured() {
            warn!(kind, "analysis: no API key configured, returning fallback");
            if !self.config.fallback_delay.is_zero() {
                tokio::time::sleep(self.config.fallback_delay).await;
            }
            return fallback();
        }
        match self.run(spec, image).await {
            Ok(result) => result,
            Err(e) => {
                error!(kind, error = %e, code = e.error_code(), "analysis: failed, returning error result");
                failed()
            }
        }
    }

    async fn strict<K: KindSpec>(&self, spec: &K, image: &ImagePayload) -> Result<K::Output, AnalysisError> {
        let result = self.run(spec, image).await;
        if let Err(e) = &result {
            error!(kind = spec.kind().name(), error = %e, code = e.error_code(), "analysis: failed");
        }
        result
    }

    /// The shared round trip: exactly one provider call, then parse and finish.
    async fn run<K: KindSpec>(&self, spec: &K, image: &ImagePayload) -> Result<K::Output, AnalysisError> {
        let model = self.model.as_ref().ok_or(AnalysisError::NotConfigured)?;
        let kind = spec.kind().name();
        let request_id = Uuid::new_v4();
        let schema = spec.schema();
        let request = VisionRequest {
            name: kind,
            image,
            instruction: spec.instruction(),
            schema: &schema,
            temperature: self.config.temperature,
        };

        info!(kind, %request_id, model = model.model(), image_bytes = image.data_base64.len(), "analysis: request");
        let started = Instant::now();
        let text = model.generate(&request).await?;

        let raw: K::Output = schema::parse(&text).map_err(AnalysisError::Schema)?;
        let result = spec.finish(raw).map_err(AnalysisError::Schema)?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(kind, %request_id, elapsed_ms, "analysis: done");
        Ok(result)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

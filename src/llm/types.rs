//! LLM types: provider-neutral vision request types and errors.
//!
//! Shared by the Gemini and `OpenAI` clients. A request is always one image,
//! one instruction, and one output schema; the answer is the model's raw
//! JSON text, which the analysis layer parses.

use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The provider answered but produced no text.
    #[error("no response text from model")]
    EmptyResponse,

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The image could not be read from disk.
    #[error("image read failed: {0}")]
    ImageRead(String),
}

impl ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::EmptyResponse => "E_EMPTY_RESPONSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::ImageRead(_) => "E_IMAGE_READ",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// IMAGE PAYLOAD
// =============================================================================

/// An image ready to be sent inline to a provider.
///
/// The gateway never inspects the bytes: format, size and content are the
/// caller's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub mime_type: String,
    pub data_base64: String,
}

impl ImagePayload {
    /// Encode raw bytes with the standard base64 alphabet.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data_base64: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Accept a browser-style `data:<mime>;base64,<data>` URL, or bare base64.
    ///
    /// Bare input is assumed to be JPEG.
    #[must_use]
    pub fn from_data_url(url: &str) -> Self {
        let Some(rest) = url.strip_prefix("data:") else {
            return Self { mime_type: DEFAULT_IMAGE_MIME.into(), data_base64: url.trim().to_string() };
        };
        match rest.split_once(',') {
            Some((header, data)) => {
                let mime = header.trim_end_matches(";base64");
                let mime = if mime.is_empty() { DEFAULT_IMAGE_MIME } else { mime };
                Self { mime_type: mime.to_string(), data_base64: data.trim().to_string() }
            }
            None => Self { mime_type: DEFAULT_IMAGE_MIME.into(), data_base64: String::new() },
        }
    }

    /// Read an image file, guessing the MIME type from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ImageRead`] if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, LlmError> {
        let bytes = std::fs::read(path).map_err(|e| LlmError::ImageRead(format!("{}: {e}", path.display())))?;
        Ok(Self::from_bytes(&bytes, mime_for_path(path)))
    }

    /// `data:` URL form, as the `OpenAI` image part expects.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data_base64)
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => DEFAULT_IMAGE_MIME,
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// One structured-output vision request.
#[derive(Debug, Clone)]
pub struct VisionRequest<'a> {
    /// Short name used for schema titles and logging (e.g. `"blood_slide"`).
    pub name: &'a str,
    pub image: &'a ImagePayload,
    pub instruction: &'a str,
    /// JSON Schema for the answer. Objects carry `additionalProperties: false`.
    pub schema: &'a serde_json::Value,
    pub temperature: f32,
}

// =============================================================================
// VISION MODEL TRAIT
// =============================================================================

/// Provider-neutral async trait for structured vision calls. Enables mocking in tests.
#[async_trait::async_trait]
pub trait VisionModel: Send + Sync {
    /// Configured model name, for logging.
    fn model(&self) -> &str;

    /// Send one request and return the model's JSON text.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, the provider answers with
    /// a non-success status, or the response carries no text.
    async fn generate(&self, request: &VisionRequest<'_>) -> Result<String, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

//! OpenAI-compatible chat completions client.
//!
//! Sends the image as a `data:` URL part and asks for strict `json_schema`
//! output. Strict mode wants an object at the root, so array schemas are
//! wrapped in `{ "result": ... }` on the way out and unwrapped on the way back.

use serde::Serialize;
use serde_json::{Value, json};
use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{LlmError, VisionModel, VisionRequest};

const WRAP_FIELD: &str = "result";

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(api_key: String, model: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url, model })
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl VisionModel for OpenAiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &VisionRequest<'_>) -> Result<String, LlmError> {
        let (schema, wrapped) = wrap_schema(request.schema);
        let msgs = build_messages(request);
        let body = CcRequest {
            model: &self.model,
            temperature: request.temperature,
            messages: &msgs,
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaSpec { name: request.name, schema: &schema, strict: true },
            },
        };
        let text = self.send_json("/chat/completions", &body).await?;
        let content = parse_chat_completions_response(&text)?;
        if wrapped { unwrap_result(&content) } else { Ok(content) }
    }
}

// =============================================================================
// CHAT COMPLETIONS WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: &'a [CcMessage<'a>],
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct CcMessage<'a> {
    role: &'static str,
    content: Vec<CcPart<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum CcPart<'a> {
    #[serde(rename = "text")]
    Text { text: &'a str },

    #[serde(rename = "image_url")]
    ImageUrl { image_url: CcImageUrl },
}

#[derive(Serialize)]
struct CcImageUrl {
    url: String,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaSpec<'a>,
}

#[derive(Serialize)]
struct JsonSchemaSpec<'a> {
    name: &'a str,
    schema: &'a Value,
    strict: bool,
}

fn build_messages<'a>(request: &'a VisionRequest<'a>) -> Vec<CcMessage<'a>> {
    vec![CcMessage {
        role: "user",
        content: vec![
            CcPart::Text { text: request.instruction },
            CcPart::ImageUrl { image_url: CcImageUrl { url: request.image.to_data_url() } },
        ],
    }]
}

// =============================================================================
// SCHEMA WRAPPING
// =============================================================================

/// Return the schema to send and whether it was wrapped.
pub(crate) fn wrap_schema(schema: &Value) -> (Value, bool) {
    if schema.get("type").and_then(Value::as_str) == Some("object") {
        return (schema.clone(), false);
    }
    let wrapped = json!({
        "type": "object",
        "properties": { WRAP_FIELD: schema },
        "required": [WRAP_FIELD],
        "additionalProperties": false
    });
    (wrapped, true)
}

pub(crate) fn unwrap_result(content: &str) -> Result<String, LlmError> {
    let root: Value = serde_json::from_str(content).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let inner = root
        .get(WRAP_FIELD)
        .ok_or_else(|| LlmError::ApiParse(format!("wrapped response missing `{WRAP_FIELD}`")))?;
    serde_json::to_string(inner).map_err(|e| LlmError::ApiParse(e.to_string()))
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

pub(crate) fn parse_chat_completions_response(json_text: &str) -> Result<String, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("chat_completions: missing choices[0]".to_string()));
    };
    let message = choice.get("message").cloned().unwrap_or(Value::Null);

    if let Some(refusal) = message.get("refusal").and_then(Value::as_str) {
        if !refusal.is_empty() {
            return Err(LlmError::ApiParse(format!("model refused: {refusal}")));
        }
    }

    match message.get("content").and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => Err(LlmError::EmptyResponse),
    }
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;

// ABOUTME: Gemini generateContent client for the script-deck application
// ABOUTME: Defines the text and image generator seams used by the pipeline

use crate::errors::{DeckError, Result};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{json, Value};
use std::time::Duration;

/// Gemini API configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub timeout: Duration,
}

/// Image attached inline to a text-generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data_base64: String,
}

/// A text-generation request whose answer must follow `response_schema`.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    pub prompt: String,
    pub attachments: Vec<InlineImage>,
    pub response_schema: Value,
}

/// A generated image as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Produces the JSON text answering a structured request.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_structured(&self, request: &StructuredRequest) -> Result<String>;
}

/// Produces one image for a prompt. `Ok(None)` means the service answered
/// without an image payload.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: &str,
    ) -> Result<Option<GeneratedImage>>;
}

/// Gemini client.
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DeckError::FetchError)?;
        Ok(Self { config, http })
    }

    async fn generate_content(&self, model: &str, request: &Value) -> Result<Value> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, model
        );
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .headers(build_headers(&self.config.api_key)?)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(DeckError::from_status(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| DeckError::ApiError {
            status: status.as_u16(),
            message: format!("Response was not valid JSON: {}", e),
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_structured(&self, request: &StructuredRequest) -> Result<String> {
        info!(
            "Requesting slide plan from {} with {} attachments",
            self.config.text_model,
            request.attachments.len()
        );
        let body = build_structured_request(request);
        let value = self
            .generate_content(&self.config.text_model, &body)
            .await?;
        extract_text(&value)
            .ok_or_else(|| DeckError::PlanParseError("Response contained no text".to_string()))
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: &str,
    ) -> Result<Option<GeneratedImage>> {
        info!("Requesting image from {}", self.config.image_model);
        let body = build_image_request(prompt, aspect_ratio);
        let value = self
            .generate_content(&self.config.image_model, &body)
            .await?;
        extract_first_image(&value)
    }
}

pub fn build_structured_request(request: &StructuredRequest) -> Value {
    let mut parts = vec![json!({ "text": request.prompt })];
    parts.extend(request.attachments.iter().map(|image| {
        json!({
            "inlineData": {
                "mimeType": image.mime_type,
                "data": image.data_base64,
            }
        })
    }));

    json!({
        "contents": [{
            "role": "user",
            "parts": parts,
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": request.response_schema,
        },
    })
}

pub fn build_image_request(prompt: &str, aspect_ratio: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }],
        }],
        "generationConfig": {
            "imageConfig": { "aspectRatio": aspect_ratio },
        },
    })
}

fn first_candidate_parts(value: &Value) -> Option<&Vec<Value>> {
    value
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()
}

/// Concatenated text parts of the first candidate.
pub fn extract_text(value: &Value) -> Option<String> {
    let text: String = first_candidate_parts(value)?
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// First inline image of the first candidate.
pub fn extract_first_image(value: &Value) -> Result<Option<GeneratedImage>> {
    let Some(parts) = first_candidate_parts(value) else {
        return Ok(None);
    };
    let Some(inline) = parts
        .iter()
        .find_map(|part| part.get("inlineData").or_else(|| part.get("inline_data")))
    else {
        return Ok(None);
    };

    let mime_type = inline
        .get("mimeType")
        .or_else(|| inline.get("mime_type"))
        .and_then(Value::as_str)
        .unwrap_or("image/png")
        .to_string();
    let data_b64 = inline
        .get("data")
        .and_then(Value::as_str)
        .ok_or_else(|| DeckError::ImageError("Inline image is missing its data".to_string()))?;
    let data = STANDARD
        .decode(data_b64)
        .map_err(|e| DeckError::ImageError(format!("Invalid base64 image data: {}", e)))?;

    Ok(Some(GeneratedImage { mime_type, data }))
}

fn build_headers(api_key: &str) -> Result<HeaderMap> {
    let key = HeaderValue::from_str(api_key).map_err(|_| {
        DeckError::ConfigError("API key contains characters not allowed in a header".to_string())
    })?;
    let mut headers = HeaderMap::new();
    headers.insert("x-goog-api-key", key);
    headers.insert("accept", HeaderValue::from_static("application/json"));
    Ok(headers)
}

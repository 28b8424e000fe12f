//! Hosted text model client.
//!
//! The [`TextModel`] trait is the seam between the documentation pipeline and
//! the network: the real client talks to a Gemini `generateContent` endpoint,
//! tests plug in a mock, and [`crate::cache::CachedModel`] decorates any
//! implementation with the on-disk prompt cache.

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,
    #[error("request to model endpoint failed")]
    Http(#[from] reqwest::Error),
    #[error("model endpoint returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("model returned no text candidates")]
    EmptyResponse,
}

/// Trait for generating text from a prompt. Implemented by the real API
/// client and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Send one prompt and return the model's text response.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

/// JSON client for a Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client from loaded settings. Fails when no API key is
    /// configured; the endpoint defaults to the Vertex AI URL derived from
    /// project and location unless an explicit override is set.
    pub fn new(settings: &Settings) -> Result<Self, LlmError> {
        let api_key = settings.api_key.clone().ok_or(LlmError::MissingApiKey)?;

        let base = match &settings.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!(
                "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/publishers/google/models",
                location = settings.location,
                project = settings.project_id,
            ),
        };
        let url = format!("{}/{}:generateContent", base, settings.model);

        info!(url = %url, model = %settings.model, "Constructed text model client");
        Ok(GeminiClient {
            http: reqwest::Client::new(),
            url,
            api_key,
        })
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        info!(prompt_chars = prompt.len(), "PROMPT sent to model");
        debug!(prompt = %prompt, "Full prompt");

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to decode response body>"));
            error!(status = %status, body = %body, "Model endpoint returned error");
            return Err(LlmError::Api { status, body });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(LlmError::EmptyResponse)?;

        info!(response_chars = text.len(), "RESPONSE received from model");
        debug!(response = %text, "Full response");
        Ok(text)
    }
}

/// Gemini client — the single point of entry for all model calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// The dispatcher reaches it through the [`AnalysisModel`] trait.
///
/// Model: gemini-2.5-flash (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::analysis::dispatcher::AnalysisModel;
use crate::rasterizer::RasterizedDocument;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all analysis calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiPart<'a> {
    Text { text: &'a str },
    InlineData { inline_data: GeminiInlineData<'a> },
}

#[derive(Debug, Serialize)]
struct GeminiInlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiApiError>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiApiError,
}

/// HTTP client for the Gemini `generateContent` endpoint.
///
/// Every call is a single atomic round trip: no streaming, no partial
/// results, no retry or backoff. A failure surfaces to the caller and
/// aborts that request only.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    async fn generate_content(&self, parts: Vec<GeminiPart<'_>>) -> Result<String, LlmError> {
        let request_body = GeminiRequest {
            contents: vec![GeminiContent { parts }],
        };

        let url = format!(
            "{GEMINI_API_BASE}/{MODEL}:generateContent?key={}",
            self.api_key
        );

        let response = self.client.post(&url).json(&request_body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the API's structured error message
            let message = serde_json::from_str::<GeminiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let gemini_response: GeminiResponse = response.json().await?;

        if let Some(error) = gemini_response.error {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error.message,
            });
        }

        let text = gemini_response
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(LlmError::EmptyContent)?;

        debug!("Gemini call succeeded ({} reply bytes)", text.len());

        Ok(text)
    }
}

#[async_trait]
impl AnalysisModel for GeminiClient {
    /// Sends exactly three parts, in this order: the instruction text, the
    /// rasterized document, the job description. All verbatim — nothing is
    /// summarized or rewritten before transmission.
    async fn generate(
        &self,
        instruction: &str,
        document: &RasterizedDocument,
        job_description: &str,
    ) -> Result<String, LlmError> {
        let parts = vec![
            GeminiPart::Text { text: instruction },
            GeminiPart::InlineData {
                inline_data: GeminiInlineData {
                    mime_type: document.mime_type,
                    data: &document.payload,
                },
            },
            GeminiPart::Text {
                text: job_description,
            },
        ];

        self.generate_content(parts).await
    }
}

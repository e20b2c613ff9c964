//! Generation backend
//!
//! The persona comes from a text-generation API. The orchestrator only sees
//! the [`Generator`] trait, so tests can swap in a stub.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;

/// Turns a request text into generated text
pub trait Generator {
    fn generate(&self, model: &str, request: &str) -> Result<String>;
}

/// Client for the Gemini `generateContent` endpoint
pub struct GeminiClient {
    http: Client,
    api_base: String,
    api_key: Option<String>,
    key_env: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a client; a missing key only fails when a request is made
    pub fn new(
        api_base: impl Into<String>,
        api_key: Option<String>,
        key_env: impl Into<String>,
    ) -> Result<Self> {
        // No client-side timeout
        let http = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            api_base: api_base.into(),
            api_key,
            key_env: key_env.into(),
        })
    }

    /// Create a client from configuration and the environment
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_base, config.api_key(), &config.api_key_env)
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            model
        )
    }
}

impl Generator for GeminiClient {
    fn generate(&self, model: &str, request: &str) -> Result<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            bail!(
                "API key not set (export {} or add it to .env)",
                self.key_env
            );
        };

        let url = self.endpoint(model);
        tracing::debug!(%url, model, "sending generation request");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request_body(request))
            .send()
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            bail!("API error (status {}): {}", status, body.trim());
        }

        let parsed: GenerateResponse = response
            .json()
            .context("Failed to parse generation response")?;

        extract_text(parsed).context("Response contained no text")
    }
}

fn request_body(request: &str) -> GenerateRequest<'_> {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![RequestPart { text: request }],
        }],
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(response: GenerateResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

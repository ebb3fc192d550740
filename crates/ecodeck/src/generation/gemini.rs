use std::time::Instant;

use serde_json::Value;

use super::error::{GenerationError, Result};
use super::{SlideSource, parse_slides, prompt};
use crate::config::{API_KEY_ENV_VARS, Config};
use crate::slide::Presentation;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    agent: ureq::Agent,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, endpoint: String) -> Self {
        // Error statuses are read as JSON so the service's own message can be shown.
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            api_key,
            model,
            endpoint,
        }
    }

    /// Build a client from configuration, failing early when no key is available.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            anyhow::anyhow!(
                "No Gemini API key found.\n\
                 \n\
                 Run `ecodeck config init`, or set one of: {}",
                API_KEY_ENV_VARS.join(", ")
            )
        })?;
        Ok(Self::new(
            api_key,
            config.model().to_string(),
            config.endpoint().to_string(),
        ))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

impl SlideSource for GeminiClient {
    fn generate(&self) -> Result<Presentation> {
        let url = self.url();
        log::debug!("requesting slides from {url}");
        let started = Instant::now();

        let mut response = self
            .agent
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .send_json(prompt::request_body())
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        let raw = response
            .body_mut()
            .read_to_string()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = service_error_message(&raw)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| format!("generation service returned status {status}"));
            log::warn!("generation request failed with {status}: {message}");
            return Err(GenerationError::Service(message));
        }

        let envelope: Value = serde_json::from_str(&raw).map_err(|e| {
            GenerationError::Transport(format!("unreadable generation response: {e}"))
        })?;
        let text = extract_text(&envelope).ok_or(GenerationError::EmptyResponse)?;
        let slides = parse_slides(&text)?;

        log::info!(
            "generated {} slides in {:.1}s",
            slides.len(),
            started.elapsed().as_secs_f32()
        );
        Ok(slides)
    }
}

/// Concatenated text parts of the first candidate, if any non-empty text exists.
fn extract_text(envelope: &Value) -> Option<String> {
    let parts = envelope["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();
    if text.is_empty() { None } else { Some(text) }
}

/// The `error.message` field of a Google API error body.
fn service_error_message(raw: &str) -> Option<String> {
    let body: Value = serde_json::from_str(raw).ok()?;
    body["error"]["message"]
        .as_str()
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

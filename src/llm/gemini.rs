//! Google Gemini `generateContent` provider.
//!
//! Direct REST integration with the Generative Language API. The character
//! engine sends one fully-assembled prompt per turn, so this client speaks
//! the single-turn subset of the API: one user content, an optional system
//! instruction, and a generation config.
//!
//! # Authentication
//!
//! Uses `GOOGLE_API_KEY` or `GEMINI_API_KEY` when no key is supplied
//! explicitly. A missing key surfaces as
//! [`GenerationError::MissingApiKey`] at call time, not at construction, so
//! a server can boot without credentials.

use async_trait::async_trait;
use serde_json::Value;

use crate::llm::TextGeneration;
use crate::utilities::errors::GenerationError;

/// Request timeout for one generation call.
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Retries after the initial attempt, for 429s and server errors.
const MAX_RETRIES: u32 = 2;

/// Gemini REST client implementing [`TextGeneration`].
#[derive(Debug, Clone)]
pub struct GeminiClient {
    model: String,
    api_key: Option<String>,
    /// Sampling temperature.
    pub temperature: Option<f64>,
    /// Nucleus sampling parameter.
    pub top_p: Option<f64>,
    /// Maximum output tokens.
    pub max_output_tokens: Option<u32>,
    /// Standing system instruction sent with every request, if any.
    pub system_instruction: Option<String>,
}

impl GeminiClient {
    /// Create a client for `model`, falling back to the environment for the
    /// API key.
    pub fn new(model: impl Into<String>, api_key: Option<String>) -> Self {
        let api_key = api_key
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok());

        Self {
            model: model.into(),
            api_key,
            temperature: None,
            top_p: None,
            max_output_tokens: None,
            system_instruction: None,
        }
    }

    /// Set a standing system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// The `generateContent` endpoint for this model.
    fn api_endpoint(&self) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        )
    }

    /// Build the generation config object from the configured sampling
    /// parameters.
    fn generation_config(&self) -> Value {
        let mut config = serde_json::Map::new();
        if let Some(temperature) = self.temperature {
            config.insert("temperature".to_string(), serde_json::json!(temperature));
        }
        if let Some(top_p) = self.top_p {
            config.insert("topP".to_string(), serde_json::json!(top_p));
        }
        if let Some(max_tokens) = self.max_output_tokens {
            config.insert("maxOutputTokens".to_string(), serde_json::json!(max_tokens));
        }
        Value::Object(config)
    }

    /// Build the complete request body for one prompt.
    fn build_request_body(&self, prompt: &str) -> Value {
        let mut body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
            "generationConfig": self.generation_config(),
        });

        if let Some(ref instruction) = self.system_instruction {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": instruction }]
            });
        }

        body
    }

    /// Extract the reply text from a `generateContent` response.
    fn parse_response(response: &Value) -> Result<String, GenerationError> {
        if let Some(error) = response.get("error") {
            let status = error.get("code").and_then(|c| c.as_u64()).unwrap_or(0) as u16;
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown backend error")
                .to_string();
            return Err(GenerationError::Api { status, message });
        }

        let parts = response
            .get("candidates")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|p| p.as_array())
            .ok_or_else(|| {
                GenerationError::MalformedResponse(
                    "no candidates[0].content.parts in response".to_string(),
                )
            })?;

        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect();

        if text.is_empty() {
            return Err(GenerationError::MalformedResponse(
                "candidate contained no text parts".to_string(),
            ));
        }
        Ok(text)
    }

    /// Log token usage from a response, when present.
    fn log_token_usage(response: &Value) {
        if let Some(usage) = response.get("usageMetadata") {
            let prompt = usage
                .get("promptTokenCount")
                .and_then(|v| v.as_i64())
                .unwrap_or(0);
            let completion = usage
                .get("candidatesTokenCount")
                .and_then(|v| v.as_i64())
                .unwrap_or(0);
            log::debug!(
                "gemini usage: prompt={} completion={} total={}",
                prompt,
                completion,
                prompt + completion,
            );
        }
    }
}

#[async_trait]
impl TextGeneration for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingApiKey)?;

        let body = self.build_request_body(prompt);
        let endpoint = self.api_endpoint();

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        // Retry transient failures with exponential backoff; client errors
        // surface immediately.
        let mut last_error = String::new();
        let mut retry_delay = std::time::Duration::from_secs(1);

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                log::warn!("gemini retry attempt {} after {:?}", attempt, retry_delay);
                tokio::time::sleep(retry_delay).await;
                retry_delay *= 2;
            }

            let response = match client
                .post(&endpoint)
                .header("content-type", "application/json")
                .query(&[("key", api_key)])
                .json(&body)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    last_error = e.to_string();
                    continue;
                }
            };

            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                last_error = "rate limited (429)".to_string();
                continue;
            }
            if status.is_server_error() {
                last_error = format!("server error: {}", status);
                continue;
            }

            let text = response.text().await?;

            if status.is_client_error() {
                return Err(GenerationError::Api {
                    status: status.as_u16(),
                    message: text,
                });
            }

            let json: Value = serde_json::from_str(&text).map_err(|e| {
                GenerationError::MalformedResponse(format!(
                    "{} — body: {}",
                    e,
                    &text[..text.len().min(500)]
                ))
            })?;

            Self::log_token_usage(&json);
            return Self::parse_response(&json);
        }

        Err(GenerationError::RetriesExhausted(last_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        GeminiClient::new("gemini-1.5-pro-latest", Some("test-key".to_string()))
    }

    #[test]
    fn test_endpoint_embeds_model() {
        assert_eq!(
            client().api_endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro-latest:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let mut c = client();
        c.temperature = Some(0.9);
        c.max_output_tokens = Some(512);

        let body = c.build_request_body("stay in character");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "stay in character");
        assert_eq!(body["generationConfig"]["temperature"], 0.9);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 512);
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_system_instruction_included_when_set() {
        let c = client().with_system_instruction("You are Luna.");
        let body = c.build_request_body("hi");
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "You are Luna."
        );
    }

    #[test]
    fn test_parse_response_joins_text_parts() {
        let response = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hey" }, { "text": " there!" }] }
            }]
        });
        assert_eq!(GeminiClient::parse_response(&response).unwrap(), "Hey there!");
    }

    #[test]
    fn test_parse_response_surfaces_api_error() {
        let response = serde_json::json!({
            "error": { "code": 403, "message": "quota exceeded" }
        });
        let err = GeminiClient::parse_response(&response).unwrap_err();
        match err {
            GenerationError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "quota exceeded");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_response_rejects_missing_candidates() {
        let response = serde_json::json!({ "candidates": [] });
        assert!(matches!(
            GeminiClient::parse_response(&response),
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_at_call_time() {
        let c = GeminiClient {
            api_key: None,
            ..client()
        };
        assert!(matches!(
            c.generate("hi").await,
            Err(GenerationError::MissingApiKey)
        ));
    }
}

//! Google Generative Language API client
//!
//! Thin wrapper over the `generateContent` endpoint. Conversation history
//! is forwarded as ordered contents with `user`/`model` roles; no state is
//! kept between calls.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{ChatMessage, ChatRole};

use crate::error::{AppError, AppResult};

/// Generative Language API client
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_endpoint: String,
    api_key: String,
    model: String,
}

/// One turn of content in a generateContent request
#[derive(Debug, Clone, Serialize)]
pub struct GeminiContent {
    pub role: &'static str,
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeminiPart {
    pub text: String,
}

impl GeminiContent {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user",
            parts: vec![GeminiPart { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model",
            parts: vec![GeminiPart { text: text.into() }],
        }
    }
}

impl From<&ChatMessage> for GeminiContent {
    fn from(message: &ChatMessage) -> Self {
        match message.role {
            ChatRole::User => GeminiContent::user(message.content.clone()),
            ChatRole::Assistant => GeminiContent::model(message.content.clone()),
        }
    }
}

/// Sampling configuration for multi-turn chat
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: 1000,
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Create a new GeminiClient
    pub fn new(api_endpoint: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_endpoint,
            api_key,
            model,
        }
    }

    /// Generate text from a single prompt
    pub async fn generate(&self, prompt: impl Into<String>) -> AppResult<String> {
        self.generate_with(vec![GeminiContent::user(prompt)], None)
            .await
    }

    /// Generate text from ordered contents, optionally with a sampling
    /// configuration
    pub async fn generate_with(
        &self,
        contents: Vec<GeminiContent>,
        generation_config: Option<GenerationConfig>,
    ) -> AppResult<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_endpoint, self.model, self.api_key
        );

        let request = GenerateContentRequest {
            contents,
            generation_config,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Assistant(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Assistant(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::Assistant(format!("Failed to parse response: {}", e)))?;

        let text = result
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AppError::Assistant("Empty response from model".to_string()));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_history_maps_to_gemini_roles() {
        let history = [
            ChatMessage::user("How much water does my field need?"),
            ChatMessage::assistant("Around 25mm per session."),
        ];
        let contents: Vec<GeminiContent> = history.iter().map(GeminiContent::from).collect();
        assert_eq!(contents[0].role, "user");
        assert_eq!(contents[1].role, "model");
    }

    #[test]
    fn generation_config_serializes_camel_case() {
        let json = serde_json::to_value(GenerationConfig::default()).unwrap();
        assert_eq!(json["maxOutputTokens"], 1000);
        assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-9);
    }
}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::interface::{check_input, Translator};
use crate::error::TranslationError;

pub const TEMPERATURE: f32 = 0.3;
pub const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Chat-completion translator for OpenAI-compatible APIs.
pub struct OpenAiTranslator {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiTranslator {
    /// Fails with [`TranslationError::Configuration`] when no API key is supplied.
    pub fn new(
        client: Client,
        base_url: String,
        api_key: Option<&str>,
        model: String,
    ) -> Result<Self, TranslationError> {
        let api_key = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                TranslationError::Configuration(
                    "OPENAI_API_KEY environment variable is not set".to_string(),
                )
            })?;

        info!(
            "Initialized OpenAiTranslator: model={}, base_url={}",
            model, base_url
        );
        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
            model,
        })
    }

    fn system_prompt(language_name: &str) -> String {
        format!(
            "You are a translator. Translate the following text to {}. \
             Only respond with the translation, nothing else.",
            language_name
        )
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslationError> {
        let (_, language) = check_input(text, target_lang)?;

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Self::system_prompt(language.name),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!("OpenAI translate: model={}, target={}", self.model, language.code);

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                TranslationError::ProviderFailure(format!("OpenAI request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::ProviderFailure(format!(
                "OpenAI API error: {} - {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            TranslationError::ProviderFailure(format!("Failed to parse OpenAI response: {}", e))
        })?;

        let translation = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if translation.is_empty() {
            return Err(TranslationError::ProviderFailure(
                "Received empty translation from OpenAI".to_string(),
            ));
        }
        Ok(translation)
    }
}

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::interface::{check_input, Translator};
use crate::error::TranslationError;

/// Longest piece of text sent to the backend in one request.
pub const MAX_CHUNK_CHARS: usize = 5000;

/// Google Translate client using the public `translate_a/single` endpoint.
/// The source language is always auto-detected.
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    async fn translate_chunk(&self, chunk: &str, target: &str) -> Result<String, TranslationError> {
        let url = format!("{}/translate_a/single", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target),
                ("dt", "t"),
                ("q", chunk),
            ])
            .send()
            .await
            .map_err(|e| {
                TranslationError::ProviderFailure(format!("Google Translate request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::ProviderFailure(format!(
                "Google Translate error: {} - {}",
                status, body
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            TranslationError::ProviderFailure(format!(
                "Failed to parse Google Translate response: {}",
                e
            ))
        })?;

        extract_translation(&body).ok_or_else(|| {
            TranslationError::ProviderFailure("Unexpected Google Translate response".to_string())
        })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslationError> {
        let (text, language) = check_input(text, target_lang)?;
        let chunks = split_into_chunks(text, MAX_CHUNK_CHARS);
        debug!(
            "Google translate: target={}, chars={}, chunks={}",
            language.google_code(),
            text.chars().count(),
            chunks.len()
        );

        // Whitespace around each chunk is kept so breaks on chunk boundaries survive.
        let mut translation = String::with_capacity(text.len());
        for chunk in &chunks {
            let body = chunk.trim();
            if body.is_empty() {
                translation.push_str(chunk);
                continue;
            }
            let leading = &chunk[..chunk.len() - chunk.trim_start().len()];
            let trailing = &chunk[chunk.trim_end().len()..];
            let part = self.translate_chunk(body, language.google_code()).await?;
            translation.push_str(leading);
            translation.push_str(part.trim());
            translation.push_str(trailing);
        }

        let translation = translation.trim().to_string();
        if translation.is_empty() {
            return Err(TranslationError::ProviderFailure(
                "Received empty translation".to_string(),
            ));
        }
        Ok(translation)
    }
}

/// The response is a nested array; the first element lists `[translated, original, ...]` segments.
fn extract_translation(body: &Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    Some(
        segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect(),
    )
}

/// Split text into pieces of at most `max_chars` characters, breaking on whitespace where possible.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for piece in text.split_inclusive(char::is_whitespace) {
        let piece_len = piece.chars().count();
        if current_len + piece_len > max_chars && current_len > 0 {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if piece_len > max_chars {
            // A single word longer than the limit gets cut mid-word.
            for ch in piece.chars() {
                if current_len == max_chars {
                    chunks.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.push(ch);
                current_len += 1;
            }
        } else {
            current.push_str(piece);
            current_len += piece_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::TranslationError;
use crate::languages::{self, Language};

/// Body of `POST /translate`. Fields stay optional so validation can report what is missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslateRequest {
    pub text: Option<String>,
    pub target_lang: Option<String>,
    /// Any JSON value; only the string `"openai"` selects OpenAI.
    pub service: Option<Value>,
}

impl TranslateRequest {
    pub fn service_kind(&self) -> ServiceKind {
        ServiceKind::from_tag(self.service.as_ref().and_then(Value::as_str))
    }
}

/// Successful translation envelope.
#[derive(Debug, Clone, Serialize)]
pub struct TranslateResponse {
    pub original_text: String,
    pub translated_text: String,
    pub target_language: String,
    pub target_language_name: String,
    pub service: ServiceKind,
}

/// The closed set of translation providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ServiceKind {
    #[serde(rename = "google")]
    Google,
    #[serde(rename = "openai")]
    OpenAi,
}

impl ServiceKind {
    /// Unknown or absent tags fall back to Google.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("openai") => ServiceKind::OpenAi,
            _ => ServiceKind::Google,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Google => "google",
            ServiceKind::OpenAi => "openai",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider that turns text into the target language.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into the language identified by `target_lang`.
    ///
    /// # Returns
    /// The non-empty translated text.
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslationError>;
}

/// Input checks every provider applies before touching the network.
///
/// Returns the trimmed text and the resolved language.
pub fn check_input<'a>(
    text: &'a str,
    target_lang: &str,
) -> Result<(&'a str, &'static Language), TranslationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TranslationError::ProviderFailure(
            "No text provided for translation.".to_string(),
        ));
    }
    let language = languages::find(target_lang).ok_or_else(|| {
        TranslationError::ProviderFailure(format!("Unsupported language code: {}", target_lang))
    })?;
    Ok((text, language))
}

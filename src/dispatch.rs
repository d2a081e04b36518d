use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::TranslationError;
use crate::languages;
use crate::translate::{
    GoogleTranslator, OpenAiTranslator, ServiceKind, TranslateRequest, TranslateResponse,
    Translator,
};

#[derive(Debug, Clone, Serialize)]
pub struct LanguagesResponse {
    pub languages: BTreeMap<String, String>,
    pub services: Vec<ServiceKind>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub services: ServiceHealth,
    pub supported_languages_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealth {
    pub google: bool,
    pub openai: bool,
}

/// A request that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub text: String,
    pub language: &'static languages::Language,
    pub service: ServiceKind,
}

/// Validates translation requests and routes them to the selected provider.
pub struct Dispatcher {
    google: Arc<dyn Translator>,
    openai: Option<Arc<dyn Translator>>,
}

impl Dispatcher {
    pub fn new(google: Arc<dyn Translator>, openai: Option<Arc<dyn Translator>>) -> Self {
        Self { google, openai }
    }

    /// Build both providers from configuration.
    ///
    /// A missing OpenAI key only disables that provider.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        let google: Arc<dyn Translator> = Arc::new(GoogleTranslator::new(
            client.clone(),
            config.google_base_url.clone(),
        ));

        let openai: Option<Arc<dyn Translator>> = match OpenAiTranslator::new(
            client,
            config.openai_base_url.clone(),
            config.openai_api_key(),
            config.openai_model.clone(),
        ) {
            Ok(translator) => Some(Arc::new(translator)),
            Err(e) => {
                warn!("OpenAI translation disabled: {}", e);
                None
            }
        };

        Ok(Self::new(google, openai))
    }

    pub fn is_available(&self, service: ServiceKind) -> bool {
        match service {
            ServiceKind::Google => true,
            ServiceKind::OpenAi => self.openai.is_some(),
        }
    }

    pub fn available_services(&self) -> Vec<ServiceKind> {
        [ServiceKind::Google, ServiceKind::OpenAi]
            .into_iter()
            .filter(|service| self.is_available(*service))
            .collect()
    }

    fn provider(&self, service: ServiceKind) -> Result<&Arc<dyn Translator>, TranslationError> {
        match service {
            ServiceKind::Google => Ok(&self.google),
            ServiceKind::OpenAi => self.openai.as_ref().ok_or_else(|| {
                TranslationError::ServiceUnavailable(
                    "OpenAI translation service is not available".to_string(),
                )
            }),
        }
    }

    pub fn validate(&self, request: TranslateRequest) -> Result<ValidatedRequest, TranslationError> {
        let service = request.service_kind();
        let text = request.text.filter(|text| !text.trim().is_empty());
        let target_lang = request.target_lang.filter(|lang| !lang.is_empty());

        let (text, target_lang) = match (text, target_lang) {
            (Some(text), Some(target_lang)) => (text, target_lang),
            _ => {
                return Err(TranslationError::Validation(
                    "Missing required parameters: text and target_lang".to_string(),
                ))
            }
        };

        let language = languages::find(&target_lang).ok_or_else(|| {
            TranslationError::Validation(format!(
                "Unsupported language: {}. Supported languages are: {}",
                target_lang,
                languages::codes().join(", ")
            ))
        })?;

        Ok(ValidatedRequest {
            text,
            language,
            service,
        })
    }

    /// Run one translation request end to end.
    pub async fn translate(
        &self,
        request: TranslateRequest,
    ) -> Result<TranslateResponse, TranslationError> {
        let request = self.validate(request)?;
        let provider = self.provider(request.service)?;

        info!(
            "Translating {} chars to {} via {}",
            request.text.chars().count(),
            request.language.code,
            request.service
        );

        let translated_text = provider
            .translate(&request.text, request.language.code)
            .await
            .map_err(|e| {
                error!("Translation error: {}", e);
                match e {
                    TranslationError::ProviderFailure(_) => e,
                    other => TranslationError::ProviderFailure(other.to_string()),
                }
            })?;

        Ok(TranslateResponse {
            original_text: request.text,
            translated_text,
            target_language: request.language.code.to_string(),
            target_language_name: request.language.name.to_string(),
            service: request.service,
        })
    }

    pub fn languages(&self) -> LanguagesResponse {
        LanguagesResponse {
            languages: languages::as_map()
                .into_iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
            services: self.available_services(),
        }
    }

    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: "ok".to_string(),
            services: ServiceHealth {
                google: self.is_available(ServiceKind::Google),
                openai: self.is_available(ServiceKind::OpenAi),
            },
            supported_languages_count: languages::count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::test_support::StubTranslator;

    fn request(text: &str, target_lang: &str, service: Option<&str>) -> TranslateRequest {
        TranslateRequest {
            text: Some(text.to_string()),
            target_lang: Some(target_lang.to_string()),
            service: service.map(serde_json::Value::from),
        }
    }

    fn google_only() -> Dispatcher {
        Dispatcher::new(Arc::new(StubTranslator::ok()), None)
    }

    fn both() -> Dispatcher {
        Dispatcher::new(
            Arc::new(StubTranslator::ok()),
            Some(Arc::new(StubTranslator::failing("upstream exploded"))),
        )
    }

    #[test]
    fn accepts_every_supported_code() {
        let dispatcher = google_only();
        for lang in languages::SUPPORTED_LANGUAGES {
            let validated = dispatcher.validate(request("Hi", lang.code, None)).unwrap();
            assert_eq!(validated.language.code, lang.code);
        }
    }

    #[test]
    fn rejects_unknown_code_and_lists_valid_ones() {
        let err = google_only().validate(request("Hi", "xx", None)).unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, TranslationError::Validation(_)));
        assert!(message.contains("Unsupported language: xx"));
        let listed = message.split("Supported languages are: ").nth(1).unwrap();
        assert!(listed.split(", ").all(|code| code != "xx"));
        assert!(listed.split(", ").any(|code| code == "fr"));
    }

    #[test]
    fn rejects_missing_or_blank_text() {
        let dispatcher = google_only();
        for text in ["", "   "] {
            let err = dispatcher.validate(request(text, "fr", None)).unwrap_err();
            assert!(err.to_string().contains("Missing required parameters"));
        }
        let err = dispatcher
            .validate(TranslateRequest {
                target_lang: Some("fr".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, TranslationError::Validation(_)));
    }

    #[test]
    fn rejects_missing_target_lang() {
        let err = google_only()
            .validate(TranslateRequest {
                text: Some("Hi".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("target_lang"));
    }

    #[tokio::test]
    async fn successful_translation_fills_envelope() {
        let response = google_only()
            .translate(request("Hello, how are you?", "fr", Some("google")))
            .await
            .unwrap();
        assert_eq!(response.original_text, "Hello, how are you?");
        assert_eq!(response.target_language, "fr");
        assert_eq!(response.target_language_name, "French");
        assert_eq!(response.service, ServiceKind::Google);
        assert!(!response.translated_text.is_empty());
    }

    #[tokio::test]
    async fn openai_without_credential_is_unavailable() {
        let err = google_only()
            .translate(request("Hello", "fr", Some("openai")))
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn unknown_service_routes_to_google() {
        let response = both()
            .translate(request("Hello", "es", Some("babelfish")))
            .await
            .unwrap();
        assert_eq!(response.service, ServiceKind::Google);
        assert_eq!(response.translated_text, "[es] Hello");
    }

    #[tokio::test]
    async fn provider_failure_surfaces_message() {
        let err = both()
            .translate(request("Hello", "es", Some("openai")))
            .await
            .unwrap_err();
        assert!(matches!(err, TranslationError::ProviderFailure(_)));
        assert!(err.to_string().contains("upstream exploded"));
    }

    #[test]
    fn languages_lists_only_configured_services() {
        let listing = google_only().languages();
        assert_eq!(listing.services, vec![ServiceKind::Google]);
        assert_eq!(listing.languages.len(), languages::count());
        assert_eq!(listing.languages.get("fr").map(String::as_str), Some("French"));

        assert_eq!(
            both().languages().services,
            vec![ServiceKind::Google, ServiceKind::OpenAi]
        );
    }

    #[test]
    fn health_reports_provider_liveness() {
        let health = google_only().health();
        assert_eq!(health.status, "ok");
        assert!(health.services.google);
        assert!(!health.services.openai);
        assert_eq!(health.supported_languages_count, languages::count());
        assert!(both().health().services.openai);
    }

    #[test]
    fn from_config_without_key_disables_openai() {
        let dispatcher = Dispatcher::from_config(&Config::default()).unwrap();
        assert!(dispatcher.is_available(ServiceKind::Google));
        assert!(!dispatcher.is_available(ServiceKind::OpenAi));

        let config = Config {
            openai_api_key: Some("sk-test".to_string()),
            ..Config::default()
        };
        let dispatcher = Dispatcher::from_config(&config).unwrap();
        assert!(dispatcher.is_available(ServiceKind::OpenAi));
    }
}

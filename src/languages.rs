use std::collections::BTreeMap;

/// A target language accepted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    /// Code expected by the Google backend when it differs from `code`.
    pub google_code: Option<&'static str>,
}

impl Language {
    const fn new(code: &'static str, name: &'static str) -> Self {
        Self {
            code,
            name,
            google_code: None,
        }
    }

    const fn with_google_code(self, google_code: &'static str) -> Self {
        Self {
            google_code: Some(google_code),
            ..self
        }
    }

    pub fn google_code(&self) -> &'static str {
        self.google_code.unwrap_or(self.code)
    }
}

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language::new("en", "English"),
    Language::new("fr", "French"),
    Language::new("es", "Spanish"),
    Language::new("de", "German"),
    Language::new("it", "Italian"),
    Language::new("pt", "Portuguese"),
    Language::new("nl", "Dutch"),
    Language::new("ru", "Russian"),
    Language::new("pl", "Polish"),
    Language::new("tr", "Turkish"),
    Language::new("ar", "Arabic"),
    Language::new("hi", "Hindi"),
    Language::new("bn", "Bengali"),
    Language::new("ur", "Urdu"),
    Language::new("ja", "Japanese"),
    Language::new("ko", "Korean"),
    Language::new("zh", "Chinese").with_google_code("zh-CN"),
    Language::new("vi", "Vietnamese"),
    Language::new("th", "Thai"),
    Language::new("id", "Indonesian"),
];

/// Look up a supported language by its code.
pub fn find(code: &str) -> Option<&'static Language> {
    SUPPORTED_LANGUAGES.iter().find(|lang| lang.code == code)
}

pub fn codes() -> Vec<&'static str> {
    SUPPORTED_LANGUAGES.iter().map(|lang| lang.code).collect()
}

/// Code to display-name map, as served by `GET /languages`.
pub fn as_map() -> BTreeMap<&'static str, &'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|lang| (lang.code, lang.name))
        .collect()
}

pub fn count() -> usize {
    SUPPORTED_LANGUAGES.len()
}

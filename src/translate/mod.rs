pub mod interface;
pub mod google;
pub mod openai;

pub use interface::*;
pub use google::GoogleTranslator;
pub use openai::OpenAiTranslator;

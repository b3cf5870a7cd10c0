use thiserror::Error;

use super::models::DictionaryLanguage;

#[derive(Error, Debug)]
pub enum KhmineError {
    #[error("HTML tags detected in plain-text input, use colorize_html instead: {0}")]
    HtmlInPlainText(String),

    #[error("No short definition found for word: {0}")]
    MissingDefinition(String),

    #[error("Card not found for '{word}' ({language})")]
    CardNotFound { word: String, language: DictionaryLanguage },

    #[error("Store error: {0}")]
    Store(String),

    #[error("KhmineError: {0}")]
    Custom(String),
}

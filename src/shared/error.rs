use thiserror::Error;
use serde::Serialize;

/// Errors raised by the translate-and-copy workflow.
///
/// Every variant is caught at the click boundary and rendered through
/// [`AppError::user_message`]; nothing here is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("DeepL API key is not configured")]
    NoCredential,

    #[error("No translatable content found in this document")]
    NoContent,

    #[error("DeepL usage limit reached (HTTP 429)")]
    RateLimited,

    #[error("DeepL error: {reason} ({status})")]
    Provider { status: u16, reason: String },

    #[error("Unexpected response from DeepL")]
    UnexpectedResponse,

    #[error("Documents of type '{0}' cannot be translated")]
    UnsupportedDocument(String),

    #[error("Unknown target language: '{0}'")]
    InvalidLanguage(String),

    #[error("Network Error: {0}")]
    Network(String),

    #[error("Store Error: {0}")]
    Store(String),

    #[error("Settings Error: {0}")]
    Settings(String),

    #[error("I/O Error: {0}")]
    Io(String),
}

impl AppError {
    /// Text shown in the host's error notification.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NoCredential | AppError::NoContent => self.to_string(),
            _ => format!("Translation failed: {}", self),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Settings(format!("Serialization error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_carries_status_and_reason() {
        let err = AppError::Provider { status: 500, reason: "Internal Server Error".into() };
        assert_eq!(err.to_string(), "DeepL error: Internal Server Error (500)");
        assert_eq!(err.user_message(), "Translation failed: DeepL error: Internal Server Error (500)");
    }

    #[test]
    fn precondition_errors_are_shown_verbatim() {
        assert_eq!(AppError::NoCredential.user_message(), "DeepL API key is not configured");
        assert_eq!(
            AppError::NoContent.user_message(),
            "No translatable content found in this document"
        );
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(AppError::RateLimited).unwrap();
        assert_eq!(json["type"], "RateLimited");

        let json = serde_json::to_value(AppError::UnsupportedDocument("Scene".into())).unwrap();
        assert_eq!(json["type"], "UnsupportedDocument");
        assert_eq!(json["message"], "Scene");
    }
}

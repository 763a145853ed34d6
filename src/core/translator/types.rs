use serde::Deserialize;

use super::transport::HttpReply;
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::TargetLang;

/// One DeepL call's inputs.
#[derive(Debug, Clone, Copy)]
pub struct TranslationRequest<'a> {
    pub text: &'a str,
    pub target: &'a TargetLang,
    pub credential: &'a str,
}

impl TranslationRequest<'_> {
    /// `application/x-www-form-urlencoded` body.
    pub fn form_body(&self) -> String {
        format!(
            "auth_key={}&text={}&target_lang={}",
            urlencoding::encode(self.credential),
            urlencoding::encode(self.text),
            urlencoding::encode(self.target.as_str()),
        )
    }
}

// -- Strict Serde Structs for DeepL /v2/translate --

#[derive(Debug, Deserialize)]
pub struct DeeplResponse {
    #[serde(default)]
    pub translations: Vec<DeeplTranslation>,
}

#[derive(Debug, Deserialize)]
pub struct DeeplTranslation {
    pub text: String,
    #[serde(default)]
    pub detected_source_language: Option<String>,
}

/// DeepL reply, classified as soon as it comes off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderReply {
    Translated {
        text: String,
        detected_source_language: Option<String>,
    },
    RateLimited,
    Failed { status: u16, reason: String },
    Malformed,
}

impl ProviderReply {
    pub fn decode(reply: &HttpReply) -> Self {
        if reply.status == 429 {
            return ProviderReply::RateLimited;
        }
        if !reply.is_success() {
            return ProviderReply::Failed {
                status: reply.status,
                reason: reply.reason.clone(),
            };
        }

        match serde_json::from_str::<DeeplResponse>(&reply.body) {
            Ok(response) => match response.translations.into_iter().next() {
                Some(first) => ProviderReply::Translated {
                    text: first.text,
                    detected_source_language: first.detected_source_language,
                },
                None => ProviderReply::Malformed,
            },
            Err(_) => ProviderReply::Malformed,
        }
    }

    pub fn into_result(self) -> AppResult<String> {
        match self {
            ProviderReply::Translated { text, .. } => Ok(text),
            ProviderReply::RateLimited => Err(AppError::RateLimited),
            ProviderReply::Failed { status, reason } => Err(AppError::Provider { status, reason }),
            ProviderReply::Malformed => Err(AppError::UnexpectedResponse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, reason: &str, body: &str) -> HttpReply {
        HttpReply {
            status,
            reason: reason.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn form_body_is_percent_encoded() {
        let target = TargetLang::parse("en").unwrap();
        let request = TranslationRequest {
            text: "Une épée & un bouclier",
            target: &target,
            credential: "abc:fx",
        };
        assert_eq!(
            request.form_body(),
            "auth_key=abc%3Afx&text=Une%20%C3%A9p%C3%A9e%20%26%20un%20bouclier&target_lang=EN"
        );
    }

    #[test]
    fn takes_first_translation() {
        let decoded = ProviderReply::decode(&reply(
            200,
            "OK",
            r#"{"translations":[{"detected_source_language":"FR","text":"Hello"},{"text":"ignored"}]}"#,
        ));
        assert_eq!(
            decoded,
            ProviderReply::Translated {
                text: "Hello".into(),
                detected_source_language: Some("FR".into()),
            }
        );
    }

    #[test]
    fn rate_limit_is_distinct_from_other_failures() {
        assert_eq!(
            ProviderReply::decode(&reply(429, "Too Many Requests", "")),
            ProviderReply::RateLimited
        );
        assert_eq!(
            ProviderReply::decode(&reply(456, "", r#"{"message":"Quota exceeded"}"#)),
            ProviderReply::Failed { status: 456, reason: String::new() }
        );
    }

    #[test]
    fn success_without_translations_is_malformed() {
        for body in [r#"{"translations":[]}"#, r#"{}"#, "not json", r#"{"translations":[{}]}"#] {
            assert_eq!(ProviderReply::decode(&reply(200, "OK", body)), ProviderReply::Malformed, "{}", body);
        }
    }

    #[test]
    fn maps_to_error_taxonomy() {
        assert_eq!(ProviderReply::RateLimited.into_result(), Err(AppError::RateLimited));
        assert_eq!(ProviderReply::Malformed.into_result(), Err(AppError::UnexpectedResponse));
        assert_eq!(
            ProviderReply::Failed { status: 403, reason: "Forbidden".into() }.into_result(),
            Err(AppError::Provider { status: 403, reason: "Forbidden".into() })
        );
    }
}

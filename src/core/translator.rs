//! DeepL translation client
//!
//! A single POST per call. Rate limits, provider failures and malformed
//! replies each map to their own error; nothing is retried here.

pub mod transport;
pub mod types;

use self::transport::{HttpTransport, ReqwestTransport};
use self::types::{ProviderReply, TranslationRequest};
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::TargetLang;

pub const DEEPL_FREE_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";

pub struct DeeplClient<T = ReqwestTransport> {
    transport: T,
    endpoint: String,
}

impl DeeplClient<ReqwestTransport> {
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }
}

impl Default for DeeplClient<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HttpTransport> DeeplClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            endpoint: DEEPL_FREE_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Translate `text` into `target_lang` (case-insensitive).
    ///
    /// Missing credential, empty text and unknown language are rejected
    /// before anything is sent.
    pub async fn translate(&self, text: &str, target_lang: &str, credential: &str) -> AppResult<String> {
        if credential.trim().is_empty() {
            return Err(AppError::NoCredential);
        }
        if text.trim().is_empty() {
            return Err(AppError::NoContent);
        }
        let target = TargetLang::parse(target_lang)?;

        let request = TranslationRequest {
            text,
            target: &target,
            credential,
        };

        tracing::debug!(target_lang = %target, chars = text.chars().count(), "Sending DeepL request");
        let reply = self
            .transport
            .post_form(&self.endpoint, request.form_body())
            .await?;
        tracing::debug!(status = reply.status, "DeepL replied");

        let decoded = ProviderReply::decode(&reply);
        if let ProviderReply::Translated {
            detected_source_language: Some(source),
            ..
        } = &decoded
        {
            tracing::debug!(source_lang = %source, "DeepL detected source language");
        }
        decoded.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingTransport;
    use std::sync::Arc;

    fn client(transport: &Arc<RecordingTransport>) -> DeeplClient<Arc<RecordingTransport>> {
        DeeplClient::with_transport(transport.clone())
    }

    #[tokio::test]
    async fn empty_credential_never_reaches_the_network() {
        let transport = Arc::new(RecordingTransport::replying(200, r#"{"translations":[{"text":"x"}]}"#));

        let err = client(&transport).translate("Bonjour", "en", "").await.unwrap_err();

        assert_eq!(err, AppError::NoCredential);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn empty_text_and_bad_language_are_rejected_locally() {
        let transport = Arc::new(RecordingTransport::replying(200, "{}"));
        let client = client(&transport);

        assert_eq!(client.translate("  ", "en", "key").await, Err(AppError::NoContent));
        assert_eq!(
            client.translate("Bonjour", "zz", "key").await,
            Err(AppError::InvalidLanguage("zz".into()))
        );
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn sends_uppercased_target_to_the_free_endpoint() {
        let transport = Arc::new(RecordingTransport::replying(
            200,
            r#"{"translations":[{"detected_source_language":"FR","text":"Hello"}]}"#,
        ));

        let translated = client(&transport).translate("Bonjour", "en", "abc:fx").await.unwrap();

        assert_eq!(translated, "Hello");
        assert_eq!(transport.calls(), 1);
        let (url, form) = transport.last_request().unwrap();
        assert_eq!(url, DEEPL_FREE_ENDPOINT);
        assert_eq!(form.get("auth_key").map(String::as_str), Some("abc:fx"));
        assert_eq!(form.get("text").map(String::as_str), Some("Bonjour"));
        assert_eq!(form.get("target_lang").map(String::as_str), Some("EN"));
    }

    #[tokio::test]
    async fn classifies_provider_failures() {
        let cases = [
            (429, "Too Many Requests", "", AppError::RateLimited),
            (
                500,
                "Internal Server Error",
                "",
                AppError::Provider { status: 500, reason: "Internal Server Error".into() },
            ),
            (403, "Forbidden", "", AppError::Provider { status: 403, reason: "Forbidden".into() }),
            (200, "OK", r#"{"translations":[]}"#, AppError::UnexpectedResponse),
        ];

        for (status, reason, body, expected) in cases {
            let transport = Arc::new(RecordingTransport::replying_with_reason(status, reason, body));
            let err = client(&transport).translate("Bonjour", "en", "key").await.unwrap_err();
            assert_eq!(err, expected, "status {}", status);
            assert_eq!(transport.calls(), 1, "exactly one attempt for status {}", status);
        }
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let transport = Arc::new(RecordingTransport::failing(AppError::Network("connection reset".into())));
        let err = client(&transport).translate("Bonjour", "en", "key").await.unwrap_err();
        assert_eq!(err, AppError::Network("connection reset".into()));
    }

    #[test]
    fn endpoint_can_be_overridden() {
        let client = DeeplClient::new().with_endpoint("https://api.deepl.com/v2/translate");
        assert_eq!(client.endpoint(), "https://api.deepl.com/v2/translate");
        assert_eq!(DeeplClient::default().endpoint(), DEEPL_FREE_ENDPOINT);
    }
}

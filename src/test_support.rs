//! Fakes for the host and network seams.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::translator::transport::{HttpReply, HttpTransport};
use crate::host::{HostUi, Notification};
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::Document;

/// Transport that answers every call with the same canned outcome.
pub struct RecordingTransport {
    outcome: AppResult<HttpReply>,
    requests: Mutex<Vec<(String, String)>>,
}

impl RecordingTransport {
    pub fn replying(status: u16, body: &str) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default();
        Self::replying_with_reason(status, reason, body)
    }

    pub fn replying_with_reason(status: u16, reason: &str, body: &str) -> Self {
        Self::with_outcome(Ok(HttpReply {
            status,
            reason: reason.to_string(),
            body: body.to_string(),
        }))
    }

    pub fn translating_to(text: &str) -> Self {
        let body = serde_json::json!({ "translations": [{ "text": text }] }).to_string();
        Self::replying(200, &body)
    }

    pub fn failing(err: AppError) -> Self {
        Self::with_outcome(Err(err))
    }

    fn with_outcome(outcome: AppResult<HttpReply>) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Last request as `(url, decoded form fields)`.
    pub fn last_request(&self) -> Option<(String, HashMap<String, String>)> {
        let requests = self.requests.lock().unwrap();
        let (url, body) = requests.last()?;
        let form = body
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.to_string(), urlencoding::decode(v).unwrap().into_owned()))
            .collect();
        Some((url.clone(), form))
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn post_form(&self, url: &str, body: String) -> AppResult<HttpReply> {
        self.requests.lock().unwrap().push((url.to_string(), body));
        self.outcome.clone()
    }
}

/// Host UI that records notifications and opened sheets.
#[derive(Default)]
pub struct RecordingUi {
    pub notifications: Mutex<Vec<Notification>>,
    pub opened: Mutex<Vec<Document>>,
}

impl RecordingUi {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<Document> {
        self.opened.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Error(msg) => Some(msg),
                Notification::Info(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl HostUi for RecordingUi {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }

    async fn open_sheet(&self, document: &Document) -> AppResult<()> {
        self.opened.lock().unwrap().push(document.clone());
        Ok(())
    }
}

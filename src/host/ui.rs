use async_trait::async_trait;
use serde::Serialize;

use crate::shared::error::AppResult;
use crate::shared::types::Document;

/// Toast shown by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "lowercase")]
pub enum Notification {
    Info(String),
    Error(String),
}

/// Notification and sheet surface of the host application.
#[async_trait]
pub trait HostUi: Send + Sync {
    fn notify(&self, notification: Notification);

    /// Render the sheet of an already-persisted document.
    async fn open_sheet(&self, document: &Document) -> AppResult<()>;

    fn info(&self, message: &str) {
        self.notify(Notification::Info(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notify(Notification::Error(message.to_string()));
    }
}

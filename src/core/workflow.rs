//! Translate-and-copy workflow
//!
//! extract -> translate -> materialize, with every failure turned into a
//! user notification at the click boundary.

use std::sync::Arc;

use super::extractor::extract;
use super::materializer::materialize;
use super::store::DocumentStore;
use super::translator::transport::{HttpTransport, ReqwestTransport};
use super::translator::DeeplClient;
use crate::config::{ConfigSource, WorkflowConfig};
use crate::host::HostUi;
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::{Document, TargetLang};

pub const TRANSLATING_MESSAGE: &str = "Translating…";
pub const COPY_CREATED_MESSAGE: &str = "Translated copy created!";

pub struct TranslateWorkflow<T = ReqwestTransport> {
    client: DeeplClient<T>,
    store: Arc<dyn DocumentStore>,
    config: Arc<dyn ConfigSource>,
}

impl<T: HttpTransport> TranslateWorkflow<T> {
    pub fn new(client: DeeplClient<T>, store: Arc<dyn DocumentStore>, config: Arc<dyn ConfigSource>) -> Self {
        Self { client, store, config }
    }

    /// Translate `doc` and return the persisted copy.
    pub async fn run(&self, doc: &Document, config: &WorkflowConfig) -> AppResult<Document> {
        if !config.has_credential() {
            return Err(AppError::NoCredential);
        }
        let extracted = extract(doc)?;
        let target = TargetLang::parse(&config.target_lang)?;
        tracing::debug!(doc = %doc.id(), field = ?extracted.field, target_lang = %target, "Extracted translatable text");

        let translated = self
            .client
            .translate(extracted.text, target.as_str(), &config.credential)
            .await?;

        materialize(self.store.as_ref(), doc, &translated, &target).await
    }

    /// Click handler body. Never fails; outcomes are reported through `ui`.
    pub async fn on_translate_clicked(&self, doc: &Document, ui: &dyn HostUi) -> Option<Document> {
        match self.translate_and_open(doc, ui).await {
            Ok(copy) => {
                ui.info(COPY_CREATED_MESSAGE);
                Some(copy)
            }
            Err(err) => {
                tracing::debug!(doc = %doc.id(), error = %err, "Translate action aborted");
                ui.error(&err.user_message());
                None
            }
        }
    }

    async fn translate_and_open(&self, doc: &Document, ui: &dyn HostUi) -> AppResult<Document> {
        let config = self.config.workflow_config()?;
        if !config.has_credential() {
            return Err(AppError::NoCredential);
        }
        extract(doc)?;

        ui.info(TRANSLATING_MESSAGE);
        let copy = self.run(doc, &config).await?;

        // The copy is persisted at this point; a sheet that fails to open
        // does not undo it.
        if let Err(err) = ui.open_sheet(&copy).await {
            tracing::warn!(copy = %copy.id(), error = %err, "Failed to open translated copy");
        }
        Ok(copy)
    }

    /// Latest stored version of `doc`, or `doc` itself when the store does not know it.
    pub async fn latest(&self, doc: &Document) -> Document {
        match self.store.get(doc.id()).await {
            Ok(Some(current)) => current,
            _ => doc.clone(),
        }
    }
}

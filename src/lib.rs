//! Translated copies of journals, journal pages, actors and items.
//!
//! A host bridge forwards sheet render hooks to a
//! [`host::DocumentRenderObserver`]; the injected button runs
//! [`core::workflow::TranslateWorkflow`], which extracts the document's text,
//! translates it with DeepL and stores a tagged copy.

pub mod config;
pub mod core;
pub mod host;
pub mod shared;

#[cfg(test)]
mod test_support;

pub use crate::config::{ConfigSource, WorkflowConfig};
pub use crate::core::store::{DocumentStore, InMemoryDocumentStore};
pub use crate::core::translator::DeeplClient;
pub use crate::core::workflow::TranslateWorkflow;
pub use crate::shared::error::{AppError, AppResult};
pub use crate::shared::types::{Document, DocumentDraft, DocumentId, Provenance, TargetLang};

use tracing_subscriber::EnvFilter;

/// Install the `tracing` subscriber.
///
/// `RUST_LOG` overrides the default filter (`warn,autotranslate_journal=info`).
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,autotranslate_journal=info")),
        )
        .try_init();
}

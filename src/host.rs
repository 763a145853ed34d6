//! Host bridge
//!
//! Everything the host application provides (render hooks, sheet headers,
//! notifications, settings) is reached through the traits in this module.

pub mod button;
pub mod hooks;
pub mod ui;

use std::sync::Arc;

pub use button::{ClickHandler, HeaderControl, SheetHandle, TranslateButtonInjector, BUTTON_CLASS};
pub use hooks::{dispatch_render, supported_hooks, DocumentRenderObserver, SheetKind};
pub use ui::{HostUi, Notification};

use crate::core::translator::transport::HttpTransport;
use crate::core::workflow::TranslateWorkflow;
use crate::shared::error::AppResult;
use crate::shared::settings::{register_settings, SettingsRegistry};

/// Register settings and build the render observer. Call once when the host initializes.
pub fn install<T: HttpTransport + 'static>(
    registry: &dyn SettingsRegistry,
    workflow: Arc<TranslateWorkflow<T>>,
    ui: Arc<dyn HostUi>,
) -> AppResult<TranslateButtonInjector<T>> {
    register_settings(registry)?;
    tracing::info!(hooks = ?supported_hooks().collect::<Vec<_>>(), "autotranslate-journal ready");
    Ok(TranslateButtonInjector::new(workflow, ui))
}

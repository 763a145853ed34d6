//! Translate button injection
//!
//! One button per sheet header. A re-render finds the existing button by its
//! class and leaves the header alone.

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Serialize;
use ts_rs::TS;

use super::hooks::DocumentRenderObserver;
use super::ui::HostUi;
use crate::core::translator::transport::HttpTransport;
use crate::core::workflow::TranslateWorkflow;
use crate::shared::types::Document;

pub const BUTTON_CLASS: &str = "autotranslate-journal";

/// Header button description handed to the host's DOM layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
pub struct HeaderControl {
    pub class: String,
    pub icon: String,
    pub label: String,
    pub tooltip: String,
}

impl HeaderControl {
    pub fn translate() -> Self {
        Self {
            class: BUTTON_CLASS.to_string(),
            icon: "fas fa-language".to_string(),
            label: "Translate".to_string(),
            tooltip: "Create a translated copy".to_string(),
        }
    }
}

pub type ClickHandler = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// The rendered sheet's header, as exposed by the host.
pub trait SheetHandle: Send + Sync {
    fn has_header_control(&self, class: &str) -> bool;
    fn prepend_header_control(&self, control: HeaderControl, on_click: ClickHandler);
}

/// Render observer that wires the translate button to the workflow.
pub struct TranslateButtonInjector<T> {
    workflow: Arc<TranslateWorkflow<T>>,
    ui: Arc<dyn HostUi>,
}

impl<T: HttpTransport + 'static> TranslateButtonInjector<T> {
    pub fn new(workflow: Arc<TranslateWorkflow<T>>, ui: Arc<dyn HostUi>) -> Self {
        Self { workflow, ui }
    }

    /// Add the button unless the sheet already has one. Returns whether it was added.
    pub fn inject(&self, doc: &Document, sheet: &dyn SheetHandle) -> bool {
        if sheet.has_header_control(BUTTON_CLASS) {
            return false;
        }

        let workflow = self.workflow.clone();
        let ui = self.ui.clone();
        let rendered = doc.clone();
        let on_click: ClickHandler = Arc::new(move || -> BoxFuture<'static, ()> {
            let workflow = workflow.clone();
            let ui = ui.clone();
            let rendered = rendered.clone();
            Box::pin(async move {
                // The sheet may have been edited since it was rendered.
                let current = workflow.latest(&rendered).await;
                workflow.on_translate_clicked(&current, ui.as_ref()).await;
            })
        });

        sheet.prepend_header_control(HeaderControl::translate(), on_click);
        tracing::debug!(doc = %doc.id(), kind = doc.kind(), "Injected translate button");
        true
    }
}

impl<T: HttpTransport + 'static> DocumentRenderObserver for TranslateButtonInjector<T> {
    fn on_journal_rendered(&self, doc: &Document, sheet: &dyn SheetHandle) {
        self.inject(doc, sheet);
    }

    fn on_journal_page_rendered(&self, doc: &Document, sheet: &dyn SheetHandle) {
        self.inject(doc, sheet);
    }

    fn on_actor_rendered(&self, doc: &Document, sheet: &dyn SheetHandle) {
        self.inject(doc, sheet);
    }

    fn on_item_rendered(&self, doc: &Document, sheet: &dyn SheetHandle) {
        self.inject(doc, sheet);
    }
}

//! Render hooks
//!
//! The host fires one hook per rendered sheet. [`dispatch_render`] maps the
//! hook name onto a [`DocumentRenderObserver`] method.

use super::button::SheetHandle;
use crate::shared::types::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    Journal,
    JournalPage,
    Actor,
    Item,
}

impl SheetKind {
    pub const ALL: [SheetKind; 4] = [
        SheetKind::Journal,
        SheetKind::JournalPage,
        SheetKind::Actor,
        SheetKind::Item,
    ];

    pub fn hook_name(self) -> &'static str {
        match self {
            SheetKind::Journal => "renderJournalSheet",
            SheetKind::JournalPage => "renderJournalEntryPageSheet",
            SheetKind::Actor => "renderActorSheet",
            SheetKind::Item => "renderItemSheet",
        }
    }

    pub fn from_hook(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.hook_name() == name)
    }
}

/// Hook names a host bridge should subscribe to.
pub fn supported_hooks() -> impl Iterator<Item = &'static str> {
    SheetKind::ALL.into_iter().map(SheetKind::hook_name)
}

/// Receives sheet render notifications, one method per supported sheet.
pub trait DocumentRenderObserver: Send + Sync {
    fn on_journal_rendered(&self, doc: &Document, sheet: &dyn SheetHandle);
    fn on_journal_page_rendered(&self, doc: &Document, sheet: &dyn SheetHandle);
    fn on_actor_rendered(&self, doc: &Document, sheet: &dyn SheetHandle);
    fn on_item_rendered(&self, doc: &Document, sheet: &dyn SheetHandle);
}

/// Route a host hook to `observer`. Returns `false` for hooks we do not handle.
pub fn dispatch_render(
    observer: &dyn DocumentRenderObserver,
    hook: &str,
    doc: &Document,
    sheet: &dyn SheetHandle,
) -> bool {
    let Some(kind) = SheetKind::from_hook(hook) else {
        tracing::trace!(hook, "Ignoring render hook");
        return false;
    };

    match kind {
        SheetKind::Journal => observer.on_journal_rendered(doc, sheet),
        SheetKind::JournalPage => observer.on_journal_page_rendered(doc, sheet),
        SheetKind::Actor => observer.on_actor_rendered(doc, sheet),
        SheetKind::Item => observer.on_item_rendered(doc, sheet),
    }
    true
}

//! Content extraction
//!
//! Candidate fields are probed in a fixed order. Each variant owns exactly
//! one of them, so a document only ever yields the field that the
//! materializer later replaces.

use serde_json::Value;

use crate::shared::error::{AppError, AppResult};
use crate::shared::types::Document;

pub const BIOGRAPHY_POINTER: &str = "/details/biography/value";
pub const DESCRIPTION_POINTER: &str = "/description/value";

/// Which field the text was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TextField {
    Content,
    Text,
    Biography,
    Description,
}

impl TextField {
    /// Probe order.
    pub const PRIORITY: [TextField; 4] = [
        TextField::Content,
        TextField::Text,
        TextField::Biography,
        TextField::Description,
    ];

    fn read(self, doc: &Document) -> Option<&str> {
        match (self, doc) {
            (TextField::Content, Document::LegacyJournal(journal)) => Some(&journal.content),
            (TextField::Text, Document::JournalPage(page)) => Some(&page.text),
            (TextField::Biography, Document::Actor(actor)) => system_text(&actor.system, BIOGRAPHY_POINTER),
            (TextField::Description, Document::Item(item)) => system_text(&item.system, DESCRIPTION_POINTER),
            _ => None,
        }
    }
}

fn system_text<'a>(system: &'a Value, pointer: &str) -> Option<&'a str> {
    system.pointer(pointer).and_then(Value::as_str)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractedText<'a> {
    pub field: TextField,
    pub text: &'a str,
}

/// Return the first non-blank candidate, or `NoContent`.
pub fn extract(doc: &Document) -> AppResult<ExtractedText<'_>> {
    TextField::PRIORITY
        .iter()
        .find_map(|&field| {
            field
                .read(doc)
                .filter(|text| !text.trim().is_empty())
                .map(|text| ExtractedText { field, text })
        })
        .ok_or(AppError::NoContent)
}

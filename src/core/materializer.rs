//! Translated copy creation
//!
//! Builds one draft per original and hands it to the store. The original is
//! only borrowed; actors and items get an owned deep copy of their system
//! data with a single leaf replaced.

use serde_json::{Map, Value};

use super::store::DocumentStore;
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::{Document, DocumentDraft, Flags, Provenance, TargetLang};

const BIOGRAPHY_PATH: [&str; 3] = ["details", "biography", "value"];
const DESCRIPTION_PATH: [&str; 2] = ["description", "value"];

/// `"Notes"` + `EN` -> `"Notes (EN)"`.
pub fn translated_name(name: &str, target: &TargetLang) -> String {
    format!("{} ({})", name, target)
}

/// Create the translated copy of `original` and wait for the store to persist it.
pub async fn materialize(
    store: &dyn DocumentStore,
    original: &Document,
    translated: &str,
    target: &TargetLang,
) -> AppResult<Document> {
    let draft = build_draft(original, translated, target)?;
    let created = store.create(draft).await?;
    tracing::info!(
        source = %original.id(),
        copy = %created.id(),
        kind = created.kind(),
        "Created translated copy"
    );
    Ok(created)
}

pub fn build_draft(original: &Document, translated: &str, target: &TargetLang) -> AppResult<DocumentDraft> {
    let name = translated_name(original.name(), target);
    let folder = original.meta().folder.clone();

    let draft = match original {
        Document::LegacyJournal(_) => DocumentDraft::Journal {
            name,
            content: translated.to_string(),
            folder,
            flags: provenance_flags(original, target)?,
        },
        Document::JournalPage(page) => DocumentDraft::Page {
            parent: page.parent.clone(),
            name,
            page_type: page.page_type.clone(),
            text: translated.to_string(),
            flags: provenance_flags(original, target)?,
        },
        Document::Actor(actor) => {
            let mut system = actor.system.clone();
            set_leaf(&mut system, &BIOGRAPHY_PATH, translated);
            DocumentDraft::Actor {
                name,
                actor_type: actor.actor_type.clone(),
                system,
                folder,
                flags: provenance_flags(original, target)?,
            }
        }
        Document::Item(item) => {
            let mut system = item.system.clone();
            set_leaf(&mut system, &DESCRIPTION_PATH, translated);
            DocumentDraft::Item {
                name,
                item_type: item.item_type.clone(),
                system,
                folder,
                flags: provenance_flags(original, target)?,
            }
        }
        Document::Unsupported(other) => {
            return Err(AppError::UnsupportedDocument(other.kind.clone()));
        }
    };

    Ok(draft)
}

fn provenance_flags(original: &Document, target: &TargetLang) -> AppResult<Flags> {
    Provenance::new(original.id(), target).into_flags()
}

/// Write `text` at `path`, creating intermediate objects as needed.
fn set_leaf(root: &mut Value, path: &[&str], text: &str) {
    let mut node = root;
    for key in path {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        node = &mut node[*key];
    }
    *node = Value::String(text.to_string());
}

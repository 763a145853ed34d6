//! Document model shared by the extractor, materializer and host bridge.
//!
//! Documents arrive from the host as JSON tagged by `documentName`. Each
//! translatable variant has exactly one text path:
//!
//! | variant          | text path                         |
//! |------------------|-----------------------------------|
//! | `LegacyJournal`  | `content`                         |
//! | `JournalPage`    | `text`                            |
//! | `Actor`          | `system.details.biography.value`  |
//! | `Item`           | `system.description.value`        |

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use isolang::Language;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use ts_rs::TS;

use crate::shared::error::{AppError, AppResult};

/// Flag namespace under which provenance is stored.
pub const FLAG_SCOPE: &str = "autotranslate-journal";

/// Namespaced annotations attached to a document (`flags` on the host side).
pub type Flags = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh 16-character id, the length the host uses for its own ids.
    pub fn generate() -> Self {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(16);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields every document kind carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: String,
    #[serde(default)]
    pub folder: Option<DocumentId>,
    #[serde(default)]
    pub flags: Flags,
}

impl DocumentMeta {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new(id),
            name: name.into(),
            folder: None,
            flags: Flags::new(),
        }
    }

    pub fn in_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(DocumentId::new(folder));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyJournal {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalPage {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    /// Journal that embeds this page.
    pub parent: DocumentId,
    #[serde(rename = "type", default = "default_page_type")]
    pub page_type: String,
    #[serde(default)]
    pub text: String,
}

fn default_page_type() -> String {
    "text".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(rename = "type")]
    pub actor_type: String,
    #[serde(default)]
    pub system: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub system: Value,
}

/// A host document kind this crate does not translate (scenes, roll tables...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherDocument {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(rename = "documentName")]
    pub kind: String,
}

/// Any document the host can hand over. Unknown `documentName` values
/// decode to [`Document::Unsupported`].
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    LegacyJournal(LegacyJournal),
    JournalPage(JournalPage),
    Actor(Actor),
    Item(Item),
    Unsupported(OtherDocument),
}

const JOURNAL_KIND: &str = "JournalEntry";
const PAGE_KIND: &str = "JournalEntryPage";
const ACTOR_KIND: &str = "Actor";
const ITEM_KIND: &str = "Item";

#[derive(Serialize)]
#[serde(tag = "documentName")]
enum TaggedRef<'a> {
    #[serde(rename = "JournalEntry")]
    LegacyJournal(&'a LegacyJournal),
    #[serde(rename = "JournalEntryPage")]
    JournalPage(&'a JournalPage),
    Actor(&'a Actor),
    Item(&'a Item),
}

#[derive(Deserialize)]
#[serde(tag = "documentName")]
enum Tagged {
    #[serde(rename = "JournalEntry")]
    LegacyJournal(LegacyJournal),
    #[serde(rename = "JournalEntryPage")]
    JournalPage(JournalPage),
    Actor(Actor),
    Item(Item),
}

impl From<Tagged> for Document {
    fn from(tagged: Tagged) -> Self {
        match tagged {
            Tagged::LegacyJournal(doc) => Document::LegacyJournal(doc),
            Tagged::JournalPage(doc) => Document::JournalPage(doc),
            Tagged::Actor(doc) => Document::Actor(doc),
            Tagged::Item(doc) => Document::Item(doc),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Document::LegacyJournal(doc) => TaggedRef::LegacyJournal(doc).serialize(serializer),
            Document::JournalPage(doc) => TaggedRef::JournalPage(doc).serialize(serializer),
            Document::Actor(doc) => TaggedRef::Actor(doc).serialize(serializer),
            Document::Item(doc) => TaggedRef::Item(doc).serialize(serializer),
            Document::Unsupported(doc) => doc.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let known = match value.get("documentName").and_then(Value::as_str) {
            Some(kind) => matches!(kind, JOURNAL_KIND | PAGE_KIND | ACTOR_KIND | ITEM_KIND),
            None => return Err(de::Error::missing_field("documentName")),
        };

        let decoded = if known {
            serde_json::from_value::<Tagged>(value).map(Document::from)
        } else {
            serde_json::from_value::<OtherDocument>(value).map(Document::Unsupported)
        };
        decoded.map_err(de::Error::custom)
    }
}

impl Document {
    pub fn meta(&self) -> &DocumentMeta {
        match self {
            Document::LegacyJournal(doc) => &doc.meta,
            Document::JournalPage(doc) => &doc.meta,
            Document::Actor(doc) => &doc.meta,
            Document::Item(doc) => &doc.meta,
            Document::Unsupported(doc) => &doc.meta,
        }
    }

    pub fn id(&self) -> &DocumentId {
        &self.meta().id
    }

    pub fn name(&self) -> &str {
        &self.meta().name
    }

    /// Host-side document class name.
    pub fn kind(&self) -> &str {
        match self {
            Document::LegacyJournal(_) => JOURNAL_KIND,
            Document::JournalPage(_) => PAGE_KIND,
            Document::Actor(_) => ACTOR_KIND,
            Document::Item(_) => ITEM_KIND,
            Document::Unsupported(doc) => &doc.kind,
        }
    }

    /// Provenance flag, if this document was produced by a translation.
    pub fn provenance(&self) -> Option<Provenance> {
        self.meta()
            .flags
            .get(FLAG_SCOPE)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Record of which document and language produced a translated copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    #[ts(type = "string")]
    pub translated_from: DocumentId,
    pub target_lang: String,
    #[ts(type = "string")]
    pub date: DateTime<Utc>,
}

impl Provenance {
    pub fn new(source: &DocumentId, target: &TargetLang) -> Self {
        Self {
            translated_from: source.clone(),
            target_lang: target.as_str().to_string(),
            date: Utc::now(),
        }
    }

    pub fn into_flags(self) -> AppResult<Flags> {
        let mut flags = Flags::new();
        flags.insert(FLAG_SCOPE.to_string(), serde_json::to_value(self)?);
        Ok(flags)
    }
}

/// Creation payload handed to a [`crate::core::store::DocumentStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentDraft {
    Journal {
        name: String,
        content: String,
        folder: Option<DocumentId>,
        flags: Flags,
    },
    /// Embedded page; created inside `parent`, not as a top-level document.
    Page {
        parent: DocumentId,
        name: String,
        page_type: String,
        text: String,
        flags: Flags,
    },
    Actor {
        name: String,
        actor_type: String,
        system: Value,
        folder: Option<DocumentId>,
        flags: Flags,
    },
    Item {
        name: String,
        item_type: String,
        system: Value,
        folder: Option<DocumentId>,
        flags: Flags,
    },
}

impl DocumentDraft {
    pub fn name(&self) -> &str {
        match self {
            DocumentDraft::Journal { name, .. }
            | DocumentDraft::Page { name, .. }
            | DocumentDraft::Actor { name, .. }
            | DocumentDraft::Item { name, .. } => name,
        }
    }

    pub fn flags(&self) -> &Flags {
        match self {
            DocumentDraft::Journal { flags, .. }
            | DocumentDraft::Page { flags, .. }
            | DocumentDraft::Actor { flags, .. }
            | DocumentDraft::Item { flags, .. } => flags,
        }
    }

    /// Materialize the draft under the id the store assigned.
    pub fn into_document(self, id: DocumentId) -> Document {
        match self {
            DocumentDraft::Journal { name, content, folder, flags } => {
                Document::LegacyJournal(LegacyJournal {
                    meta: DocumentMeta { id, name, folder, flags },
                    content,
                })
            }
            DocumentDraft::Page { parent, name, page_type, text, flags } => {
                Document::JournalPage(JournalPage {
                    meta: DocumentMeta { id, name, folder: None, flags },
                    parent,
                    page_type,
                    text,
                })
            }
            DocumentDraft::Actor { name, actor_type, system, folder, flags } => {
                Document::Actor(Actor {
                    meta: DocumentMeta { id, name, folder, flags },
                    actor_type,
                    system,
                })
            }
            DocumentDraft::Item { name, item_type, system, folder, flags } => {
                Document::Item(Item {
                    meta: DocumentMeta { id, name, folder, flags },
                    item_type,
                    system,
                })
            }
        }
    }
}

/// Uppercase DeepL target language code (`FR`, `EN-GB`, `PT-BR`...).
///
/// The primary subtag must be an ISO 639-1 code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetLang(String);

impl TargetLang {
    pub fn parse(code: &str) -> AppResult<Self> {
        let normalized = code.trim().to_ascii_uppercase();
        let primary = normalized.split('-').next().unwrap_or("");

        let known = primary.len() == 2
            && Language::from_639_1(&primary.to_ascii_lowercase()).is_some();
        if !known {
            return Err(AppError::InvalidLanguage(code.trim().to_string()));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

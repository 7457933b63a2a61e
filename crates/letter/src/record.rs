use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Canonical path of a loaded logo or stamp image. Display thumbnails are a
/// GUI concern and are kept out of the record so preview resolution never
/// affects export fidelity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub path: PathBuf,
}

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Complete in-memory state of one letter-in-progress. Created empty at
/// startup, mutated field-by-field by the form controller, and read (never
/// mutated) by the preview renderer and the document composer.
///
/// All scalar fields are free text; registration numbers (ИНН/КПП/ОГРН) are
/// not validated. `body_text` is stored verbatim; leading/trailing whitespace
/// is trimmed only at render/compose time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LetterRecord {
    pub sender_company: String,
    pub inn: String,
    pub kpp: String,
    pub ogrn: String,
    pub legal_address: String,
    pub post_address: String,
    pub phone: String,
    pub outgoing_number: String,
    pub outgoing_date: String,
    pub sender_position: String,
    pub sender_name: String,
    pub recipient_company: String,
    pub recipient_position: String,
    pub recipient_name: String,
    pub body_text: String,
    pub attachments: Vec<String>,
    pub logo: Option<ImageRef>,
    pub stamp: Option<ImageRef>,
}

impl LetterRecord {
    /// Confirms a free-text attachment. The text is trimmed first; blank
    /// input is rejected. Confirmed attachments keep insertion order and are
    /// never reordered or removed.
    pub fn push_attachment(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.attachments.push(trimmed.to_string());
        true
    }
}

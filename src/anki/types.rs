use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

pub const JAPANESE_FIELD: &str = "Japanese";
pub const ENGLISH_FIELD: &str = "English";
pub const JMDICT_FIELD: &str = "jmdictId";

/// Note as sent by the flashcard plugin. Lives for a single request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub fields: HashMap<String, String>,
    /// `listId:groupTitle:title`, as produced by `deckNames`.
    pub deck_name: String,
}

impl Note {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Remote list id: everything before the first `:`.
    pub fn list_id(&self) -> &str {
        self.deck_name.split(':').next().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteParam {
    pub note: Note,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotesParam {
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub headword: String,
    pub reading: String,
    pub gloss: String,
    pub dictionary_id: Option<String>,
}

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

use crate::{
    anki::types::{
        Note,
        NoteParam,
        NotesParam,
        ENGLISH_FIELD,
        JAPANESE_FIELD,
    },
    core::ConnectError,
};

pub const PROTOCOL_VERSION: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Version,
    AddNote,
    CanAddNotes,
    DeckNames,
    ModelNames,
    ModelFieldNames,
    StoreMediaFile,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Version => "version",
            Action::AddNote => "addNote",
            Action::CanAddNotes => "canAddNotes",
            Action::DeckNames => "deckNames",
            Action::ModelNames => "modelNames",
            Action::ModelFieldNames => "modelFieldNames",
            Action::StoreMediaFile => "storeMediaFile",
        }
    }
}

/// Only the literal `2` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u64")]
pub struct ProtocolVersion;

impl TryFrom<u64> for ProtocolVersion {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value == PROTOCOL_VERSION {
            Ok(ProtocolVersion)
        } else {
            Err(format!("unsupported version {value}, expected {PROTOCOL_VERSION}"))
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRequest {
    action: Action,
    #[allow(dead_code)]
    version: ProtocolVersion,
    key: String,
    #[serde(default)]
    params: Option<Value>,
}

/// An action together with its typed parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Version,
    AddNote(Note),
    CanAddNotes(Vec<Note>),
    DeckNames,
    ModelNames,
    ModelFieldNames,
    StoreMediaFile,
}

impl Call {
    pub fn action(&self) -> Action {
        match self {
            Call::Version => Action::Version,
            Call::AddNote(_) => Action::AddNote,
            Call::CanAddNotes(_) => Action::CanAddNotes,
            Call::DeckNames => Action::DeckNames,
            Call::ModelNames => Action::ModelNames,
            Call::ModelFieldNames => Action::ModelFieldNames,
            Call::StoreMediaFile => Action::StoreMediaFile,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub key: String,
    pub call: Call,
}

impl Request {
    pub fn parse(body: &[u8]) -> Result<Self, ConnectError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ConnectError::validation(format!("invalid request body: {e}")))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ConnectError> {
        let raw: RawRequest = serde_json::from_value(value)
            .map_err(|e| ConnectError::validation(format!("invalid request: {e}")))?;

        let call = match raw.action {
            Action::Version => Call::Version,
            Action::DeckNames => Call::DeckNames,
            Action::ModelNames => Call::ModelNames,
            Action::ModelFieldNames => Call::ModelFieldNames,
            // Media is never stored, whatever the payload.
            Action::StoreMediaFile => Call::StoreMediaFile,
            Action::AddNote => {
                let param: NoteParam = params(raw.action, raw.params)?;
                check_note(&param.note, "note")?;
                Call::AddNote(param.note)
            }
            Action::CanAddNotes => {
                let param: NotesParam = params(raw.action, raw.params)?;
                for (index, note) in param.notes.iter().enumerate() {
                    check_note(note, &format!("notes[{index}]"))?;
                }
                Call::CanAddNotes(param.notes)
            }
        };

        Ok(Request { key: raw.key, call })
    }
}

fn params<T: for<'de> Deserialize<'de>>(
    action: Action,
    params: Option<Value>,
) -> Result<T, ConnectError> {
    let params = params.ok_or_else(|| {
        ConnectError::validation(format!("{} requires params", action.name()))
    })?;
    serde_json::from_value(params)
        .map_err(|e| ConnectError::validation(format!("invalid params for {}: {e}", action.name())))
}

fn check_note(note: &Note, location: &str) -> Result<(), ConnectError> {
    for required in [JAPANESE_FIELD, ENGLISH_FIELD] {
        if note.field(required).is_none() {
            return Err(ConnectError::validation(format!(
                "{location} is missing required field '{required}'"
            )));
        }
    }
    Ok(())
}

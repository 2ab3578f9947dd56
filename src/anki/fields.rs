//! Linguistic fields derived from a note's free-form field map.
//!
//! The `Japanese` field is authored as `headword`, `headword/reading`, or
//! `headword//`; only the first and last `/` segments matter.

use crate::{
    anki::types::{
        ExtractedFields,
        Note,
        ENGLISH_FIELD,
        JAPANESE_FIELD,
        JMDICT_FIELD,
    },
    core::ConnectError,
};

fn japanese(note: &Note) -> Result<&str, ConnectError> {
    note.field(JAPANESE_FIELD).ok_or(ConnectError::MalformedNote(JAPANESE_FIELD))
}

pub fn headword(note: &Note) -> Result<&str, ConnectError> {
    let japanese = japanese(note)?;
    Ok(japanese.split('/').next().unwrap_or(japanese))
}

/// Last segment, or the headword segment when the last one is empty. A field
/// made only of slashes is returned as is so the reading is never empty.
pub fn reading(note: &Note) -> Result<&str, ConnectError> {
    let japanese = japanese(note)?;
    match japanese.rsplit('/').next() {
        Some(last) if !last.is_empty() => Ok(last),
        _ => {
            let headword = headword(note)?;
            Ok(if headword.is_empty() { japanese } else { headword })
        }
    }
}

pub fn gloss(note: &Note) -> Result<&str, ConnectError> {
    note.field(ENGLISH_FIELD).ok_or(ConnectError::MalformedNote(ENGLISH_FIELD))
}

/// `jmdictId` as given; `None` when missing or empty, so notes without an id
/// can never match remote terms that also lack one.
pub fn dictionary_id(note: &Note) -> Option<&str> {
    note.field(JMDICT_FIELD).filter(|id| !id.is_empty())
}

pub fn extract(note: &Note) -> Result<ExtractedFields, ConnectError> {
    Ok(ExtractedFields {
        headword: headword(note)?.to_string(),
        reading: reading(note)?.to_string(),
        gloss: gloss(note)?.to_string(),
        dictionary_id: dictionary_id(note).map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn note(japanese: &str) -> Note {
        let fields = HashMap::from([
            (JAPANESE_FIELD.to_string(), japanese.to_string()),
            (ENGLISH_FIELD.to_string(), "cat".to_string()),
        ]);
        Note { fields, deck_name: "1:A:X".to_string() }
    }

    #[test]
    fn reading_uses_last_segment() {
        let note = note("猫/ねこ");
        assert_eq!(headword(&note).unwrap(), "猫");
        assert_eq!(reading(&note).unwrap(), "ねこ");
    }

    #[test]
    fn empty_last_segment_falls_back_to_headword() {
        let note = note("猫//");
        assert_eq!(headword(&note).unwrap(), "猫");
        assert_eq!(reading(&note).unwrap(), "猫");
    }

    #[test]
    fn single_segment_is_both_headword_and_reading() {
        let note = note("ねこ");
        assert_eq!(headword(&note).unwrap(), "ねこ");
        assert_eq!(reading(&note).unwrap(), "ねこ");
    }

    #[test]
    fn reading_is_never_empty_for_non_empty_field() {
        assert_eq!(reading(&note("//")).unwrap(), "//");
        assert_eq!(reading(&note("/ねこ")).unwrap(), "ねこ");
    }

    #[test]
    fn missing_japanese_is_malformed() {
        let empty = Note { fields: HashMap::new(), deck_name: String::new() };
        assert!(matches!(headword(&empty), Err(ConnectError::MalformedNote("Japanese"))));
        assert!(matches!(reading(&empty), Err(ConnectError::MalformedNote("Japanese"))));
        assert!(matches!(gloss(&empty), Err(ConnectError::MalformedNote("English"))));
    }

    #[test]
    fn dictionary_id_absent_or_empty_is_none() {
        let mut note = note("猫/ねこ");
        assert_eq!(dictionary_id(&note), None);

        note.fields.insert(JMDICT_FIELD.to_string(), String::new());
        assert_eq!(dictionary_id(&note), None);

        note.fields.insert(JMDICT_FIELD.to_string(), " 1467640".to_string());
        assert_eq!(dictionary_id(&note), Some(" 1467640"));

        note.fields.insert(JMDICT_FIELD.to_string(), "1467640".to_string());
        assert_eq!(dictionary_id(&note), Some("1467640"));
    }

    #[test]
    fn extract_collects_everything() {
        let mut note = note("猫/ねこ");
        note.fields.insert(JMDICT_FIELD.to_string(), "1467640".to_string());
        let fields = extract(&note).unwrap();
        assert_eq!(
            fields,
            ExtractedFields {
                headword: "猫".to_string(),
                reading: "ねこ".to_string(),
                gloss: "cat".to_string(),
                dictionary_id: Some("1467640".to_string()),
            }
        );
    }
}

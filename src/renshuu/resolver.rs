//! Maps a flashcard note onto a remote term id.
//!
//! Candidates come from a headword search. The dictionary id is tried against
//! every candidate first; only then reading plus written form. Within a tier
//! the first candidate in remote order wins.

use tracing::debug;

use super::{
    types::RemoteTerm,
    RemoteApi,
};
use crate::{
    anki::{
        fields,
        types::{
            ExtractedFields,
            Note,
        },
    },
    core::ConnectError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(String),
    NoMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    DictionaryId,
    ReadingAndForm,
}

/// Remote errors from the search are returned unchanged.
pub async fn resolve(remote: &dyn RemoteApi, note: &Note) -> Result<Resolution, ConnectError> {
    let fields = fields::extract(note)?;
    let candidates = remote.search_terms(&fields.headword).await?;
    debug!("{} candidates for '{}'", candidates.len(), fields.headword);

    Ok(match best_match(&fields, &candidates) {
        Some((term, tier)) => {
            debug!("'{}' matched term {} via {:?}", fields.headword, term.id, tier);
            Resolution::Matched(term.id.as_string())
        }
        None => Resolution::NoMatch,
    })
}

pub fn best_match<'a>(
    fields: &ExtractedFields,
    candidates: &'a [RemoteTerm],
) -> Option<(&'a RemoteTerm, MatchTier)> {
    if let Some(dictionary_id) = fields.dictionary_id.as_deref() {
        let exact = candidates
            .iter()
            .find(|term| term.dictionary_id().as_deref() == Some(dictionary_id));
        if let Some(term) = exact {
            return Some((term, MatchTier::DictionaryId));
        }
    }

    candidates
        .iter()
        .find(|term| {
            term.reading() == fields.reading
                && term.surface_forms().contains(&fields.headword.as_str())
        })
        .map(|term| (term, MatchTier::ReadingAndForm))
}

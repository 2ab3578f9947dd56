use serde_json::{
    json,
    Value,
};
use tracing::{
    info,
    warn,
};

use super::{
    resolver::{
        self,
        Resolution,
    },
    RemoteApi,
};
use crate::{
    anki::{
        fields,
        types::Note,
    },
    core::{
        diagnostics,
        ConnectError,
    },
};

/// Error text the service returns when the term is already on the list.
pub const ALREADY_SCHEDULED: &str = "This term is already in this list.";

/// Returned for a completed assignment.
pub const ADDED: i64 = 1;

/// Resolves the note and puts the term on the list named by the note's deck.
/// An unresolvable note is not an error: it is logged and `null` is returned.
pub async fn add_note(remote: &dyn RemoteApi, note: &Note) -> Result<Value, ConnectError> {
    let list_id = note.list_id();

    let term_id = match resolver::resolve(remote, note).await? {
        Resolution::Matched(term_id) => term_id,
        Resolution::NoMatch => {
            let headword = fields::headword(note).unwrap_or_default();
            warn!("No matching term for '{}'", headword);
            diagnostics::record(format!("no match for '{}' (list {})", headword, list_id));
            return Ok(Value::Null);
        }
    };

    match remote.assign_to_list(&term_id, list_id).await {
        Ok(()) => {
            info!("Added term {} to list {}", term_id, list_id);
        }
        Err(ConnectError::Upstream(message)) if message == ALREADY_SCHEDULED => {
            info!("Term {} already on list {}", term_id, list_id);
        }
        Err(err) => return Err(err),
    }

    Ok(json!(ADDED))
}

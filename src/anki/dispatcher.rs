use std::{
    panic::AssertUnwindSafe,
    sync::Arc,
};

use futures::FutureExt;
use rayon::iter::{
    IntoParallelRefIterator,
    ParallelIterator,
};
use serde_json::{
    json,
    Value,
};
use tracing::{
    debug,
    info_span,
    Instrument,
};
use uuid::Uuid;

use crate::{
    anki::{
        envelope,
        request::{
            Call,
            Request,
            PROTOCOL_VERSION,
        },
        types::Note,
    },
    core::ConnectError,
    renshuu::{
        notes,
        schedules,
        Connector,
    },
};

pub const MODEL_NAMES: [&str; 2] = ["Default", "with jmdictId"];
pub const MODEL_FIELD_NAMES: [&str; 3] = ["Japanese", "English", "jmdictId"];

/// Entry point for the plugin protocol. Holds no per-request state.
#[derive(Clone)]
pub struct Dispatcher {
    connector: Arc<dyn Connector>,
}

impl Dispatcher {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }

    /// Always yields a body the plugin can read: either the action's result or
    /// a failure envelope.
    pub async fn dispatch(&self, body: &[u8]) -> Value {
        let request_id = Uuid::new_v4();
        let span = info_span!("request", id = %request_id);

        async {
            let outcome = match Request::parse(body) {
                Ok(request) => self.guarded(request).await,
                Err(err) => Err(err),
            };
            envelope::into_body(outcome)
        }
        .instrument(span)
        .await
    }

    async fn guarded(&self, request: Request) -> Result<Value, ConnectError> {
        let action = request.call.action();
        debug!("Dispatching {}", action.name());

        match AssertUnwindSafe(self.handle(request)).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(panic) => {
                let detail = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(ConnectError::Custom(format!("{} handler panicked: {}", action.name(), detail)))
            }
        }
    }

    async fn handle(&self, request: Request) -> Result<Value, ConnectError> {
        match request.call {
            Call::Version => Ok(json!(PROTOCOL_VERSION)),
            Call::ModelNames => Ok(json!(MODEL_NAMES)),
            Call::ModelFieldNames => Ok(json!(MODEL_FIELD_NAMES)),
            Call::StoreMediaFile => Ok(json!("")),
            Call::CanAddNotes(notes) => Ok(json!(can_add_notes(&notes))),
            Call::DeckNames => {
                let remote = self.connector.connect(&request.key);
                Ok(json!(schedules::schedule_names(remote.as_ref()).await?))
            }
            Call::AddNote(note) => {
                let remote = self.connector.connect(&request.key);
                notes::add_note(remote.as_ref(), &note).await
            }
        }
    }
}

/// One flag per note, in input order.
pub fn can_add_notes(notes: &[Note]) -> Vec<bool> {
    notes.par_iter().map(can_add_note).collect()
}

// Every note is currently addable.
fn can_add_note(_note: &Note) -> bool {
    true
}

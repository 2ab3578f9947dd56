//! Server side of the AnkiConnect protocol (version 2) as spoken by flashcard
//! plugins.

pub mod dispatcher;
pub mod envelope;
pub mod fields;
pub mod request;
pub mod types;

pub use dispatcher::Dispatcher;
pub use envelope::ResultEnvelope;
pub use request::{
    Action,
    Call,
    Request,
};
pub use types::{
    ExtractedFields,
    Note,
};

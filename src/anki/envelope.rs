use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;
use tracing::{
    error,
    warn,
};

use crate::core::{
    diagnostics,
    ConnectError,
};

/// Failure shape returned to the plugin. Successful calls return their result
/// directly, so `result` is always null when this is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl ResultEnvelope {
    pub fn failure(message: impl Into<String>) -> Self {
        Self { result: None, error: Some(message.into()) }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

impl From<ConnectError> for ResultEnvelope {
    fn from(err: ConnectError) -> Self {
        if err.is_expected() {
            warn!("Request failed: {err}");
            return ResultEnvelope::failure(err.to_string());
        }
        error!("Unhandled fault: {err}");
        diagnostics::record(format!("unhandled fault: {err}"));
        ResultEnvelope::failure(format!("internal error: {err}"))
    }
}

/// Body written back to the plugin: the raw result on success, the envelope
/// otherwise.
pub fn into_body(outcome: Result<Value, ConnectError>) -> Value {
    match outcome {
        Ok(value) => value,
        Err(err) => {
            let envelope: ResultEnvelope = err.into();
            serde_json::to_value(envelope).unwrap_or_else(|_| {
                serde_json::json!({ "result": null, "error": "internal error" })
            })
        }
    }
}

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("{0}")]
    Validation(String),

    #[error("Malformed note: missing field '{0}'")]
    MalformedNote(&'static str),

    /// Message taken verbatim from the remote `error` field.
    #[error("{0}")]
    Upstream(String),

    #[error("Remote service did not answer in time")]
    Timeout,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("ConnectError: {0}")]
    Custom(String),
}

impl ConnectError {
    /// Builds a validation error, collapsing every whitespace run (newlines
    /// included) into a single space.
    pub fn validation(message: impl AsRef<str>) -> Self {
        let collapsed = WHITESPACE.replace_all(message.as_ref().trim(), " ");
        ConnectError::Validation(collapsed.into_owned())
    }

    /// Errors the caller is expected to see as part of normal operation.
    /// Anything else is treated as an unhandled fault.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            ConnectError::Validation(_)
                | ConnectError::MalformedNote(_)
                | ConnectError::Upstream(_)
                | ConnectError::Timeout
        )
    }
}

impl From<reqwest::Error> for ConnectError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return ConnectError::Timeout;
        }
        ConnectError::Reqwest(Box::new(error))
    }
}

use std::time::Duration;

use reqwest::{
    header::{
        HeaderMap,
        HeaderValue,
        ACCEPT,
    },
    Client,
};

use crate::core::ConnectError;

const USER_AGENT: &str = concat!("renshuu-connect/", env!("CARGO_PKG_VERSION"), " (+reqwest)");

/// Shared outbound client. Every request made through it is bounded by `timeout`.
pub fn http_client(timeout: Duration) -> Result<Client, ConnectError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()
        .map_err(|e| ConnectError::Custom(format!("HTTP client build failed: {e}")))
}

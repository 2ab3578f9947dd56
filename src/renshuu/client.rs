use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    Client,
    Method,
    Response,
    StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{
    json,
    Value,
};
use tracing::debug;

use super::{
    types::{
        ListCatalog,
        RemoteTerm,
        SearchResponse,
    },
    Connector,
    RemoteApi,
};
use crate::core::ConnectError;

pub struct RenshuuClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RenshuuClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into(), api_key: api_key.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<T, ConnectError> {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut request =
            self.client.request(method, &url).bearer_auth(&self.api_key).query(query);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        parse_response(response).await
    }
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ConnectError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;
    interpret(status, &url, &text)
}

/// The `error` field is checked before anything else is read, then the HTTP
/// status; only a successful reply without an error is decoded.
pub(crate) fn interpret<T: DeserializeOwned>(
    status: StatusCode,
    url: &str,
    text: &str,
) -> Result<T, ConnectError> {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) if !status.is_success() => return Err(http_error(status, url)),
        // Empty 2xx bodies count as an empty object.
        Err(_) if text.trim().is_empty() => json!({}),
        Err(e) => return Err(e.into()),
    };

    if let Some(error) = upstream_error(&value) {
        return Err(ConnectError::Upstream(error));
    }
    if !status.is_success() {
        return Err(http_error(status, url));
    }
    Ok(serde_json::from_value(value)?)
}

fn http_error(status: StatusCode, url: &str) -> ConnectError {
    ConnectError::Upstream(format!("HTTP error {} from {}", status, url))
}

fn upstream_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl RemoteApi for RenshuuClient {
    async fn list_catalog(&self) -> Result<ListCatalog, ConnectError> {
        self.call(Method::GET, "lists", &[], None).await
    }

    async fn search_terms(&self, headword: &str) -> Result<Vec<RemoteTerm>, ConnectError> {
        let response: SearchResponse =
            self.call(Method::GET, "word/search", &[("value", headword)], None).await?;
        Ok(response.words)
    }

    async fn assign_to_list(&self, term_id: &str, list_id: &str) -> Result<(), ConnectError> {
        let path = format!("word/{term_id}");
        let _: Value =
            self.call(Method::PUT, &path, &[], Some(json!({ "list_id": list_id }))).await?;
        Ok(())
    }
}

/// Shares one pooled [`Client`] across requests; each request gets its own
/// credential.
#[derive(Clone)]
pub struct RenshuuConnector {
    client: Client,
    base_url: String,
}

impl RenshuuConnector {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }
}

impl Connector for RenshuuConnector {
    fn connect(&self, api_key: &str) -> Arc<dyn RemoteApi> {
        Arc::new(RenshuuClient::new(self.client.clone(), self.base_url.clone(), api_key))
    }
}

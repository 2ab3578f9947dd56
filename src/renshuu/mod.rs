use std::sync::Arc;

use async_trait::async_trait;

use crate::core::ConnectError;

pub mod client;
pub mod notes;
pub mod resolver;
pub mod schedules;
pub mod types;

pub use client::{
    RenshuuClient,
    RenshuuConnector,
};
pub use types::{
    ListCatalog,
    RemoteTerm,
};

/// Remote vocabulary service. Implementations must surface a non-empty
/// `error` field of any response as [`ConnectError::Upstream`].
#[async_trait]
pub trait RemoteApi: Send + Sync {
    async fn list_catalog(&self) -> Result<ListCatalog, ConnectError>;

    /// Candidates in the order the service returned them.
    async fn search_terms(&self, headword: &str) -> Result<Vec<RemoteTerm>, ConnectError>;

    async fn assign_to_list(&self, term_id: &str, list_id: &str) -> Result<(), ConnectError>;
}

/// Builds a remote handle bound to one request's credential.
pub trait Connector: Send + Sync {
    fn connect(&self, api_key: &str) -> Arc<dyn RemoteApi>;
}

use super::{
    types::ListCatalog,
    RemoteApi,
};
use crate::core::ConnectError;

pub const VOCAB_TERMTYPE: &str = "vocab";

/// `listId:groupTitle:title` for every vocabulary list, group order outer and
/// list order inner.
pub async fn schedule_names(remote: &dyn RemoteApi) -> Result<Vec<String>, ConnectError> {
    let catalog = remote.list_catalog().await?;
    Ok(flatten(&catalog))
}

pub fn flatten(catalog: &ListCatalog) -> Vec<String> {
    catalog
        .termtype_groups
        .iter()
        .filter(|termtype| termtype.termtype == VOCAB_TERMTYPE)
        .flat_map(|termtype| termtype.groups.iter())
        .flat_map(|group| {
            group
                .lists
                .iter()
                .map(move |list| format!("{}:{}:{}", list.list_id, group.title, list.title))
        })
        .collect()
}

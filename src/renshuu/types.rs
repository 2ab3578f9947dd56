use serde::{
    Deserialize,
    Serialize,
};

/// Identifiers arrive as either JSON strings or numbers depending on the
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Text(String),
    Number(i64),
}

impl RemoteId {
    pub fn as_string(&self) -> String {
        match self {
            RemoteId::Text(text) => text.clone(),
            RemoteId::Number(number) => number.to_string(),
        }
    }
}

impl std::fmt::Display for RemoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteId::Text(text) => f.write_str(text),
            RemoteId::Number(number) => write!(f, "{number}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlternateForm {
    Plain(String),
    Detailed {
        #[serde(default)]
        kanji_full: String,
    },
}

impl AlternateForm {
    /// Written part only; plain forms may carry a `/reading` suffix.
    pub fn written(&self) -> &str {
        let raw = match self {
            AlternateForm::Plain(text) => text.as_str(),
            AlternateForm::Detailed { kanji_full } => kanji_full.as_str(),
        };
        raw.split('/').next().unwrap_or(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteTerm {
    pub id: RemoteId,
    #[serde(default)]
    pub hiragana_full: String,
    #[serde(default)]
    pub kanji_full: String,
    #[serde(default)]
    pub aforms: Vec<AlternateForm>,
    #[serde(default)]
    pub edict_ent: Option<RemoteId>,
}

impl RemoteTerm {
    pub fn reading(&self) -> &str {
        &self.hiragana_full
    }

    /// Forms a note headword may be written as. Kana-only terms are matched
    /// on their reading.
    pub fn surface_forms(&self) -> Vec<&str> {
        if self.kanji_full.is_empty() {
            return vec![self.reading()];
        }
        self.aforms
            .iter()
            .map(AlternateForm::written)
            .chain(std::iter::once(self.kanji_full.as_str()))
            .collect()
    }

    pub fn dictionary_id(&self) -> Option<String> {
        self.edict_ent.as_ref().map(RemoteId::as_string).filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub words: Vec<RemoteTerm>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyList {
    pub list_id: RemoteId,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListGroup {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub lists: Vec<StudyList>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermTypeGroup {
    pub termtype: String,
    #[serde(default)]
    pub groups: Vec<ListGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListCatalog {
    #[serde(default)]
    pub termtype_groups: Vec<TermTypeGroup>,
}

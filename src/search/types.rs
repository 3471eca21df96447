use crate::directory::types::LoadDiagnostics;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub debug: Option<String>,
}

impl SearchParams {
    /// `debug=1`, `debug=true` and `debug=yes` all switch diagnostics on;
    /// anything else leaves them off.
    pub fn diagnostics_requested(&self) -> bool {
        matches!(self.debug.as_deref(), Some("1") | Some("true") | Some("yes"))
    }
}

/// Body of every `/search` reply. The endpoint answers HTTP 200 even when
/// the dataset failed to load: `success` flips to `false`, `results` stays
/// empty and `message` carries the human-readable reason.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub count: usize,
    pub results: Vec<SearchResultItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<LoadDiagnostics>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub id: String,
    pub name: String,
    pub address: String,
}

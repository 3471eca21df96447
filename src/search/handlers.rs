use super::engine;
use super::types::{SearchParams, SearchResponse, SearchResultItem};
use crate::directory::loader::DirectoryStore;
use axum::extract::Query;
use axum::{Extension, Json};
use std::sync::Arc;

/// `GET /search?q=<text>&debug=<flag>`
///
/// Always answers HTTP 200. A failed dataset load degrades to
/// `success: false` with a message rather than propagating a server error,
/// so the storefront can render an empty picker with an explanation.
pub async fn handle_search(
    Query(params): Query<SearchParams>,
    Extension(store): Extension<Arc<DirectoryStore>>,
) -> Json<SearchResponse> {
    let query = params.q.clone().unwrap_or_default();

    let table = match store.table() {
        Ok(table) => table,
        Err(err) => {
            tracing::error!("search unavailable: {err}");
            return Json(SearchResponse {
                success: false,
                query,
                count: 0,
                results: Vec::new(),
                message: Some(err.to_string()),
                diagnostics: None,
            });
        }
    };

    let results: Vec<SearchResultItem> = engine::search(&table.records, &query)
        .into_iter()
        .map(|record| SearchResultItem {
            id: record.id,
            name: record.name,
            address: record.address,
        })
        .collect();

    tracing::debug!("query {:?} matched {} of {} records", query, results.len(), table.records.len());

    let diagnostics = params
        .diagnostics_requested()
        .then(|| table.diagnostics.clone());

    Json(SearchResponse {
        success: true,
        count: results.len(),
        query,
        results,
        message: None,
        diagnostics,
    })
}

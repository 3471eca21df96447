use crate::directory::types::DirectoryRecord;
use once_cell::sync::Lazy;
use regex::Regex;

/// Upper bound on returned records per query.
pub const RESULT_LIMIT: usize = 25;
/// Queries shorter than this after normalization return no results.
pub const MIN_QUERY_LEN: usize = 2;

const NAME_WEIGHT: u32 = 5;
const ADDRESS_WEIGHT: u32 = 3;
const POSTCODE_BONUS: u32 = 6;

// One or two letters, a digit, an optional letter-or-digit, optional
// whitespace, a digit, two letters: the UK postcode shape, applied to the
// already lower-cased query.
static POSTCODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{1,2}[0-9][a-z0-9]?\s*[0-9][a-z]{2}$").expect("postcode pattern"));

pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

pub fn looks_like_postcode(query: &str) -> bool {
    POSTCODE_RE.is_match(query)
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Additive relevance score for one record. `compact_query` is the
/// whitespace-stripped query, passed only when the query is postcode-shaped;
/// the postcode comparison ignores whitespace on both sides so `ls14ap` and
/// `ls1 4ap` both hit `"... LS1 4AP"`. A postcode hit counts as an address
/// match too, on top of the bonus. A score of 0 means no match.
pub fn score_record(record: &DirectoryRecord, query: &str, compact_query: Option<&str>) -> u32 {
    let mut score = 0;

    if record.name.to_lowercase().contains(query) {
        score += NAME_WEIGHT;
    }

    let address = record.address.to_lowercase();
    let postcode_hit = compact_query
        .is_some_and(|compact| strip_whitespace(&address).contains(compact));

    if postcode_hit || address.contains(query) {
        score += ADDRESS_WEIGHT;
    }
    if postcode_hit {
        score += POSTCODE_BONUS;
    }

    score
}

/// Ranks records against a free-text query: highest score first, ties in
/// table order (the sort is stable and uses no secondary key), truncated to
/// [`RESULT_LIMIT`]. Queries under [`MIN_QUERY_LEN`] characters after
/// normalization yield an empty result by contract, not an error.
pub fn search(records: &[DirectoryRecord], query: &str) -> Vec<DirectoryRecord> {
    let query = normalize_query(query);
    if query.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }

    let compact_query = looks_like_postcode(&query).then(|| strip_whitespace(&query));

    let mut matches: Vec<(&DirectoryRecord, u32)> = Vec::new();
    for record in records {
        let score = score_record(record, &query, compact_query.as_deref());
        if score > 0 {
            matches.push((record, score));
        }
    }

    matches.sort_by(|a, b| b.1.cmp(&a.1));
    matches
        .into_iter()
        .take(RESULT_LIMIT)
        .map(|(record, _)| record.clone())
        .collect()
}

//! Core query entry points.
//!
//! These functions provide the "query as a function" API used by the
//! CLI and the daemon/server. They only borrow the records they are
//! given and never fail: malformed records degrade to fallback values.

use tracing::debug;

use crate::models::{
    QueryConfig, QueryRequest, QueryResult, QuerySummary, Record, RecordMatch,
    QUERY_RESULT_VERSION,
};
use crate::search::query::record_matches;
use crate::search::sort::sort_visible;

/// Filter and order `records` for display.
///
/// Returns references into `records`, so callers can map results back
/// to whatever handle they hold for each record.
pub fn visible<'a>(records: &'a [Record], config: &QueryConfig) -> Vec<&'a Record> {
    visible_indices(records, config)
        .into_iter()
        .map(|index| &records[index])
        .collect()
}

/// Same as [`visible`], but yields 0-based input positions.
pub fn visible_indices(records: &[Record], config: &QueryConfig) -> Vec<usize> {
    let mut shown: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record_matches(record, config.field, &config.keyword))
        .map(|(index, _)| index)
        .collect();

    sort_visible(records, &mut shown, config.sort);
    shown
}

/// Execute a query request and wrap the visible records in a
/// versioned `QueryResult`.
pub fn run_query(request: QueryRequest) -> QueryResult {
    let indices = visible_indices(&request.records, &request.config);
    let visible_records = indices.len();
    let limit = request.limit.unwrap_or(usize::MAX);

    let matches: Vec<RecordMatch> = indices
        .into_iter()
        .take(limit)
        .map(|index| RecordMatch {
            index,
            record: request.records[index].clone(),
        })
        .collect();

    let truncated = matches.len() < visible_records;

    debug!(
        keyword = %request.config.keyword,
        field = ?request.config.field,
        sort = ?request.config.sort,
        total = request.records.len(),
        visible = visible_records,
        "query evaluated"
    );

    QueryResult {
        version: QUERY_RESULT_VERSION.to_string(),
        keyword: request.config.keyword,
        field: request.config.field,
        sort: request.config.sort,
        matches,
        summary: QuerySummary {
            total_records: request.records.len(),
            visible_records,
            truncated,
        },
    }
}

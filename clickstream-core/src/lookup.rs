use crate::dataset::ClickstreamLookup;
use crate::models::{ClickstreamEntry, QueryResult};

/// Maximum number of entries returned per direction.
pub const MAX_ENTRIES: usize = 10;

/// First `MAX_ENTRIES` entries for `title`, in stored order.
///
/// Stored order is trusted as-is; nothing is re-sorted here.
pub fn top_entries<'a, L>(mapping: &'a L, title: &str) -> &'a [ClickstreamEntry]
where
    L: ClickstreamLookup + ?Sized,
{
    let entries = mapping.lookup(title);
    &entries[..entries.len().min(MAX_ENTRIES)]
}

/// Assemble the response body from already truncated entry lists.
pub fn build_query_result(
    title: &str,
    sources: &[ClickstreamEntry],
    targets: &[ClickstreamEntry],
) -> QueryResult {
    QueryResult {
        title: title.to_string(),
        sources: sources.to_vec(),
        targets: targets.to_vec(),
    }
}

/// Look `title` up in both directions and build the response.
pub fn query<S, T>(sources: &S, targets: &T, title: &str) -> QueryResult
where
    S: ClickstreamLookup + ?Sized,
    T: ClickstreamLookup + ?Sized,
{
    build_query_result(title, top_entries(sources, title), top_entries(targets, title))
}

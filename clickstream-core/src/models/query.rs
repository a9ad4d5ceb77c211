use serde::{Deserialize, Serialize};

use super::ClickstreamEntry;

/// Response body for a single title lookup.
///
/// Field order is the serialized key order: `title`, `sources`, `targets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    pub title: String,
    pub sources: Vec<ClickstreamEntry>,
    pub targets: Vec<ClickstreamEntry>,
}

use serde::{Deserialize, Serialize};

/// One row of navigation statistics for a page.
///
/// Always serialized with named fields. Deserialization also accepts the
/// positional `[page, type, count]` triple emitted by the dataset pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEntry")]
pub struct ClickstreamEntry {
    pub page: String,
    #[serde(rename = "type")]
    pub link_type: String,
    pub count: u64,
}

impl ClickstreamEntry {
    pub fn new(page: impl Into<String>, link_type: impl Into<String>, count: u64) -> Self {
        Self {
            page: page.into(),
            link_type: link_type.into(),
            count,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Triple(String, String, u64),
    Record {
        page: String,
        #[serde(rename = "type")]
        link_type: String,
        count: u64,
    },
}

impl From<RawEntry> for ClickstreamEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Triple(page, link_type, count)
            | RawEntry::Record {
                page,
                link_type,
                count,
            } => Self {
                page,
                link_type,
                count,
            },
        }
    }
}

pub mod config;
pub mod dataset;
pub mod error;
pub mod lookup;
pub mod models;
pub mod title;

pub use config::ClickstreamConfig;
pub use dataset::{ClickstreamLookup, ClickstreamMapping, Dataset, DatasetFormat};
pub use error::ClickstreamError;
pub use lookup::{top_entries, MAX_ENTRIES};
pub use models::{ClickstreamEntry, QueryResult};
pub use title::normalize_title;

pub mod entry;
pub mod query;

pub use entry::ClickstreamEntry;
pub use query::QueryResult;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClickstreamError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON decode error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("MessagePack decode error in {}: {source}", .path.display())]
    MessagePack {
        path: PathBuf,
        #[source]
        source: rmp_serde::decode::Error,
    },

    #[error("Unsupported dataset format for {}: expected .json, .msgpack or .mpk", .0.display())]
    UnsupportedFormat(PathBuf),
}

//! In-memory clickstream dataset.
//!
//! Two read-only mappings (`sources` and `targets`) keyed by normalized page
//! title. Each value is the ordered list of neighbouring pages exactly as the
//! offline pipeline wrote it. The dataset is loaded once before the listener
//! binds and never mutated afterwards, so handlers share it through an `Arc`
//! without locking.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Deserialize;

use crate::config::DatasetConfig;
use crate::error::ClickstreamError;
use crate::lookup;
use crate::models::{ClickstreamEntry, QueryResult};

/// Read access to one clickstream mapping.
pub trait ClickstreamLookup: Send + Sync {
    /// Entries recorded for `title`, in stored order. Empty when the title is unknown.
    fn lookup(&self, title: &str) -> &[ClickstreamEntry];
}

/// On-disk encodings a mapping can be loaded from, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    MessagePack,
}

impl DatasetFormat {
    pub fn from_path(path: &Path) -> Result<Self, ClickstreamError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("msgpack") | Some("mpk") => Ok(Self::MessagePack),
            _ => Err(ClickstreamError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ClickstreamMapping {
    entries: HashMap<String, Vec<ClickstreamEntry>>,
}

impl ClickstreamMapping {
    pub fn new(entries: HashMap<String, Vec<ClickstreamEntry>>) -> Self {
        Self { entries }
    }

    /// Number of titles with recorded data.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries across all titles.
    pub fn total_entries(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Decode a mapping from raw bytes in the given format. `path` is only
    /// used for error reporting.
    pub fn decode(bytes: &[u8], format: DatasetFormat, path: &Path) -> Result<Self, ClickstreamError> {
        match format {
            DatasetFormat::Json => {
                serde_json::from_slice(bytes).map_err(|source| ClickstreamError::Json {
                    path: path.to_path_buf(),
                    source,
                })
            }
            DatasetFormat::MessagePack => {
                rmp_serde::from_slice(bytes).map_err(|source| ClickstreamError::MessagePack {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClickstreamError> {
        let path = path.as_ref();
        let format = DatasetFormat::from_path(path)?;
        let bytes = std::fs::read(path).map_err(|source| ClickstreamError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode(&bytes, format, path)
    }
}

impl ClickstreamLookup for ClickstreamMapping {
    fn lookup(&self, title: &str) -> &[ClickstreamEntry] {
        self.entries.get(title).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl FromIterator<(String, Vec<ClickstreamEntry>)> for ClickstreamMapping {
    fn from_iter<I: IntoIterator<Item = (String, Vec<ClickstreamEntry>)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Both directions of the clickstream, owned for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub sources: ClickstreamMapping,
    pub targets: ClickstreamMapping,
}

impl Dataset {
    pub fn new(sources: ClickstreamMapping, targets: ClickstreamMapping) -> Self {
        Self { sources, targets }
    }

    pub fn load(config: &DatasetConfig) -> Result<Self, ClickstreamError> {
        let sources = load_logged("sources", PathBuf::from(&config.sources_path))?;
        let targets = load_logged("targets", PathBuf::from(&config.targets_path))?;
        Ok(Self::new(sources, targets))
    }

    /// Top sources and targets for an already-normalized title.
    pub fn query(&self, title: &str) -> QueryResult {
        lookup::query(&self.sources, &self.targets, title)
    }
}

fn load_logged(direction: &str, path: PathBuf) -> Result<ClickstreamMapping, ClickstreamError> {
    let start = Instant::now();
    let mapping = ClickstreamMapping::load(&path)?;
    tracing::info!(
        direction,
        path = %path.display(),
        titles = mapping.len(),
        entries = mapping.total_entries(),
        took_ms = start.elapsed().as_millis() as u64,
        "Loaded clickstream mapping"
    );
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SOURCES_JSON: &str = r#"{
        "Frida_Kahlo": [["Diego_Rivera", "link", 120], ["Mexico", "link", 80]],
        "Diego_Rivera": [{"page": "Frida_Kahlo", "type": "link", "count": 95}]
    }"#;

    fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DatasetFormat::from_path(Path::new("data/sources.json")).unwrap(),
            DatasetFormat::Json
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("sources.MSGPACK")).unwrap(),
            DatasetFormat::MessagePack
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("sources.mpk")).unwrap(),
            DatasetFormat::MessagePack
        );
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = DatasetFormat::from_path(Path::new("sources.pkl")).unwrap_err();
        assert!(matches!(err, ClickstreamError::UnsupportedFormat(_)));

        let err = DatasetFormat::from_path(Path::new("sources")).unwrap_err();
        assert!(matches!(err, ClickstreamError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_json_mixed_layouts() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "sources.json", SOURCES_JSON.as_bytes());

        let mapping = ClickstreamMapping::load(&path).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.total_entries(), 3);
        assert_eq!(
            mapping.lookup("Frida_Kahlo"),
            &[
                ClickstreamEntry::new("Diego_Rivera", "link", 120),
                ClickstreamEntry::new("Mexico", "link", 80),
            ]
        );
        assert_eq!(
            mapping.lookup("Diego_Rivera"),
            &[ClickstreamEntry::new("Frida_Kahlo", "link", 95)]
        );
    }

    #[test]
    fn test_load_msgpack() {
        let mut raw: HashMap<String, Vec<(String, String, u64)>> = HashMap::new();
        raw.insert(
            "Frida_Kahlo".to_string(),
            vec![
                ("other-search".to_string(), "external".to_string(), 5000),
                ("Diego_Rivera".to_string(), "link".to_string(), 120),
            ],
        );
        let bytes = rmp_serde::to_vec(&raw).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "targets.msgpack", &bytes);

        let mapping = ClickstreamMapping::load(&path).unwrap();
        assert_eq!(mapping.lookup("Frida_Kahlo").len(), 2);
        assert_eq!(mapping.lookup("Frida_Kahlo")[0].page, "other-search");
        assert_eq!(mapping.lookup("Frida_Kahlo")[0].link_type, "external");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClickstreamMapping::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ClickstreamError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn test_corrupt_json_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "sources.json", b"{\"Frida_Kahlo\": [[\"Mexico\"");
        let err = ClickstreamMapping::load(&path).unwrap_err();
        assert!(matches!(err, ClickstreamError::Json { .. }));
    }

    #[test]
    fn test_corrupt_msgpack_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "sources.mpk", &[0xc1, 0x00, 0xff]);
        let err = ClickstreamMapping::load(&path).unwrap_err();
        assert!(matches!(err, ClickstreamError::MessagePack { .. }));
    }

    #[test]
    fn test_lookup_absent_title_is_empty() {
        let mapping = ClickstreamMapping::default();
        assert!(mapping.is_empty());
        assert!(mapping.lookup("Frida_Kahlo").is_empty());
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let mapping: ClickstreamMapping = [(
            "Frida_Kahlo".to_string(),
            vec![ClickstreamEntry::new("Mexico", "link", 80)],
        )]
        .into_iter()
        .collect();

        assert_eq!(mapping.lookup("Frida_Kahlo").len(), 1);
        assert!(mapping.lookup("frida_kahlo").is_empty());
        assert!(mapping.lookup("Frida Kahlo").is_empty());
    }

    #[test]
    fn test_dataset_load_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let sources = write(dir.path(), "sources.json", SOURCES_JSON.as_bytes());
        let targets = write(dir.path(), "targets.json", b"{}");

        let config = DatasetConfig {
            sources_path: sources.to_string_lossy().into_owned(),
            targets_path: targets.to_string_lossy().into_owned(),
        };
        let dataset = Dataset::load(&config).unwrap();
        assert_eq!(dataset.sources.len(), 2);
        assert!(dataset.targets.is_empty());

        let result = dataset.query("Frida_Kahlo");
        assert_eq!(result.sources.len(), 2);
        assert!(result.targets.is_empty());
    }

    #[test]
    fn test_dataset_load_fails_on_bad_targets() {
        let dir = tempfile::tempdir().unwrap();
        let sources = write(dir.path(), "sources.json", SOURCES_JSON.as_bytes());

        let config = DatasetConfig {
            sources_path: sources.to_string_lossy().into_owned(),
            targets_path: dir.path().join("targets.pkl").to_string_lossy().into_owned(),
        };
        assert!(matches!(
            Dataset::load(&config),
            Err(ClickstreamError::UnsupportedFormat(_))
        ));
    }
}

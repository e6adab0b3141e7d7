//! In-memory dataset and its loaders.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::error::{BairroError, Result};
use crate::merge::{merge_records, MergeReport};
use crate::record::{name_key, Record};

use super::pipe::parse_pipe;

/// Backing encoding of a dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    /// A JSON array of record objects.
    Json,
    /// One pipe-delimited record per line.
    Pipe,
}

impl DatasetFormat {
    /// Detect the format from file contents.
    ///
    /// A document whose first non-whitespace character is `[` or `{` is
    /// JSON; anything else is read as pipe lines. A leading byte order mark
    /// is ignored.
    pub fn detect(contents: &str) -> Self {
        match strip_bom(contents).trim_start().chars().next() {
            Some('[' | '{') => DatasetFormat::Json,
            _ => DatasetFormat::Pipe,
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(DatasetFormat::Json),
            "txt" | "psv" | "pipe" => Some(DatasetFormat::Pipe),
            _ => None,
        }
    }
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetFormat::Json => write!(f, "json"),
            DatasetFormat::Pipe => write!(f, "pipe"),
        }
    }
}

impl FromStr for DatasetFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(DatasetFormat::Json),
            "pipe" | "psv" | "txt" => Ok(DatasetFormat::Pipe),
            _ => Err(format!("Unknown dataset format: {}. Use json or pipe.", s)),
        }
    }
}

/// Metadata about where a dataset was loaded from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// File name without path (empty for in-memory datasets).
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// SHA-256 hash of the bytes read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    pub format: DatasetFormat,
    pub record_count: usize,
    pub loaded_at: DateTime<Utc>,
}

impl DatasetMetadata {
    fn in_memory(format: DatasetFormat, record_count: usize) -> Self {
        Self {
            file: String::new(),
            path: None,
            hash: None,
            format,
            record_count,
            loaded_at: Utc::now(),
        }
    }
}

/// The restaurant dataset, owned by the caller and passed to each engine.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub metadata: DatasetMetadata,
}

impl Dataset {
    /// Wrap records that are already in memory.
    pub fn from_records(records: Vec<Record>) -> Self {
        let metadata = DatasetMetadata::in_memory(DatasetFormat::Json, records.len());
        Self { records, metadata }
    }

    /// Parse a JSON array of record objects.
    ///
    /// Entries that are not objects are skipped; malformed fields inside an
    /// object are coerced (see [`Record`]).
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let records = parse_json_records(contents)?;
        Ok(Self {
            metadata: DatasetMetadata::in_memory(DatasetFormat::Json, records.len()),
            records,
        })
    }

    /// Parse pipe-delimited lines.
    pub fn from_pipe_str(contents: &str) -> Result<Self> {
        let records = parse_pipe(contents)?;
        Ok(Self {
            metadata: DatasetMetadata::in_memory(DatasetFormat::Pipe, records.len()),
            records,
        })
    }

    /// Load a dataset file, detecting its format from the contents.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, None)
    }

    /// Load a dataset file, optionally forcing the format.
    pub fn load_with(path: impl AsRef<Path>, format: Option<DatasetFormat>) -> Result<Self> {
        let path = path.as_ref();

        let bytes = fs::read(path).map_err(|e| BairroError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let contents = String::from_utf8(bytes).map_err(|e| {
            BairroError::Persistence(format!("'{}' is not valid UTF-8: {}", path.display(), e))
        })?;
        let contents = strip_bom(&contents);

        let format = format.unwrap_or_else(|| DatasetFormat::detect(contents));
        let records = match format {
            DatasetFormat::Json => parse_json_records(contents)?,
            DatasetFormat::Pipe => parse_pipe(contents)?,
        };

        if records.is_empty() {
            warn!(path = %path.display(), "dataset contains no records");
        }
        info!(path = %path.display(), %format, records = records.len(), "loaded dataset");

        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            metadata: DatasetMetadata {
                file,
                path: Some(path.to_path_buf()),
                hash: Some(hash),
                format,
                record_count: records.len(),
                loaded_at: Utc::now(),
            },
            records,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Find a record by name, ignoring case and surrounding whitespace.
    pub fn find(&self, name: &str) -> Option<&Record> {
        let key = name_key(name);
        self.records.iter().find(|r| r.name_key() == key)
    }

    /// Sorted, de-duplicated cuisine tags across the dataset.
    pub fn cuisines(&self) -> Vec<String> {
        unique_values(self.records.iter().flat_map(|r| r.cuisine.iter()))
    }

    /// Sorted, de-duplicated dietary tags across the dataset.
    pub fn diet_options(&self) -> Vec<String> {
        unique_values(self.records.iter().flat_map(|r| r.diet_options.iter()))
    }

    /// Merge an import batch into this dataset.
    ///
    /// The change lives in memory only until the caller saves.
    pub fn merge(&mut self, incoming: impl IntoIterator<Item = Record>) -> MergeReport {
        let report = merge_records(&mut self.records, incoming);
        self.metadata.record_count = self.records.len();
        report
    }
}

fn unique_values<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    values
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn strip_bom(contents: &str) -> &str {
    contents.strip_prefix('\u{FEFF}').unwrap_or(contents)
}

pub(crate) fn parse_json_records(contents: &str) -> Result<Vec<Record>> {
    let contents = strip_bom(contents);
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(contents)?;
    let Value::Array(items) = value else {
        return Err(BairroError::Parse {
            line: 1,
            message: "expected a JSON array of restaurant objects".to_string(),
        });
    };

    let mut records = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            warn!(position, "skipping dataset entry that is not an object");
            continue;
        }
        records.push(serde_json::from_value(item)?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(DatasetFormat::detect("  \n[{\"name\":\"A\"}]"), DatasetFormat::Json);
        assert_eq!(DatasetFormat::detect("A | italiana"), DatasetFormat::Pipe);
        assert_eq!(DatasetFormat::detect("{\"name\": \"A\"}"), DatasetFormat::Json);
        assert_eq!(DatasetFormat::detect("\u{FEFF}[]"), DatasetFormat::Json);
        assert_eq!(
            DatasetFormat::from_path(Path::new("data/pinheiros.JSON")),
            Some(DatasetFormat::Json)
        );
        assert_eq!(DatasetFormat::from_path(Path::new("data/notes.md")), None);
    }

    #[test]
    fn test_json_skips_non_objects() {
        let dataset = Dataset::from_json_str(r#"[{"name": "A"}, "oops", 3, {"name": "B"}]"#).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_json_requires_array() {
        assert!(Dataset::from_json_str(r#"{"name": "A"}"#).is_err());
        assert!(Dataset::from_json_str("").unwrap().is_empty());
    }

    #[test]
    fn test_facets_sorted_unique() {
        let dataset = Dataset::from_records(vec![
            Record::new("A").with_cuisine(["japonesa", "ramen"]),
            Record::new("B").with_cuisine(["italiana", "japonesa "]),
            Record::new("C").with_diet_options(["vegano", ""]),
        ]);

        assert_eq!(dataset.cuisines(), vec!["italiana", "japonesa", "ramen"]);
        assert_eq!(dataset.diet_options(), vec!["vegano"]);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let dataset = Dataset::from_records(vec![Record::new("Otoshi Izakaya")]);
        assert!(dataset.find("otoshi izakaya ").is_some());
        assert!(dataset.find("Otoshi").is_none());
    }

    #[test]
    fn test_merge_updates_count() {
        let mut dataset = Dataset::from_records(vec![Record::new("A")]);
        let report = dataset.merge(vec![Record::new("B")]);

        assert_eq!(report.added, vec!["B"]);
        assert_eq!(dataset.metadata.record_count, 2);
    }
}

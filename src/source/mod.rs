//! Record sources for the demo.
//!
//! Records come from a JSON array file or are generated in memory:
//! - File loading parses the whole array at once (parse at the boundary)
//! - Generation produces a mix of plain, rich, icon and icon-less records

use crate::model::{Record, RecordsError, RichNode, UserDefined};
use std::path::{Path, PathBuf};
use tracing::info;

/// Icon source that the demo surface treats as failing to load.
pub const BROKEN_ICON: &str = "missing.png";

/// Where the demo takes its records from.
///
/// Sum type enforces exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    /// JSON array file.
    File(PathBuf),
    /// `n` generated records.
    Generated(usize),
}

impl RecordSource {
    /// Pick a source: a file if given, otherwise `count` generated records.
    pub fn detect(file: Option<PathBuf>, count: usize) -> Self {
        match file {
            Some(path) => RecordSource::File(path),
            None => RecordSource::Generated(count),
        }
    }

    /// Produce the records.
    ///
    /// # Errors
    ///
    /// Returns `RecordsError` if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Vec<Record>, RecordsError> {
        match self {
            RecordSource::File(path) => load_records(path),
            RecordSource::Generated(count) => Ok(generate_records(*count)),
        }
    }
}

/// Read a JSON array of records.
///
/// # Errors
///
/// Returns `RecordsError::Read` for I/O failures and `RecordsError::Parse`
/// when the content is not an array of records.
pub fn load_records(path: &Path) -> Result<Vec<Record>, RecordsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| RecordsError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let records = parse_records(&contents, path)?;
    info!(path = %path.display(), count = records.len(), "Records loaded");
    Ok(records)
}

/// Parse a JSON array of records. `origin` is only used in errors.
///
/// # Errors
///
/// Returns `RecordsError::Parse` when the content is not an array of records.
pub fn parse_records(json: &str, origin: &Path) -> Result<Vec<Record>, RecordsError> {
    serde_json::from_str(json).map_err(|e| RecordsError::Parse {
        path: origin.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Generate `count` sample records.
///
/// Every 5th record has rich text, every 3rd a prefix icon, every 4th a
/// suffix icon, every 7th a broken prefix icon and every 11th collapses its
/// prefix column.
pub fn generate_records(count: usize) -> Vec<Record> {
    (0..count).map(generate_record).collect()
}

fn generate_record(i: usize) -> Record {
    let mut record = if i % 5 == 0 {
        Record::new(
            RichNode::new("span")
                .with_child(RichNode::new("b").with_text(format!("Entry {i}")))
                .with_child(RichNode::new("i").with_text(" (rich)")),
        )
    } else {
        Record::new(format!("Entry {i}"))
    };
    if i % 7 == 0 {
        record = record.with_prefix_icon(BROKEN_ICON);
    } else if i % 3 == 0 {
        record = record.with_prefix_icon("folder.png");
    }
    if i % 4 == 0 {
        record = record.with_suffix_icon("arrow.png");
    }
    if i % 11 == 0 {
        record = record.without_prefix_icon();
    }
    record.with_user_defined(UserDefined::default().with_property("id", i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordText;
    use std::fs;

    #[test]
    fn detect_prefers_file() {
        let path = PathBuf::from("records.json");
        assert_eq!(
            RecordSource::detect(Some(path.clone()), 10),
            RecordSource::File(path)
        );
        assert_eq!(RecordSource::detect(None, 10), RecordSource::Generated(10));
    }

    #[test]
    fn generated_records_have_requested_count() {
        let records = RecordSource::Generated(50).load().unwrap();
        assert_eq!(records.len(), 50);
        assert_eq!(records[1].text.plain_text(), "Entry 1");
    }

    #[test]
    fn generated_records_mix_features() {
        let records = generate_records(30);
        assert!(matches!(records[5].text, RecordText::Rich(_)));
        assert_eq!(records[5].text.plain_text(), "Entry 5 (rich)");
        assert_eq!(records[3].icon_url1.as_deref(), Some("folder.png"));
        assert_eq!(records[7].icon_url1.as_deref(), Some(BROKEN_ICON));
        assert_eq!(records[8].icon_url2.as_deref(), Some("arrow.png"));
        assert!(records[22].no_prefix_icon);
        assert!(records.iter().all(|r| !r.is_selected));
    }

    #[test]
    fn parse_reads_camel_case_fields() {
        let json = r#"[
            {"text": "Open", "iconUrl1": "open.png", "isSelected": true},
            {"text": "Close", "noSuffixIcon": true,
             "userDefined": {"attributes": {"title": "Shut", "hidden": false}}}
        ]"#;
        let records = parse_records(json, Path::new("inline.json")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].icon_url1.as_deref(), Some("open.png"));
        assert!(records[0].is_selected);
        assert!(records[1].no_suffix_icon);
        let attributes = &records[1].user_defined.as_ref().unwrap().attributes;
        assert_eq!(attributes.get("title"), Some(&Some("Shut".to_string())));
        assert_eq!(attributes.get("hidden"), Some(&None));
    }

    #[test]
    fn parse_error_names_origin() {
        let err = parse_records("{not json", Path::new("bad.json")).unwrap_err();
        match err {
            RecordsError::Parse { path, .. } => assert_eq!(path, PathBuf::from("bad.json")),
            other => panic!("Expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let err = load_records(Path::new("/nonexistent/records.json")).unwrap_err();
        assert!(matches!(err, RecordsError::Read { .. }));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join("vlist_test_records.json");
        fs::write(&path, r#"[{"text": "a"}, {"text": "b"}]"#).unwrap();
        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        fs::remove_file(path).ok();
    }
}

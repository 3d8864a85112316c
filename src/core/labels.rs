use crate::domain::model::LabelList;
use crate::utils::error::{InferenceError, Result};
use std::path::Path;

pub const DEFAULT_CLASS_COUNT: usize = 4;

pub fn default_labels() -> LabelList {
    (0..DEFAULT_CLASS_COUNT)
        .map(|i| format!("class_{}", i))
        .collect()
}

/// Resolve the label list from the label file contents, if there was a file.
///
/// A missing file falls back to [`default_labels`]. A file that is present but
/// not a JSON array of strings is rejected: silently falling back would hide a
/// broken deployment behind placeholder names. The caller knows where the
/// contents came from and attaches that to the error.
pub fn resolve_labels(contents: Option<&str>) -> serde_json::Result<LabelList> {
    match contents {
        None => Ok(default_labels()),
        Some(raw) => serde_json::from_str(raw),
    }
}

/// 讀取標籤檔；檔案不存在時使用預設標籤
pub fn load_labels<P: AsRef<Path>>(path: P) -> Result<LabelList> {
    let path = path.as_ref();

    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "Label file not found, using {} default labels",
            DEFAULT_CLASS_COUNT
        );
        return Ok(default_labels());
    }

    let contents = std::fs::read_to_string(path)?;
    resolve_labels(Some(&contents)).map_err(|e| InferenceError::LabelFile {
        path: path.display().to_string(),
        message: format!("expected a JSON array of strings ({})", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_labels() {
        assert_eq!(
            default_labels(),
            vec!["class_0", "class_1", "class_2", "class_3"]
        );
        assert_eq!(resolve_labels(None).unwrap(), default_labels());
    }

    #[test]
    fn test_resolve_valid_array() {
        let labels = resolve_labels(Some(r#"["cardboard", "glass", "metal"]"#)).unwrap();
        assert_eq!(labels, vec!["cardboard", "glass", "metal"]);
    }

    #[test]
    fn test_resolve_empty_array_is_allowed() {
        assert!(resolve_labels(Some("[]")).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_rejects_malformed() {
        for raw in [
            "not json",
            r#"{"0": "glass"}"#,
            r#"["glass", 3]"#,
            r#""glass""#,
            "",
        ] {
            assert!(resolve_labels(Some(raw)).is_err(), "{}", raw);
        }
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let labels = load_labels(dir.path().join("class_names.json")).unwrap();
        assert_eq!(labels, default_labels());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all("[\"plastic\", \"organic\", \"e-waste\"]".as_bytes())
            .unwrap();

        let labels = load_labels(file.path()).unwrap();
        assert_eq!(labels, vec!["plastic", "organic", "e-waste"]);
    }

    #[test]
    fn test_load_malformed_file_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[plastic,").unwrap();

        match load_labels(file.path()).unwrap_err() {
            InferenceError::LabelFile { path, message } => {
                assert_eq!(path, file.path().display().to_string());
                assert!(!path.is_empty());
                assert!(message.starts_with("expected a JSON array of strings"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

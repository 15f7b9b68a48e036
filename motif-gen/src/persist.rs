//! JSON artifact writer

use motif_common::{Error, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Write `value` as pretty JSON atomically (temp file + rename)
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, content)?;
    std::fs::rename(&temp_path, path)?;
    info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_and_cleans_temp() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("static").join("out.json");

        write_json_atomic(&target, &vec![1, 2, 3]).unwrap();

        assert!(!target.with_extension("json.tmp").exists());
        let content = std::fs::read_to_string(&target).unwrap();
        assert_eq!(content, "[\n  1,\n  2,\n  3\n]");
    }

    #[test]
    fn test_write_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("out.json");
        std::fs::write(&target, "stale").unwrap();

        write_json_atomic(&target, &["fresh"]).unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "[\n  \"fresh\"\n]");
    }
}

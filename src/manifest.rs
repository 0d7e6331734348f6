// ABOUTME: Append-only export manifest as line-delimited JSON
// ABOUTME: One object per exported document; never rewritten during a run

use crate::{Error, ManifestEntry, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct Manifest {
    path: PathBuf,
}

impl Manifest {
    /// Prepare a manifest at `path`, creating parent directories. The file
    /// itself is created lazily on the first append.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Manifest { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, entry: &ManifestEntry) -> Result<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Read every entry back, in append order. A missing file is an empty
    /// manifest, not an error.
    pub fn read_entries(path: &Path) -> Result<Vec<ManifestEntry>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path)?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(Error::Protocol))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(doc_id: &str, title: &str) -> ManifestEntry {
        ManifestEntry {
            doc_id: doc_id.into(),
            title: title.into(),
            file_path: format!("/exports/{}.md", title),
        }
    }

    #[test]
    fn test_append_and_read_back_in_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("manifest.jsonl");

        let mut manifest = Manifest::open(&path).unwrap();
        manifest.append(&entry("doc1", "First")).unwrap();
        manifest.append(&entry("doc2", "Second")).unwrap();

        let entries = Manifest::read_entries(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].doc_id, "doc1");
        assert_eq!(entries[1].doc_id, "doc2");
    }

    #[test]
    fn test_each_line_is_standalone_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("manifest.jsonl");

        let mut manifest = Manifest::open(&path).unwrap();
        manifest.append(&entry("doc1", "First")).unwrap();
        manifest.append(&entry("doc2", "Second")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        for line in content.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.is_object());
        }
    }

    #[test]
    fn test_read_missing_manifest_is_empty() {
        let temp = TempDir::new().unwrap();
        let entries = Manifest::read_entries(&temp.path().join("missing.jsonl")).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("manifest.jsonl");

        let mut manifest = Manifest::open(&path).unwrap();
        manifest.append(&entry("doc1", "First")).unwrap();
        assert!(path.exists());
    }
}

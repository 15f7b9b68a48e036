//! Catalog fixtures for pipeline tests

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Throwaway catalog directory
pub struct TestCatalog {
    pub dir: TempDir,
}

impl TestCatalog {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn album_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Write `<stem>.yaml` with an album header and track documents
    pub fn album(&self, stem: &str, title: &str, groups: &[&str], tracks: &[String]) -> PathBuf {
        let mut content = format!("Album: {}\nGroups:\n", title);
        for group in groups {
            content.push_str(&format!("  - {}\n", group));
        }
        for track in tracks {
            content.push_str("---\n");
            content.push_str(track);
        }
        let path = self.dir.path().join(format!("{}.yaml", stem));
        std::fs::write(&path, content).unwrap();
        path
    }
}

/// A track document with a YouTube URL and the given references
pub fn track(name: &str, artist: &str, references: &[&str]) -> String {
    let mut doc = format!(
        "Track: {}\nArtists:\n  - {}\nURLs:\n  - \"https://www.youtube.com/watch?v={}\"\n",
        name,
        artist,
        name.replace(' ', "_")
    );
    if !references.is_empty() {
        doc.push_str("Referenced Tracks:\n");
        for reference in references {
            doc.push_str(&format!("  - {}\n", reference));
        }
    }
    doc
}

/// A track document without any playable URL
pub fn unplayable_track(name: &str) -> String {
    format!(
        "Track: {}\nArtists:\n  - Toby Fox\nURLs:\n  - \"https://homestuck.bandcamp.com/track/x\"\n",
        name
    )
}

use crate::app_dirs::AppDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Durable store for the practice text. The on-disk format is a JSON array
/// of strings holding at most one element; every save overwrites the whole
/// file (no append, no history of past texts).
pub trait TextStore {
    /// Missing or malformed store reads as "no saved text"; the caller is
    /// expected to fall back to the edit-text onboarding flow.
    fn load(&self) -> Vec<String>;
    fn save(&self, text: &str) -> std::io::Result<()>;
}

/// On-disk payload: serializes as a bare JSON string array
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct SavedTexts(Vec<String>);

#[derive(Debug, Clone)]
pub struct FileTextStore {
    path: PathBuf,
}

impl FileTextStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::text_store_path().unwrap_or_else(|| PathBuf::from("keydrill_text.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileTextStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TextStore for FileTextStore {
    fn load(&self) -> Vec<String> {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(texts) = serde_json::from_slice::<SavedTexts>(&bytes) {
                return texts.0;
            }
        }
        Vec::new()
    }

    fn save(&self, text: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec(&SavedTexts(vec![text.to_string()])).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_saved_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("text.json");
        let store = FileTextStore::with_path(&path);

        store.save("the quick brown fox").unwrap();
        assert_eq!(store.load(), vec!["the quick brown fox".to_string()]);
    }

    #[test]
    fn saved_file_is_a_bare_string_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("text.json");
        let store = FileTextStore::with_path(&path);

        store.save("abc").unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"["abc"]"#);
    }

    #[test]
    fn save_overwrites_previous_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("text.json");
        let store = FileTextStore::with_path(&path);

        store.save("first text").unwrap();
        store.save("second text").unwrap();

        // Wholesale overwrite: exactly one element, the latest
        assert_eq!(store.load(), vec!["second text".to_string()]);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = FileTextStore::with_path(dir.path().join("nope.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("text.json");
        std::fs::write(&path, b"{not json at all").unwrap();

        let store = FileTextStore::with_path(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn wrong_shape_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("text.json");
        std::fs::write(&path, br#"{"text": "not an array"}"#).unwrap();

        let store = FileTextStore::with_path(&path);
        assert!(store.load().is_empty());
    }
}

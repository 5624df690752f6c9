use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::domain::CheckpointSet;
use crate::errors::{FeederError, FeederResult};
use crate::storage::traits::CheckpointStore;

/// Checkpoints kept as a pretty-printed JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonCheckpointStore {
    path: PathBuf,
}

impl JsonCheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Like `load`, but an absent file is an empty set
    pub fn load_or_default(&self) -> FeederResult<CheckpointSet> {
        match self.load() {
            Err(FeederError::CheckpointNotFound(_)) => Ok(CheckpointSet::default()),
            other => other,
        }
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn write_err(&self, source: io::Error) -> FeederError {
        FeederError::CheckpointWrite {
            path: self.display_path(),
            source,
        }
    }
}

impl CheckpointStore for JsonCheckpointStore {
    fn load(&self) -> FeederResult<CheckpointSet> {
        let data = fs::read(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FeederError::CheckpointNotFound(self.display_path()),
            _ => FeederError::CheckpointRead {
                path: self.display_path(),
                source: e,
            },
        })?;

        serde_json::from_slice(&data).map_err(|e| FeederError::CheckpointParse {
            path: self.display_path(),
            source: e,
        })
    }

    /// Write to a sibling temp file and rename it over the target, so a crash
    /// mid-write leaves the previous checkpoint intact.
    fn save(&self, checkpoints: &CheckpointSet) -> FeederResult<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = new_temp_file(dir).map_err(|e| self.write_err(e))?;

        // Keep the mode of the file being replaced
        if let Ok(metadata) = fs::metadata(&self.path) {
            fs::set_permissions(tmp.path(), metadata.permissions())
                .map_err(|e| self.write_err(e))?;
        }

        serde_json::to_writer_pretty(&mut tmp, checkpoints)
            .map_err(|e| self.write_err(e.into()))?;
        tmp.write_all(b"\n").map_err(|e| self.write_err(e))?;
        tmp.as_file().sync_all().map_err(|e| self.write_err(e))?;

        tmp.persist(&self.path).map_err(|e| self.write_err(e.error))?;

        Ok(())
    }
}

/// Temp files default to 0600; a fresh checkpoint gets 0666 minus the umask instead
#[cfg(unix)]
fn new_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    Builder::new().tempfile_in(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeedConfig, PendingItem};
    use chrono::{DateTime, Utc};
    use tempfile::TempDir;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn sample() -> CheckpointSet {
        let mut second = FeedConfig::new(
            "Zeta".to_string(),
            "https://zeta.example/rss".to_string(),
            ts("2024-03-01T12:30:45.123456789Z"),
        );
        second.pending.push(PendingItem::new(
            ts("2024-02-28T00:00:00Z"),
            Some("https://zeta.example/p/1".to_string()),
        ));

        CheckpointSet::new(vec![
            FeedConfig::new(
                "Alpha".to_string(),
                "https://alpha.example/feed".to_string(),
                ts("2024-01-01T00:00:00Z"),
            ),
            second,
            FeedConfig::new(
                "Beta".to_string(),
                "https://beta.example/atom.xml".to_string(),
                ts("0001-01-01T00:00:00Z"),
            ),
        ])
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = JsonCheckpointStore::new(dir.path().join("feeds.json"));
        let original = sample();

        store.save(&original).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, original);
        let names: Vec<&str> = loaded.feeds().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta", "Beta"]);
    }

    #[test]
    fn test_save_overwrites_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feeds.json");
        fs::write(&path, "[]").unwrap();
        let store = JsonCheckpointStore::new(&path);

        store.save(&sample()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(store.load().unwrap().len(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feeds.json");
        fs::write(&path, "[]").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        let store = JsonCheckpointStore::new(&path);

        store.save(&sample()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);

        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();
        store.save(&sample()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_mode_follows_umask() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feeds.json");
        let store = JsonCheckpointStore::new(&path);

        store.save(&sample()).unwrap();

        // Owner can always read and write; group/other bits depend on the umask
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode & 0o600, 0o600);
        assert_eq!(mode & 0o111, 0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonCheckpointStore::new(dir.path().join("missing.json"));

        assert!(matches!(store.load(), Err(FeederError::CheckpointNotFound(_))));
        assert!(store.load_or_default().unwrap().is_empty());
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feeds.json");
        fs::write(&path, r#"[{"name": "a", "url": }]"#).unwrap();
        let store = JsonCheckpointStore::new(&path);

        assert!(matches!(store.load(), Err(FeederError::CheckpointParse { .. })));
        assert!(matches!(
            store.load_or_default(),
            Err(FeederError::CheckpointParse { .. })
        ));
    }

    #[test]
    fn test_load_directory_is_read_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonCheckpointStore::new(dir.path());

        assert!(matches!(store.load(), Err(FeederError::CheckpointRead { .. })));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = JsonCheckpointStore::new(dir.path().join("nope").join("feeds.json"));

        assert!(matches!(
            store.save(&sample()),
            Err(FeederError::CheckpointWrite { .. })
        ));
    }

    #[test]
    fn test_empty_pending_not_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feeds.json");
        let store = JsonCheckpointStore::new(&path);

        store
            .save(&CheckpointSet::new(vec![FeedConfig::new(
                "Alpha".to_string(),
                "https://alpha.example/feed".to_string(),
                ts("2024-01-01T00:00:00Z"),
            )]))
            .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"lastSeen\": \"2024-01-01T00:00:00Z\""));
        assert!(!written.contains("pending"));
    }
}

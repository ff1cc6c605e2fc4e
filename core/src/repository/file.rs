use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;

use crate::error::KvError;
use crate::repository::traits::KeyValueStore;

/// Keeps each key in its own `<key>.json` file under a data directory.
#[derive(Clone, Debug)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, KvError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?; // Ensure the directory exists
        Ok(FileKeyValueStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let path = self.key_path(key);
        tokio::task::spawn_blocking(move || match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KvError::Io(e)),
        })
        .await
        .map_err(|e| KvError::Unavailable(format!("join error: {}", e)))?
    }

    async fn set(&self, key: &str, value: String) -> Result<(), KvError> {
        let path = self.key_path(key);
        // Write to a temp file and rename, so readers never see a partial value.
        let temp_path = path.with_extension("json.tmp");
        let target = path.clone();
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            fs::write(&temp_path, value)?;
            fs::rename(&temp_path, &target)?;
            Ok(())
        })
        .await
        .map_err(|e| KvError::Unavailable(format!("join error: {}", e)))??;

        debug!("event=kv_write key={} path={}", key, path.display());
        Ok(())
    }
}

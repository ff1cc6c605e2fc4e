use std::fs;
use std::io;
use std::path::PathBuf;

const DEFAULT_DIR_NAME: &str = ".tasklist";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Resolves the data directory (`~/.tasklist` unless overridden) and
    /// makes sure it exists.
    pub fn new(data_dir: Option<PathBuf>, log_level: Option<String>) -> io::Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => dirs::home_dir()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "could not determine home directory"))?
                .join(DEFAULT_DIR_NAME),
        };
        fs::create_dir_all(&data_dir)?;

        Ok(Self {
            data_dir,
            log_level: log_level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_is_created() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("data");
        let config = AppConfig::new(Some(dir.clone()), None).unwrap();
        assert!(dir.is_dir());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_dir(), dir.join("logs"));
    }
}

//! Configuration file support and collection discovery.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default collection database file
    pub collection: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/ankistry/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ankistry")
            .join("config.toml")
    }
}

/// Resolves the collection file to operate on.
///
/// Precedence order:
/// 1. CLI `--collection` argument (must exist; never guessed past)
/// 2. Config file `collection` setting
/// 3. The flashcard application's usual locations under the home
///    directory, then `./collection.anki2`
pub fn locate_collection(cli_path: Option<&Path>, config: &Config) -> Result<PathBuf> {
    if let Some(path) = cli_path {
        if !path.exists() {
            bail!("couldn't find collection at '{}'", path.display());
        }
        return Ok(path.to_path_buf());
    }

    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(path) = &config.collection {
        candidates.push(path.clone());
    }
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join("Anki").join("User 1").join("collection.anki2"));
        candidates.push(home.join(".anki").join("User 1").join("collection.anki2"));
    }
    candidates.push(PathBuf::from("collection.anki2"));

    for candidate in candidates {
        if candidate.exists() {
            return Ok(candidate);
        }
    }
    bail!("couldn't find a collection; specify its location with -c")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_collection() {
        let config = Config::default();
        assert!(config.collection.is_none());
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("ankistry/config.toml"));
    }

    #[test]
    fn explicit_path_must_exist() {
        let missing = Path::new("/definitely/not/here.anki2");
        let err = locate_collection(Some(missing), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("couldn't find collection"));
    }

    #[test]
    fn explicit_path_wins_when_present() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let found = locate_collection(Some(file.path()), &Config::default()).unwrap();
        assert_eq!(found, file.path());
    }

    #[test]
    fn config_setting_is_used_when_it_exists() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = Config {
            collection: Some(file.path().to_path_buf()),
        };
        let found = locate_collection(None, &config).unwrap();
        assert_eq!(found, file.path());
    }
}

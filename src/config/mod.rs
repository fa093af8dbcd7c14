//! Configuration management module.
//!
//! This module handles loading, saving, and managing application
//! configuration, including the API base URL, the persisted session token,
//! and theme preferences.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/userdeck-tui";

/// Oversees management of configuration file.
///
#[derive(Clone)]
pub struct Config {
    pub api_base_url: String,
    pub access_token: Option<String>,
    pub username: Option<String>,
    pub theme_name: String,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
}

fn default_api_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_theme_name() -> String {
    "tokyo-night".to_string()
}

impl Config {
    /// Return a new empty instance.
    ///
    pub fn new() -> Config {
        Config {
            api_base_url: default_api_base_url(),
            access_token: None,
            username: None,
            theme_name: default_theme_name(),
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// path if provided. If no file exists yet, defaults are kept and the
    /// login screen handles onboarding; nothing is prompted on stdin.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        // Try to create dir path if it doesn't exist
        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        // Specify config file path
        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        // If file exists, try to extract the session and preferences
        if file_path.exists() {
            let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.api_base_url = data.api_base_url;
            self.access_token = data.access_token;
            self.username = data.username;
            self.theme_name = data.theme_name;
        }

        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            api_base_url: self.api_base_url.clone(),
            access_token: self.access_token.clone(),
            username: self.username.clone(),
            theme_name: self.theme_name.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Persist a session token (and the account it belongs to) to the
    /// configuration file.
    ///
    pub fn save_session(&mut self, token: String, username: String) -> Result<(), AppError> {
        self.access_token = Some(token);
        self.username = Some(username);
        if self.file_path.is_none() {
            let dir_path = Config::default_path()?;
            self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        }
        self.save()
    }

    /// Remove any persisted session from the configuration file.
    ///
    pub fn clear_session(&mut self) -> Result<(), AppError> {
        self.access_token = None;
        self.username = None;
        if self.file_path.is_some() {
            self.save()?;
        }
        Ok(())
    }

    /// Returns the path buffer for the default path to the configuration file
    /// or an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::uuid::UUIDv4;
    use fake::Fake;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        let id: Uuid = UUIDv4.fake();
        std::env::temp_dir().join(format!("userdeck-tui-test-{}", id))
    }

    #[test]
    fn test_load_missing_file_keeps_defaults() {
        let dir = scratch_dir();
        let mut config = Config::new();
        config.load(Some(dir.to_str().unwrap())).unwrap();
        assert_eq!(config.api_base_url, default_api_base_url());
        assert!(config.access_token.is_none());
        assert_eq!(config.theme_name, default_theme_name());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let dir = scratch_dir();
        let mut config = Config::new();
        config.load(Some(dir.to_str().unwrap())).unwrap();
        config
            .save_session("token-123".to_string(), "ada".to_string())
            .unwrap();

        let mut reloaded = Config::new();
        reloaded.load(Some(dir.to_str().unwrap())).unwrap();
        assert_eq!(reloaded.access_token.as_deref(), Some("token-123"));
        assert_eq!(reloaded.username.as_deref(), Some("ada"));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_clear_session_removes_token() {
        let dir = scratch_dir();
        let mut config = Config::new();
        config.load(Some(dir.to_str().unwrap())).unwrap();
        config
            .save_session("token-123".to_string(), "ada".to_string())
            .unwrap();
        config.clear_session().unwrap();

        let mut reloaded = Config::new();
        reloaded.load(Some(dir.to_str().unwrap())).unwrap();
        assert!(reloaded.access_token.is_none());
        assert!(reloaded.username.is_none());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_without_path_fails() {
        let config = Config::new();
        assert!(config.save().is_err());
    }
}

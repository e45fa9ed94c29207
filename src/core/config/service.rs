use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::paths::AppPaths;
use super::settings::AppSettings;
use super::validation::validate_settings;
use crate::core::errors::ApiError;

const REDACT_PLACEHOLDER: &str = "****";

/// Loads and persists [`AppSettings`].
///
/// The public fields live in `config.yml`; the credential is split out into
/// `secrets.yml` so the public file stays shareable.
#[derive(Clone)]
pub struct ConfigService {
    paths: Arc<AppPaths>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SecretsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_credential: Option<String>,
}

impl ConfigService {
    pub fn new(paths: Arc<AppPaths>) -> Self {
        Self { paths }
    }

    pub fn config_path(&self) -> PathBuf {
        if let Ok(path) = env::var("DOCASK_CONFIG_PATH") {
            return PathBuf::from(path);
        }

        let user_config = self.paths.user_data_dir.join("config.yml");
        if user_config.exists() {
            return user_config;
        }

        self.paths.project_root.join("config.yml")
    }

    pub fn config_write_path(&self) -> PathBuf {
        if let Ok(path) = env::var("DOCASK_CONFIG_PATH") {
            return PathBuf::from(path);
        }

        self.paths.user_data_dir.join("config.yml")
    }

    pub fn secrets_path(&self) -> PathBuf {
        if let Ok(path) = env::var("DOCASK_CONFIG_PATH") {
            let config = PathBuf::from(path);
            let dir = config.parent().unwrap_or_else(|| Path::new("."));
            return dir.join("secrets.yml");
        }

        self.paths.secrets_path.clone()
    }

    /// Reads the current settings, falling back to defaults for anything
    /// missing. A corrupt file is treated as absent.
    pub fn load(&self) -> AppSettings {
        let mut settings = read_yaml_file::<AppSettings>(&self.config_path()).unwrap_or_default();
        let secrets = read_yaml_file::<SecretsFile>(&self.secrets_path()).unwrap_or_default();

        if settings.api_credential.is_none() {
            settings.api_credential = secrets.api_credential;
        }

        settings
    }

    pub fn save(&self, settings: &AppSettings) -> Result<(), ApiError> {
        validate_settings(settings)?;

        let mut public = settings.clone();
        public.api_credential = None;

        write_yaml_file(&self.config_write_path(), &public)?;
        write_yaml_file(
            &self.secrets_path(),
            &SecretsFile {
                api_credential: settings.api_credential.clone(),
            },
        )?;

        Ok(())
    }

    /// Merges an incoming settings payload with what is stored: a redacted
    /// credential placeholder means "keep the stored one".
    pub fn resolve_update(&self, mut incoming: AppSettings) -> AppSettings {
        if incoming.api_credential.as_deref() == Some(REDACT_PLACEHOLDER) {
            incoming.api_credential = self.load().api_credential;
        }
        incoming
    }

    /// Renders settings for the HTTP surface with the credential masked.
    pub fn redacted(&self, settings: &AppSettings) -> Value {
        let mut value = serde_json::to_value(settings).unwrap_or(Value::Null);
        if let Some(obj) = value.as_object_mut() {
            if obj.get("api_credential").is_some() {
                obj.insert(
                    "api_credential".to_string(),
                    Value::String(REDACT_PLACEHOLDER.to_string()),
                );
            }
        }
        value
    }
}

fn read_yaml_file<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        return None;
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            tracing::warn!("Failed to read {}: {}", path.display(), err);
            return None;
        }
    };

    match serde_yaml::from_str::<T>(&contents) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("Ignoring malformed settings file {}: {}", path.display(), err);
            None
        }
    }
}

fn write_yaml_file<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), ApiError> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let yaml = serde_yaml::to_string(value).map_err(ApiError::internal)?;
    fs::write(path, yaml).map_err(ApiError::internal)?;
    Ok(())
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, UtlaggError};
use crate::models::RequiredField;
use crate::validator::ValidationPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_required_fields")]
    pub required_fields: Vec<RequiredField>,
}

fn default_required_fields() -> Vec<RequiredField> {
    vec![RequiredField::Account, RequiredField::Description]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            required_fields: default_required_fields(),
        }
    }
}

impl Settings {
    pub fn policy(&self) -> ValidationPolicy {
        ValidationPolicy::new(self.required_fields.clone())
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("utlagg")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| UtlaggError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

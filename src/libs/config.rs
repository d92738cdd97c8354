//! Configuration and saved export presets.
//!
//! A preset stores a column selection together with its formatting options
//! so a recurring export can be repeated by name. Presets may reference
//! columns that no longer exist; those are skipped at export time.
//!
//! The configuration is a pretty-printed JSON file in the data directory:
//!
//! ```json
//! {
//!   "presets": [
//!     {
//!       "name": "weekly",
//!       "selections": [{ "display_column": "", "original_column": "Project", "order": 1 }],
//!       "options": { "delimiter": "semicolon" },
//!       "is_default": true
//!     }
//!   ]
//! }
//! ```

use super::data_storage::DataStorage;
use crate::libs::{formatter::ExportOptions, messages::Message, projection::ColumnSelection};
use crate::msg_error_anyhow;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Preset {
    pub name: String,
    pub selections: Vec<ColumnSelection>,
    #[serde(default)]
    pub options: ExportOptions,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub presets: Vec<Preset>,
}

impl Config {
    /// Loads the configuration from the default data directory.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    /// Loads the configuration, or returns the default when no file exists yet.
    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str).map_err(|e| msg_error_anyhow!(Message::ConfigParseError(e.to_string())))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|preset| preset.name == name)
    }

    pub fn default_preset(&self) -> Option<&Preset> {
        self.presets.iter().find(|preset| preset.is_default)
    }

    /// Inserts `preset` or replaces the one with the same name.
    ///
    /// At most one preset is the default: a new default clears the flag on the others.
    pub fn upsert_preset(&mut self, preset: Preset) {
        if preset.is_default {
            for existing in self.presets.iter_mut() {
                existing.is_default = false;
            }
        }

        match self.presets.iter_mut().find(|existing| existing.name == preset.name) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
    }

    /// Removes a preset by name; returns whether one was removed.
    pub fn remove_preset(&mut self, name: &str) -> bool {
        let before = self.presets.len();
        self.presets.retain(|preset| preset.name != name);
        self.presets.len() != before
    }
}

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs;
use std::path::{Path, PathBuf};

use crate::question_processor::DocumentGrammar;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory scanned for upstream exam documents (`.txt`)
    pub exam_dir: PathBuf,

    /// Explicit exam document paths; when non-empty this list is used
    /// verbatim (in order) instead of scanning `exam_dir`
    #[serde(default)]
    pub exam_files: Vec<PathBuf>,

    /// The question bank file this tool regenerates and patches
    pub bank_file: PathBuf,

    /// Translation table resource (JSON)
    pub table_file: PathBuf,

    /// Grammar of the bank file
    #[serde(default)]
    pub bank_grammar: DocumentGrammar,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to open config file {}: {}", path.display(), e))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)
            .map_err(|e| anyhow!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.bank_file.as_os_str().is_empty() {
            return Err(anyhow!("bank_file must not be empty"));
        }
        if self.table_file.as_os_str().is_empty() {
            return Err(anyhow!("table_file must not be empty"));
        }
        if self.exam_files.is_empty() && self.exam_dir.as_os_str().is_empty() {
            return Err(anyhow!(
                "Either exam_dir or exam_files must be configured"
            ));
        }
        Ok(())
    }

    /// Exam document paths in processing order. Record renumbering on
    /// regeneration follows this order, so it must be stable.
    pub fn exam_paths(&self) -> Result<Vec<PathBuf>> {
        if !self.exam_files.is_empty() {
            return Ok(self.exam_files.clone());
        }
        crate::file_utils::FileManager::find_files(&self.exam_dir, "txt")
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            exam_dir: PathBuf::from("exams"),
            exam_files: Vec::new(),
            bank_file: PathBuf::from("resources/part-I.txt"),
            table_file: PathBuf::from("resources/translations.json"),
            bank_grammar: DocumentGrammar::Bank,
            log_level: LogLevel::default(),
        }
    }
}

//! Per-scenario file storage
//!
//! Directory structure:
//! ~/.insight/
//!   insight.log
//!   scenarios/
//!     pricing.yaml
//!     launch plan.yaml

use std::fs;
use std::path::{Path, PathBuf};

use insight_core::model::{RunSettings, VariableSpec};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::util::io::atomic_write;

/// A named set of variables plus the run settings to simulate them with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    pub name: String,
    pub variables: Vec<VariableSpec>,
    #[serde(default)]
    pub settings: RunSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<Timestamp>,
}

impl ScenarioRecord {
    pub fn new(name: impl Into<String>, variables: Vec<VariableSpec>, settings: RunSettings) -> Self {
        Self {
            name: name.into(),
            variables,
            settings,
            saved_at: None,
        }
    }

    pub fn to_yaml(&self) -> Result<String, StorageError> {
        serde_saphyr::to_string(self)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize scenario: {}", e)))
    }

    pub fn from_yaml(content: &str) -> Result<Self, StorageError> {
        serde_saphyr::from_str(content)
            .map_err(|e| StorageError::Parse(format!("Failed to parse scenario: {}", e)))
    }
}

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    Io(String),
    Parse(String),
    Serialize(String),
    NotFound(String),
    /// Another scenario already occupies the file this name maps to
    NameConflict { name: String, existing: String },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {}", msg),
            StorageError::Parse(msg) => write!(f, "Parse error: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
            StorageError::NotFound(name) => write!(f, "Scenario not found: {}", name),
            StorageError::NameConflict { name, existing } => write!(
                f,
                "Scenario '{}' would overwrite '{}' (same file name); choose another name",
                name, existing
            ),
        }
    }
}

impl std::error::Error for StorageError {}

/// Manages the scenarios directory inside the data directory
pub struct ScenarioStore {
    root: PathBuf,
}

impl ScenarioStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: data_dir.into(),
        }
    }

    /// Get the default data directory path (~/.insight/)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".insight")
    }

    fn scenarios_dir(&self) -> PathBuf {
        self.root.join("scenarios")
    }

    /// Path the named scenario is stored at
    pub fn scenario_path(&self, name: &str) -> PathBuf {
        self.scenarios_dir()
            .join(format!("{}.yaml", sanitize_filename(name)))
    }

    pub fn exists(&self) -> bool {
        self.scenarios_dir().exists()
    }

    pub fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.scenarios_dir()).map_err(|e| {
            StorageError::Io(format!("Failed to create scenarios directory: {}", e))
        })
    }

    /// Write a scenario, stamping `saved_at`. Overwrites an existing
    /// scenario with the same name; refuses when a differently named
    /// scenario sanitizes to the same file.
    pub fn save(&self, record: &ScenarioRecord) -> Result<PathBuf, StorageError> {
        if !self.exists() {
            self.init()?;
        }

        let path = self.scenario_path(&record.name);
        if path.exists() {
            match load_from_path(&path) {
                Ok(existing) if existing.name != record.name => {
                    return Err(StorageError::NameConflict {
                        name: record.name.clone(),
                        existing: existing.name,
                    });
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Replacing unreadable scenario");
                }
            }
        }

        let record = ScenarioRecord {
            saved_at: Some(Timestamp::now()),
            ..record.clone()
        };
        let yaml = record.to_yaml()?;

        atomic_write(&path, yaml)
            .map_err(|e| StorageError::Io(format!("Failed to write scenario: {}", e)))?;

        tracing::info!(scenario = %record.name, path = %path.display(), "Saved scenario");
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<ScenarioRecord, StorageError> {
        let path = self.scenario_path(name);
        if !path.exists() {
            return Err(StorageError::NotFound(name.to_string()));
        }
        load_from_path(&path)
    }

    /// All readable scenarios, sorted by name. Unreadable files are logged
    /// and skipped.
    pub fn list(&self) -> Result<Vec<ScenarioRecord>, StorageError> {
        let dir = self.scenarios_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir)
            .map_err(|e| StorageError::Io(format!("Failed to read scenarios directory: {}", e)))?;

        let mut records = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                continue;
            }
            match load_from_path(&path) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to load scenario");
                }
            }
        }

        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }

    pub fn delete(&self, name: &str) -> Result<(), StorageError> {
        let path = self.scenario_path(name);
        if !path.exists() {
            return Err(StorageError::NotFound(name.to_string()));
        }
        fs::remove_file(&path)
            .map_err(|e| StorageError::Io(format!("Failed to delete scenario: {}", e)))?;

        tracing::info!(scenario = name, "Deleted scenario");
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn load_from_path(path: &Path) -> Result<ScenarioRecord, StorageError> {
    let content = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read file: {}", e)))?;
    ScenarioRecord::from_yaml(&content)
}

/// Sanitize a scenario name to be safe as a file name
fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "_".to_string()
    } else {
        sanitized
    }
}

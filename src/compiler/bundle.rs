use super::WorkflowDefinition;
use crate::error::{CompileError, ImportError};
use crate::graph::GraphSnapshot;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name prefix used when none is configured.
pub const DEFAULT_EXPORT_PREFIX: &str = "flow";

/// The persisted export format: compiled logic plus the visual document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub logic: WorkflowDefinition,
    pub graph: GraphSnapshot,
}

impl ExportBundle {
    /// `<prefix>-<unix millis>.json`
    pub fn file_name(prefix: &str) -> String {
        format!("{}-{}.json", prefix, chrono::Utc::now().timestamp_millis())
    }

    pub fn to_json_pretty(&self) -> Result<String, CompileError> {
        serde_json::to_string_pretty(self).map_err(|e| CompileError::Serialization(e.to_string()))
    }

    /// Writes the bundle into `dir` under a timestamped name and returns the path.
    pub fn write_to_dir(&self, dir: &Path, prefix: &str) -> Result<PathBuf, CompileError> {
        let path = write_timestamped(dir, prefix, self)?;
        log::info!("Wrote export bundle to {}", path.display());
        Ok(path)
    }

    /// Reads a previously written file as raw JSON, ready for import.
    ///
    /// Only the read happens here; the caller decides whether to apply it.
    pub fn read_file(path: &Path) -> Result<serde_json::Value, ImportError> {
        let content = fs::read_to_string(path).map_err(|e| ImportError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ImportError::Parse(e.to_string()))
    }
}

/// Pretty-prints `value` into `dir` as `<prefix>-<unix millis>.json`.
pub(crate) fn write_timestamped<T: Serialize>(
    dir: &Path,
    prefix: &str,
    value: &T,
) -> Result<PathBuf, CompileError> {
    let path = dir.join(ExportBundle::file_name(prefix));
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CompileError::Serialization(e.to_string()))?;
    fs::write(&path, json).map_err(|e| CompileError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(path)
}

//! # Configuration
//!
//! Task list configuration is managed by [`confique`], which handles layered
//! loading from TOML files and environment variables.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `TASKLIST_NAMESPACE`, `TASKLIST_DATA_DIR`, etc.
//! 2. **Explicit file**: the path passed to [`TaskListConfig::load`].
//! 3. **User Config**: `tasklist.toml` in the OS config directory (via `directories`).
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `namespace` | `todos` | Namespace (blob name) the collection is stored under |
//! | `data_dir` | OS data dir | Directory holding one `<namespace>.json` per namespace |
//! | `default_title` | `New task...` | Title used when a task is added without one |
//! | `log_level` | `warn` | `error`, `warn`, `info`, `debug`, `trace` or `off` |

use crate::error::{Result, TaskError};
use crate::model::DEFAULT_TITLE;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "tasklist.toml";

/// Configuration for the task list, stored in `tasklist.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskListConfig {
    /// Namespace the collection is persisted under.
    #[config(default = "todos", env = "TASKLIST_NAMESPACE")]
    pub namespace: String,

    /// Directory for namespace files. When absent, the OS data dir is used.
    #[config(env = "TASKLIST_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Placeholder title for tasks added without one.
    #[config(default = "New task...", env = "TASKLIST_DEFAULT_TITLE")]
    pub default_title: String,

    #[config(default = "warn", env = "TASKLIST_LOG")]
    pub log_level: String,
}

impl Default for TaskListConfig {
    fn default() -> Self {
        Self {
            namespace: "todos".to_string(),
            data_dir: None,
            default_title: DEFAULT_TITLE.to_string(),
            log_level: "warn".to_string(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "tasklist", "tasklist")
}

impl TaskListConfig {
    /// Load config from env, an optional explicit file, and the user config file.
    /// Missing files are skipped.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = explicit {
            builder = builder.file(path);
        }
        if let Some(dirs) = project_dirs() {
            builder = builder.file(dirs.config_dir().join(CONFIG_FILENAME));
        }
        builder
            .load()
            .map_err(|e| TaskError::Configuration(e.to_string()))
    }

    /// The configured data dir, or the OS data dir for the task list.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                TaskError::Configuration("could not determine a data directory".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = TaskListConfig::default();
        assert_eq!(config.namespace, "todos");
        assert_eq!(config.default_title, "New task...");
        assert_eq!(config.log_level, "warn");
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = TaskListConfig {
            data_dir: Some(PathBuf::from("/tmp/tasks")),
            ..Default::default()
        };
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/tasks"));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            "namespace = \"groceries\"\ndefault_title = \"Untitled\"\n",
        )
        .unwrap();

        let config = TaskListConfig::load(Some(&path)).unwrap();
        // Env may override in a developer shell; only assert when unset.
        if std::env::var_os("TASKLIST_NAMESPACE").is_none() {
            assert_eq!(config.namespace, "groceries");
        }
        if std::env::var_os("TASKLIST_DEFAULT_TITLE").is_none() {
            assert_eq!(config.default_title, "Untitled");
        }
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = TaskListConfig {
            namespace: "work".to_string(),
            data_dir: Some(PathBuf::from("/data")),
            default_title: "Todo".to_string(),
            log_level: "debug".to_string(),
        };
        let text = toml::to_string(&config).unwrap();
        let parsed: TaskListConfig = toml::from_str(&text).unwrap();
        assert_eq!(config, parsed);
    }
}

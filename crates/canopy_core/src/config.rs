//! Site data configuration.
//!
//! # Responsibility
//! - Carry the project list, counters and placeholder sizes that pages are
//!   populated from.
//! - Load overrides from JSON and reject inconsistent data before any DOM
//!   work starts.
//!
//! # Invariants
//! - `SiteConfig::default()` reproduces the built-in sample content.
//! - A config returned by `load`/`from_json_str` has passed `validate()`.

use crate::model::counter::{default_counters, CounterSpec};
use crate::model::project::{sample_projects, ProjectId, ProjectRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Cards shown in the landing page's featured grid.
pub const DEFAULT_FEATURED_COUNT: usize = 3;
/// Tiles added to the gallery placeholder grid.
pub const DEFAULT_GALLERY_PLACEHOLDERS: u32 = 8;

/// Data every page component is populated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Full project list, in display order.
    pub projects: Vec<ProjectRecord>,
    /// Leading projects rendered into `#project-grid`.
    pub featured_count: usize,
    pub counters: Vec<CounterSpec>,
    pub gallery_placeholders: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            projects: sample_projects(),
            featured_count: DEFAULT_FEATURED_COUNT,
            counters: default_counters(),
            gallery_placeholders: DEFAULT_GALLERY_PLACEHOLDERS,
        }
    }
}

impl SiteConfig {
    /// Parses and validates a JSON document. Missing fields take defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Projects shown in the featured grid.
    pub fn featured_projects(&self) -> &[ProjectRecord] {
        let end = self.featured_count.min(self.projects.len());
        &self.projects[..end]
    }

    /// Checks cross-record invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut project_ids = BTreeSet::<ProjectId>::new();
        for project in &self.projects {
            if !project_ids.insert(project.id) {
                return Err(ConfigError::DuplicateProjectId(project.id));
            }
        }

        let mut counter_ids = BTreeSet::<&str>::new();
        for counter in &self.counters {
            let id = counter.id.trim();
            if id.is_empty() {
                return Err(ConfigError::EmptyCounterId);
            }
            if !counter_ids.insert(id) {
                return Err(ConfigError::DuplicateCounterId(id.to_string()));
            }
            if !counter.duration_ms.is_finite() || counter.duration_ms <= 0.0 {
                return Err(ConfigError::InvalidDuration {
                    counter_id: id.to_string(),
                    duration_ms: counter.duration_ms,
                });
            }
        }
        Ok(())
    }
}

/// Config loading and validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    DuplicateProjectId(ProjectId),
    EmptyCounterId,
    DuplicateCounterId(String),
    InvalidDuration {
        counter_id: String,
        duration_ms: f64,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config JSON: {err}"),
            Self::DuplicateProjectId(id) => write!(f, "project id is duplicated: {id}"),
            Self::EmptyCounterId => write!(f, "counter id must not be empty"),
            Self::DuplicateCounterId(id) => write!(f, "counter id is duplicated: {id}"),
            Self::InvalidDuration {
                counter_id,
                duration_ms,
            } => write!(
                f,
                "counter `{counter_id}` duration must be a positive number of ms, got {duration_ms}"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgtree/orgtree.toml`
//! 3. Local config: file passed explicitly (e.g. `--config`)
//! 4. Environment variables: `ORGTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::ApplicationError;

/// Unified configuration for orgtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of transitions kept for undo (None or 0: unbounded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
    /// Hierarchy file used when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hierarchy_file: Option<PathBuf>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub history_limit: Option<usize>,
    pub hierarchy_file: Option<PathBuf>,
}

/// Get the XDG config directory for orgtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    ///
    /// A relative `hierarchy_file` is resolved against `base_dir` (the directory
    /// of the file that declared it).
    fn merge_with(&self, overlay: &RawSettings, base_dir: Option<&Path>) -> Self {
        let hierarchy_file = overlay.hierarchy_file.as_ref().map(|p| match base_dir {
            Some(dir) if p.is_relative() => dir.join(p),
            _ => p.clone(),
        });
        Self {
            history_limit: overlay.history_limit.or(self.history_limit),
            hierarchy_file: hierarchy_file.or_else(|| self.hierarchy_file.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_path` - Optional config file layered over the global one
    ///
    /// A missing global file is skipped; a missing local file is an error
    /// since it was asked for explicitly.
    #[instrument(level = "debug")]
    pub fn load(local_path: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw, global_path.parent());
                debug!("Applied global config {}", global_path.display());
            }
        }

        // 3. Local config
        if let Some(local) = local_path {
            let raw = load_raw_settings(local)?;
            current = current.merge_with(&raw, local.parent());
            debug!("Applied local config {}", local.display());
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        Ok(current)
    }

    /// Apply ORGTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ORGTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("history_limit") {
            let limit = val.trim().parse::<usize>().map_err(|e| ApplicationError::Config {
                message: format!("ORGTREE_HISTORY_LIMIT={}: {}", val, e),
            })?;
            settings.history_limit = Some(limit);
        }
        if let Ok(val) = config.get_string("hierarchy_file") {
            settings.hierarchy_file = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    /// Effective history limit, None meaning unbounded.
    pub fn effective_history_limit(&self) -> Option<usize> {
        self.history_limit.filter(|&l| l > 0)
    }

    /// Render as TOML (for `config show`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_overlay_when_merging_then_overlay_wins_and_resolves_relative_path() {
        let base = Settings {
            history_limit: Some(10),
            hierarchy_file: Some(PathBuf::from("/etc/org.toml")),
        };
        let overlay = RawSettings {
            history_limit: None,
            hierarchy_file: Some(PathBuf::from("team.toml")),
        };

        let merged = base.merge_with(&overlay, Some(Path::new("/home/me")));

        assert_eq!(merged.history_limit, Some(10));
        assert_eq!(
            merged.hierarchy_file,
            Some(PathBuf::from("/home/me/team.toml"))
        );
    }

    #[test]
    fn given_zero_limit_when_resolving_then_unbounded() {
        let settings = Settings {
            history_limit: Some(0),
            hierarchy_file: None,
        };
        assert_eq!(settings.effective_history_limit(), None);
    }
}

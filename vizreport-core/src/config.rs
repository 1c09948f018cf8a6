//! Renderer configuration.
//!
//! # File format
//!
//! ```yaml
//! title:
//!   plugin: diversity
//!   method: alpha_rarefaction
//! templates: ./report-templates   # optional; embedded bundle when omitted
//! staging_root: /scratch/tmp      # optional; system temp dir when omitted
//! ```
//!
//! Relative paths are resolved against the directory holding the config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::PageTitle;

/// Everything a renderer needs besides its per-call inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Default page title injected into every context.
    pub title: PageTitle,

    /// Template package directory. `None` selects the embedded bundle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<PathBuf>,

    /// Parent directory for per-call working directories.
    /// `None` selects the system temp dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging_root: Option<PathBuf>,
}

impl RendererConfig {
    /// Config using the embedded template bundle and the system temp dir.
    pub fn new(title: PageTitle) -> Self {
        RendererConfig {
            title,
            templates: None,
            staging_root: None,
        }
    }

    pub fn with_templates(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates = Some(dir.into());
        self
    }

    pub fn with_staging_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_root = Some(dir.into());
        self
    }

    /// Parse config from YAML text. Relative paths are left untouched.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load config from a YAML file.
    ///
    /// Returns `ConfigError::NotFound` if absent,
    /// `ConfigError::Parse` (with path + line context) if malformed YAML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut config: RendererConfig =
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.templates = config.templates.map(|p| resolve(base, p));
        config.staging_root = config.staging_root.map(|p| resolve(base, p));
        Ok(config)
    }
}

fn resolve(base: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        p
    } else {
        base.join(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_uses_embedded_defaults() {
        let config = RendererConfig::from_yaml_str("title: Overview\n").unwrap();
        assert_eq!(config, RendererConfig::new(PageTitle::literal("Overview")));
    }

    #[test]
    fn builder_sets_optional_paths() {
        let config = RendererConfig::new(PageTitle::new("p", "m"))
            .with_templates("/opt/templates")
            .with_staging_root("/scratch");
        assert_eq!(config.templates, Some(PathBuf::from("/opt/templates")));
        assert_eq!(config.staging_root, Some(PathBuf::from("/scratch")));
    }

    #[test]
    fn missing_title_is_rejected() {
        let err = RendererConfig::from_yaml_str("templates: ./t\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)), "got: {err}");
    }

    #[test]
    fn absolute_paths_are_not_rebased() {
        let p = resolve(Path::new("/etc/vizreport"), PathBuf::from("/srv/templates"));
        assert_eq!(p, PathBuf::from("/srv/templates"));
    }
}

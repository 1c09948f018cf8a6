//! Per-call working directory.
//!
//! Holds the base template, staged dependencies and copies of the source
//! files so Tera can resolve references among them. The directory is removed
//! when the [`StagingDir`] is dropped, on success and on every error path.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{input_err, staging_err, RenderError};
use crate::package::is_relative_name;

const PREFIX: &str = "vizreport-";

/// Scoped temporary directory for one render invocation.
#[derive(Debug)]
pub struct StagingDir {
    dir: TempDir,
    /// Relative names of staged package templates, in staging order.
    templates: Vec<String>,
}

impl StagingDir {
    /// Create a fresh directory under the system temp dir.
    pub fn new() -> Result<Self, RenderError> {
        Self::create(None)
    }

    /// Create a fresh directory under `root`.
    pub fn new_in(root: &Path) -> Result<Self, RenderError> {
        Self::create(Some(root))
    }

    fn create(root: Option<&Path>) -> Result<Self, RenderError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(PREFIX);
        let dir = match root {
            Some(root) => builder.tempdir_in(root).map_err(|e| staging_err(root, e))?,
            None => builder
                .tempdir()
                .map_err(|e| staging_err(std::env::temp_dir(), e))?,
        };
        tracing::debug!("staging in {}", dir.path().display());
        Ok(StagingDir {
            dir,
            templates: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Whether a file named `name` is already present. Names that would
    /// escape the directory are never present.
    pub fn contains(&self, name: &str) -> bool {
        is_relative_name(name) && self.dir.path().join(name).is_file()
    }

    /// Write a package template under its relative name.
    pub fn stage_template(&mut self, name: &str, contents: &str) -> Result<PathBuf, RenderError> {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| staging_err(parent, e))?;
        }
        std::fs::write(&path, contents).map_err(|e| staging_err(&path, e))?;
        tracing::debug!("staged template {name}");
        self.templates.push(name.to_string());
        Ok(path)
    }

    /// Copy a source file in under its base name.
    ///
    /// Returns the template name (the base name) and the staged path.
    pub fn stage_source(&self, source: &Path) -> Result<(String, PathBuf), RenderError> {
        let name = source_name(source)?;
        let contents = read_source(source)?;
        let path = self.dir.path().join(&name);
        std::fs::write(&path, contents).map_err(|e| staging_err(&path, e))?;
        Ok((name, path))
    }

    /// Staged package templates as `(path, name)` pairs for Tera.
    pub fn staged_templates(&self) -> Vec<(PathBuf, Option<String>)> {
        self.templates
            .iter()
            .map(|name| (self.dir.path().join(name), Some(name.clone())))
            .collect()
    }

    /// Remove the directory now, surfacing any deletion error.
    pub fn close(self) -> Result<(), RenderError> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().map_err(|e| staging_err(path, e))
    }
}

/// Read a source file as UTF-8 text.
pub(crate) fn read_source(source: &Path) -> Result<String, RenderError> {
    std::fs::read_to_string(source).map_err(|e| input_err(source, e))
}

/// Base file name of a source path.
pub(crate) fn source_name(source: &Path) -> Result<String, RenderError> {
    source
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            input_err(
                source,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "source path has no UTF-8 file name",
                ),
            )
        })
}

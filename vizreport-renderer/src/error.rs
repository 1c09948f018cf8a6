//! Error types for vizreport-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from a render invocation.
///
/// Every variant aborts the whole invocation. Files written before the error
/// stay on disk.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A source file is missing, unreadable, or not UTF-8.
    #[error("cannot read source file {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file references a template the package does not provide.
    #[error("template '{name}' referenced by {referenced_by} is not in the template package")]
    MissingTemplate { name: String, referenced_by: String },

    /// Tera failed to load or render a template.
    #[error("failed to render '{template}': {source}")]
    Template {
        template: String,
        #[source]
        source: tera::Error,
    },

    /// Writing a rendered file or copying assets into the output directory failed.
    #[error("cannot write output at {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The working directory could not be created or written.
    #[error("working directory error at {path}: {source}")]
    Staging {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template package directory could not be read.
    #[error("template package error at {path}: {source}")]
    Package {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Context value could not be converted to a JSON mapping.
    #[error("context serialization error: {0}")]
    Context(#[from] serde_json::Error),
}

pub(crate) fn input_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Input { path: path.into(), source }
}

pub(crate) fn output_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Output { path: path.into(), source }
}

pub(crate) fn staging_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Staging { path: path.into(), source }
}

pub(crate) fn package_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Package { path: path.into(), source }
}

//! vizreport core library — shared domain types, renderer configuration, errors.
//!
//! Public API surface:
//! - [`types`] — [`SourceFiles`] and [`PageTitle`]
//! - [`config`] — [`RendererConfig`] load / build
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::RendererConfig;
pub use error::ConfigError;
pub use types::{PageTitle, SourceFiles};

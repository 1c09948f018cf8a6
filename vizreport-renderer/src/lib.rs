//! # vizreport-renderer
//!
//! Tera-based renderer that turns user template files into self-contained
//! HTML reports built on a shared base template, then copies the static
//! assets those pages link to.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use vizreport_core::PageTitle;
//! use vizreport_renderer::{Renderer, ReportContext};
//!
//! fn visualize(output_dir: &Path) -> Result<(), vizreport_renderer::RenderError> {
//!     let renderer = Renderer::new(PageTitle::new("diversity", "alpha_rarefaction"));
//!     let mut ctx = ReportContext::new();
//!     ctx.insert("metric", "shannon");
//!     renderer.render(["index.html", "table.html"], output_dir, Some(&mut ctx))?;
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod package;
pub mod staging;

pub use context::{ReportContext, DEFAULT_PAGE_TITLE_KEY};
pub use engine::{RenderSummary, Renderer};
pub use error::RenderError;
pub use package::{TemplatePackage, ASSETS_DIR_NAME, BASE_TEMPLATE};
pub use staging::StagingDir;

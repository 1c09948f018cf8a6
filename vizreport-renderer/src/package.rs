//! Template package data — the base template, auxiliary templates, and the
//! static assets copied next to every report.
//!
//! # Layout
//!
//! ```text
//! <root>/
//!   base.html          (required; every report extends or includes it)
//!   <name>.html        (auxiliary templates, addressable by relative name)
//!   assets/            (copied verbatim to <output>/q2templateassets/)
//! ```
//!
//! The embedded package follows the same layout and is baked into the binary
//! at compile time via `include_str!`.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{output_err, package_err, RenderError};

/// File name of the template every source file builds on.
pub const BASE_TEMPLATE: &str = "base.html";

/// Name of the assets subdirectory, both in the package and in the output.
pub const ASSETS_DIR_NAME: &str = "q2templateassets";

const PACKAGE_ASSETS_DIR: &str = "assets";

// ---------------------------------------------------------------------------
// Embedded package
// ---------------------------------------------------------------------------

const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("templates/base.html")),
    ("tabbed.html", include_str!("templates/tabbed.html")),
    ("footer.html", include_str!("templates/footer.html")),
];

const EMBEDDED_ASSETS: &[(&str, &str)] = &[
    ("css/report.css", include_str!("templates/assets/css/report.css")),
    ("js/tabs.js", include_str!("templates/assets/js/tabs.js")),
    ("js/table.js", include_str!("templates/assets/js/table.js")),
];

// ---------------------------------------------------------------------------
// TemplatePackage
// ---------------------------------------------------------------------------

/// Where templates and assets come from. Never mutated by rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplatePackage {
    /// Bundle compiled into the binary.
    #[default]
    Embedded,
    /// Directory on disk with the same layout as the embedded bundle.
    Directory(PathBuf),
}

impl TemplatePackage {
    pub fn embedded() -> Self {
        TemplatePackage::Embedded
    }

    /// Use a package directory. The directory must exist.
    pub fn from_dir(root: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let root = root.into();
        let meta = std::fs::metadata(&root).map_err(|e| package_err(&root, e))?;
        if !meta.is_dir() {
            return Err(package_err(
                &root,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
            ));
        }
        Ok(TemplatePackage::Directory(root))
    }

    /// Contents of template `name`, or `None` when the package lacks it.
    ///
    /// Names are relative; anything that would escape the package root
    /// (absolute paths, `..`) is treated as absent.
    pub fn template(&self, name: &str) -> Result<Option<Cow<'static, str>>, RenderError> {
        if !is_relative_name(name) || is_asset_name(name) {
            return Ok(None);
        }
        match self {
            TemplatePackage::Embedded => Ok(EMBEDDED_TEMPLATES
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, content)| Cow::Borrowed(*content))),
            TemplatePackage::Directory(root) => {
                let path = root.join(name);
                if !path.is_file() {
                    return Ok(None);
                }
                let content = std::fs::read_to_string(&path).map_err(|e| package_err(&path, e))?;
                Ok(Some(Cow::Owned(content)))
            }
        }
    }

    /// Sorted names of every template in the package, base included.
    pub fn template_names(&self) -> Result<Vec<String>, RenderError> {
        let mut names: Vec<String> = match self {
            TemplatePackage::Embedded => {
                EMBEDDED_TEMPLATES.iter().map(|(n, _)| (*n).to_string()).collect()
            }
            TemplatePackage::Directory(root) => {
                let assets = root.join(PACKAGE_ASSETS_DIR);
                let mut names = Vec::new();
                let walker = WalkDir::new(root)
                    .min_depth(1)
                    .into_iter()
                    .filter_entry(|e| e.path() != assets.as_path());
                for entry in walker {
                    let entry = entry.map_err(|e| package_err(root, e.into()))?;
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
                    names.push(normalize_name(rel));
                }
                names
            }
        };
        names.sort();
        Ok(names)
    }

    /// Sorted asset paths, relative to the assets directory.
    pub fn asset_files(&self) -> Result<Vec<PathBuf>, RenderError> {
        let mut files: Vec<PathBuf> = match self {
            TemplatePackage::Embedded => {
                EMBEDDED_ASSETS.iter().map(|(n, _)| PathBuf::from(n)).collect()
            }
            TemplatePackage::Directory(root) => {
                let assets = root.join(PACKAGE_ASSETS_DIR);
                let mut files = Vec::new();
                for entry in WalkDir::new(&assets).min_depth(1) {
                    let entry = entry.map_err(|e| package_err(&assets, e.into()))?;
                    if entry.file_type().is_file() {
                        let rel = entry.path().strip_prefix(&assets).unwrap_or(entry.path());
                        files.push(rel.to_path_buf());
                    }
                }
                files
            }
        };
        files.sort();
        Ok(files)
    }

    /// Copy every asset into `dest`, merging with whatever is already there.
    ///
    /// Same-path files in `dest` are overwritten; other files are left alone,
    /// so repeated calls converge on the same tree. Returns the written paths.
    pub fn copy_assets(&self, dest: &Path) -> Result<Vec<PathBuf>, RenderError> {
        let mut written = Vec::new();
        match self {
            TemplatePackage::Embedded => {
                for (rel, content) in EMBEDDED_ASSETS {
                    let target = dest.join(rel);
                    ensure_parent(&target)?;
                    std::fs::write(&target, content).map_err(|e| output_err(&target, e))?;
                    written.push(target);
                }
            }
            TemplatePackage::Directory(root) => {
                let assets = root.join(PACKAGE_ASSETS_DIR);
                if !assets.is_dir() {
                    return Err(package_err(
                        &assets,
                        std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "template package has no assets directory",
                        ),
                    ));
                }
                for entry in WalkDir::new(&assets).sort_by_file_name() {
                    let entry = entry.map_err(|e| package_err(&assets, e.into()))?;
                    let rel = entry.path().strip_prefix(&assets).unwrap_or(entry.path());
                    let target = dest.join(rel);
                    if entry.file_type().is_dir() {
                        std::fs::create_dir_all(&target).map_err(|e| output_err(&target, e))?;
                    } else if entry.file_type().is_file() {
                        ensure_parent(&target)?;
                        std::fs::copy(entry.path(), &target).map_err(|e| output_err(&target, e))?;
                        written.push(target);
                    }
                }
            }
        }
        tracing::debug!("copied {} asset(s) into {}", written.len(), dest.display());
        Ok(written)
    }
}

fn ensure_parent(path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| output_err(parent, e))?;
    }
    Ok(())
}

fn normalize_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

pub(crate) fn is_relative_name(name: &str) -> bool {
    !name.is_empty()
        && Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

fn is_asset_name(name: &str) -> bool {
    Path::new(name)
        .components()
        .next()
        .is_some_and(|c| c.as_os_str() == PACKAGE_ASSETS_DIR)
}

//! Domain types shared by the renderer and the CLI.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SourceFiles
// ---------------------------------------------------------------------------

/// Ordered list of user template files to render.
///
/// Built from either a single path or a sequence of paths; a single path
/// becomes a one-element list. Input order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFiles(Vec<PathBuf>);

impl SourceFiles {
    /// Build from any sequence of paths.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self(paths.into_iter().map(Into::into).collect())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<PathBuf> {
        self.0
    }
}

impl From<PathBuf> for SourceFiles {
    fn from(p: PathBuf) -> Self {
        Self(vec![p])
    }
}

impl From<&Path> for SourceFiles {
    fn from(p: &Path) -> Self {
        Self(vec![p.to_path_buf()])
    }
}

impl From<&PathBuf> for SourceFiles {
    fn from(p: &PathBuf) -> Self {
        Self(vec![p.clone()])
    }
}

impl From<&str> for SourceFiles {
    fn from(s: &str) -> Self {
        Self(vec![PathBuf::from(s)])
    }
}

impl From<String> for SourceFiles {
    fn from(s: String) -> Self {
        Self(vec![PathBuf::from(s)])
    }
}

impl<P: Into<PathBuf>> From<Vec<P>> for SourceFiles {
    fn from(paths: Vec<P>) -> Self {
        Self::new(paths)
    }
}

impl<P: AsRef<Path>> From<&[P]> for SourceFiles {
    fn from(paths: &[P]) -> Self {
        Self(paths.iter().map(|p| p.as_ref().to_path_buf()).collect())
    }
}

impl<P: Into<PathBuf>, const N: usize> From<[P; N]> for SourceFiles {
    fn from(paths: [P; N]) -> Self {
        Self::new(paths)
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for SourceFiles {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a SourceFiles {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ---------------------------------------------------------------------------
// PageTitle
// ---------------------------------------------------------------------------

/// Default browser-tab title for rendered pages.
///
/// In YAML this is either a plain string or a `{ plugin, method }` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageTitle {
    /// Rendered as `"<plugin> : <method>"`.
    PluginMethod { plugin: String, method: String },
    /// Rendered verbatim.
    Literal(String),
}

impl PageTitle {
    pub fn new(plugin: impl Into<String>, method: impl Into<String>) -> Self {
        PageTitle::PluginMethod {
            plugin: plugin.into(),
            method: method.into(),
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        PageTitle::Literal(text.into())
    }
}

impl fmt::Display for PageTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageTitle::PluginMethod { plugin, method } => write!(f, "{plugin} : {method}"),
            PageTitle::Literal(text) => f.write_str(text),
        }
    }
}

//! Tera rendering engine — [`Renderer`] and [`RenderSummary`].
//!
//! # Render protocol
//!
//! 1. Normalise the source list.
//! 2. Create a scoped working directory (removed on every exit path).
//! 3. Stage the package's `base.html`.
//! 4. Parse each source file, collect the templates it references and stage
//!    the ones not yet present. Staged templates are not scanned themselves.
//!    A syntax error in any source stops the call here, before any output.
//! 5. Inject the default page title into the context.
//! 6. For each source, in order: stage it, load it, render it, write
//!    `<output_dir>/<basename>`.
//! 7. Merge-copy the package assets into `<output_dir>/q2templateassets/`.
//! 8. Remove the working directory, reporting any failure to do so.
//!
//! There is no rollback: outputs written before a failure remain on disk.

use std::path::{Path, PathBuf};

use tera::Tera;

use vizreport_core::{PageTitle, RendererConfig, SourceFiles};

use crate::context::ReportContext;
use crate::discovery;
use crate::error::{output_err, RenderError};
use crate::package::{TemplatePackage, ASSETS_DIR_NAME, BASE_TEMPLATE};
use crate::staging::{self, StagingDir};

/// Error label for failures loading the staged package templates as a set.
pub const STAGED_TEMPLATES: &str = "staged package templates";

// ---------------------------------------------------------------------------
// RenderSummary
// ---------------------------------------------------------------------------

/// What a successful render wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    /// One rendered file per source, in input order.
    pub outputs: Vec<PathBuf>,
    /// `<output_dir>/q2templateassets`.
    pub assets_dir: PathBuf,
    /// Number of asset files copied.
    pub assets_copied: usize,
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Renders user templates against a shared base template.
///
/// Holds no per-call state; one instance can serve concurrent calls as long
/// as their output directories differ.
#[derive(Debug, Clone)]
pub struct Renderer {
    package: TemplatePackage,
    title: PageTitle,
    staging_root: Option<PathBuf>,
}

impl Renderer {
    /// Renderer over the embedded template package.
    pub fn new(title: PageTitle) -> Self {
        Renderer {
            package: TemplatePackage::embedded(),
            title,
            staging_root: None,
        }
    }

    /// Build from a loaded [`RendererConfig`].
    pub fn from_config(config: &RendererConfig) -> Result<Self, RenderError> {
        let package = match &config.templates {
            Some(dir) => TemplatePackage::from_dir(dir)?,
            None => TemplatePackage::embedded(),
        };
        Ok(Renderer {
            package,
            title: config.title.clone(),
            staging_root: config.staging_root.clone(),
        })
    }

    pub fn with_package(mut self, package: TemplatePackage) -> Self {
        self.package = package;
        self
    }

    /// Create working directories under `root` instead of the system temp dir.
    pub fn with_staging_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.staging_root = Some(root.into());
        self
    }

    pub fn package(&self) -> &TemplatePackage {
        &self.package
    }

    pub fn title(&self) -> &PageTitle {
        &self.title
    }

    /// Render `source_files` into `output_dir` and copy the package assets.
    ///
    /// `context` defaults to an empty mapping. When given, it is mutated:
    /// [`DEFAULT_PAGE_TITLE_KEY`](crate::DEFAULT_PAGE_TITLE_KEY) is always set
    /// to this renderer's title, replacing any caller value.
    pub fn render(
        &self,
        source_files: impl Into<SourceFiles>,
        output_dir: &Path,
        context: Option<&mut ReportContext>,
    ) -> Result<RenderSummary, RenderError> {
        let sources = source_files.into();
        let mut staging = match &self.staging_root {
            Some(root) => StagingDir::new_in(root)?,
            None => StagingDir::new()?,
        };

        self.stage_base(&mut staging)?;
        for source in &sources {
            self.stage_dependencies(&mut staging, source)?;
        }

        let mut empty = ReportContext::new();
        let context = context.unwrap_or(&mut empty);
        context.inject_default_title(&self.title);
        let tera_ctx = context.to_tera_context();

        let mut tera = Tera::default();
        // Reports may embed pre-rendered HTML (tables, plots) through the context.
        tera.autoescape_on(vec![]);
        tera.add_template_files(staging.staged_templates())
            .map_err(|e| RenderError::Template {
                template: STAGED_TEMPLATES.to_string(),
                source: e,
            })?;

        let mut outputs = Vec::with_capacity(sources.len());
        for source in &sources {
            let (name, staged) = staging.stage_source(source)?;
            tera.add_template_file(&staged, Some(name.as_str()))
                .map_err(|e| RenderError::Template {
                    template: name.clone(),
                    source: e,
                })?;
            let rendered = tera
                .render(&name, &tera_ctx)
                .map_err(|e| RenderError::Template {
                    template: name.clone(),
                    source: e,
                })?;

            let target = output_dir.join(&name);
            std::fs::write(&target, rendered).map_err(|e| output_err(&target, e))?;
            tracing::info!("wrote: {}", target.display());
            outputs.push(target);
        }

        let assets_dir = output_dir.join(ASSETS_DIR_NAME);
        let copied = self.package.copy_assets(&assets_dir)?;
        staging.close()?;

        Ok(RenderSummary {
            outputs,
            assets_dir,
            assets_copied: copied.len(),
        })
    }

    fn stage_base(&self, staging: &mut StagingDir) -> Result<(), RenderError> {
        let base = self
            .package
            .template(BASE_TEMPLATE)?
            .ok_or_else(|| RenderError::MissingTemplate {
                name: BASE_TEMPLATE.to_string(),
                referenced_by: "the renderer".to_string(),
            })?;
        staging.stage_template(BASE_TEMPLATE, &base)?;
        Ok(())
    }

    /// Stage every package template `source` references directly.
    fn stage_dependencies(&self, staging: &mut StagingDir, source: &Path) -> Result<(), RenderError> {
        let name = staging::source_name(source)?;
        let text = staging::read_source(source)?;
        for reference in discovery::scan(&name, &text)? {
            if staging.contains(&reference.name) {
                continue;
            }
            match self.package.template(&reference.name)? {
                Some(contents) => {
                    staging.stage_template(&reference.name, &contents)?;
                }
                None if reference.optional => {
                    tracing::warn!(
                        "{} includes '{}' with ignore missing; not in template package",
                        source.display(),
                        reference.name
                    );
                }
                None => {
                    return Err(RenderError::MissingTemplate {
                        name: reference.name,
                        referenced_by: source.display().to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn renderer() -> Renderer {
        Renderer::new(PageTitle::new("demo", "summarize"))
    }

    fn write_source(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn plain_source_renders_verbatim() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let content = "<p>static report</p>\n";
        let path = write_source(&src, "index.html", content);

        let summary = renderer().render(&path, out.path(), None).unwrap();
        assert_eq!(summary.outputs, [out.path().join("index.html")]);
        assert_eq!(fs::read_to_string(out.path().join("index.html")).unwrap(), content);
    }

    #[test]
    fn extending_base_gets_default_title() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let path = write_source(
            &src,
            "index.html",
            r#"{% extends "base.html" %}{% block content %}<h1>{{ heading }}</h1>{% endblock %}"#,
        );
        let mut ctx = ReportContext::new();
        ctx.insert("heading", "Alpha diversity");

        renderer().render(&path, out.path(), Some(&mut ctx)).unwrap();
        let html = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(html.contains("<title>demo : summarize</title>"), "{html}");
        assert!(html.contains("<h1>Alpha diversity</h1>"));
    }

    #[test]
    fn context_values_are_not_escaped() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let path = write_source(&src, "table.html", "{{ table }}");
        let mut ctx = ReportContext::new();
        ctx.insert("table", "<table class=\"q2-table\"></table>");

        renderer().render(&path, out.path(), Some(&mut ctx)).unwrap();
        let html = fs::read_to_string(out.path().join("table.html")).unwrap();
        assert_eq!(html, "<table class=\"q2-table\"></table>");
    }

    #[test]
    fn missing_base_in_directory_package_is_reported() {
        let pkg_dir = TempDir::new().unwrap();
        fs::create_dir_all(pkg_dir.path().join("assets")).unwrap();
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let path = write_source(&src, "index.html", "hi");

        let r = renderer().with_package(TemplatePackage::from_dir(pkg_dir.path()).unwrap());
        let err = r.render(&path, out.path(), None).unwrap_err();
        match err {
            RenderError::MissingTemplate { name, .. } => assert_eq!(name, BASE_TEMPLATE),
            other => panic!("expected MissingTemplate, got {other}"),
        }
    }

    #[test]
    fn unloadable_package_template_is_labelled_as_staged_set() {
        let pkg_dir = TempDir::new().unwrap();
        fs::write(pkg_dir.path().join("base.html"), "BASE").unwrap();
        fs::write(
            pkg_dir.path().join("child.html"),
            r#"{% extends "parent.html" %}{% block content %}c{% endblock %}"#,
        )
        .unwrap();
        fs::write(pkg_dir.path().join("parent.html"), "{% block content %}{% endblock %}").unwrap();
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let path = write_source(&src, "index.html", r#"{% include "child.html" %}"#);

        let r = renderer().with_package(TemplatePackage::from_dir(pkg_dir.path()).unwrap());
        let err = r.render(&path, out.path(), None).unwrap_err();
        match err {
            RenderError::Template { template, source } => {
                assert_eq!(template, STAGED_TEMPLATES);
                assert!(source.to_string().contains("child.html"), "{source}");
            }
            other => panic!("expected Template error, got {other}"),
        }
        assert!(!out.path().join("index.html").exists());
    }

    #[test]
    fn optional_include_of_unknown_template_renders() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let path = write_source(
            &src,
            "index.html",
            r#"before{% include "nope.html" ignore missing %}after"#,
        );
        renderer().render(&path, out.path(), None).unwrap();
        assert_eq!(
            fs::read_to_string(out.path().join("index.html")).unwrap(),
            "beforeafter"
        );
    }

    #[test]
    fn from_config_uses_directory_package() {
        let pkg_dir = TempDir::new().unwrap();
        fs::write(pkg_dir.path().join("base.html"), "BASE").unwrap();
        let config = RendererConfig::new(PageTitle::literal("t")).with_templates(pkg_dir.path());
        let r = Renderer::from_config(&config).unwrap();
        assert_eq!(r.package(), &TemplatePackage::Directory(pkg_dir.path().to_path_buf()));
        assert_eq!(r.title(), &PageTitle::literal("t"));
    }
}

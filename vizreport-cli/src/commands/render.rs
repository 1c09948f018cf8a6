//! `vizreport render` — render source templates into an output directory.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use vizreport_core::{PageTitle, RendererConfig};
use vizreport_renderer::{RenderSummary, Renderer, ReportContext};

/// Arguments for `vizreport render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template files to render, in order.
    #[arg(required = true)]
    pub sources: Vec<PathBuf>,

    /// Existing directory receiving rendered files and assets.
    #[arg(short, long)]
    pub output: PathBuf,

    /// JSON or YAML mapping used as the template context.
    #[arg(short, long)]
    pub context: Option<PathBuf>,

    /// YAML renderer config; flags below override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Literal default page title.
    #[arg(long, conflicts_with_all = ["plugin", "method"])]
    pub title: Option<String>,

    /// Plugin name for a `<plugin> : <method>` default title.
    #[arg(long, requires = "method")]
    pub plugin: Option<String>,

    /// Method name for a `<plugin> : <method>` default title.
    #[arg(long, requires = "plugin")]
    pub method: Option<String>,

    /// Template package directory (defaults to the built-in templates).
    #[arg(long)]
    pub templates: Option<PathBuf>,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let config = self.resolve_config()?;
        let renderer = Renderer::from_config(&config).context("failed to load template package")?;
        tracing::debug!(
            "title: {}, package: {:?}, staging root: {:?}",
            config.title,
            renderer.package(),
            config.staging_root
        );

        let mut context = match &self.context {
            Some(path) => load_context(path)?,
            None => ReportContext::new(),
        };

        let summary = renderer
            .render(self.sources.clone(), &self.output, Some(&mut context))
            .with_context(|| format!("render failed for {}", self.output.display()))?;

        print_summary(&summary);
        Ok(())
    }

    fn resolve_config(&self) -> Result<RendererConfig> {
        let mut config = match &self.config {
            Some(path) => Some(
                RendererConfig::load(path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
            ),
            None => None,
        };

        let flag_title = match (&self.title, &self.plugin, &self.method) {
            (Some(title), _, _) => Some(PageTitle::literal(title)),
            (None, Some(plugin), Some(method)) => Some(PageTitle::new(plugin, method)),
            _ => None,
        };

        if let Some(title) = flag_title {
            match config.as_mut() {
                Some(c) => c.title = title,
                None => config = Some(RendererConfig::new(title)),
            }
        }

        let Some(mut config) = config else {
            bail!("a default page title is required: pass --title, --plugin/--method, or --config");
        };
        if let Some(dir) = &self.templates {
            config.templates = Some(dir.clone());
        }
        Ok(config)
    }
}

/// Parse a context file; `.yaml`/`.yml` as YAML, everything else as JSON.
pub(crate) fn load_context(path: &Path) -> Result<ReportContext> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read context {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let ctx = if is_yaml {
        let value: serde_json::Value = serde_yaml::from_str(&text)
            .with_context(|| format!("invalid YAML in {}", path.display()))?;
        ReportContext::from_serialize(&value)
    } else {
        ReportContext::from_json_str(&text)
    };
    ctx.with_context(|| format!("invalid context in {}", path.display()))
}

fn print_summary(summary: &RenderSummary) {
    println!(
        "{} rendered {} file(s), {} asset(s)",
        "✓".green().bold(),
        summary.outputs.len(),
        summary.assets_copied
    );
    for path in &summary.outputs {
        println!("  ✎  {}", path.display());
    }
    println!("  ·  {}", summary.assets_dir.display());
}

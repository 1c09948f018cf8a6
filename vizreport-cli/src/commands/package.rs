//! `vizreport templates` / `vizreport assets` — inspect a template package.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

use vizreport_renderer::{TemplatePackage, ASSETS_DIR_NAME, BASE_TEMPLATE};

/// Arguments shared by `vizreport templates` and `vizreport assets`.
#[derive(Args, Debug)]
pub struct PackageArgs {
    /// Template package directory (defaults to the built-in templates).
    #[arg(long)]
    pub templates: Option<PathBuf>,
}

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "template")]
    name: String,
    #[tabled(rename = "role")]
    role: &'static str,
}

#[derive(Tabled)]
struct AssetRow {
    #[tabled(rename = "asset")]
    path: String,
    #[tabled(rename = "output path")]
    output: String,
}

impl PackageArgs {
    fn package(&self) -> Result<TemplatePackage> {
        match &self.templates {
            Some(dir) => TemplatePackage::from_dir(dir)
                .with_context(|| format!("failed to open template package {}", dir.display())),
            None => Ok(TemplatePackage::embedded()),
        }
    }

    pub fn run_templates(self) -> Result<()> {
        let names = self.package()?.template_names().context("failed to list templates")?;
        let rows: Vec<TemplateRow> = names
            .into_iter()
            .map(|name| {
                let role = if name == BASE_TEMPLATE { "base" } else { "auxiliary" };
                TemplateRow { name, role }
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }

    pub fn run_assets(self) -> Result<()> {
        let files = self.package()?.asset_files().context("failed to list assets")?;
        let rows: Vec<AssetRow> = files
            .into_iter()
            .map(|rel| {
                let path = rel.to_string_lossy().replace('\\', "/");
                AssetRow {
                    output: format!("{ASSETS_DIR_NAME}/{path}"),
                    path,
                }
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}

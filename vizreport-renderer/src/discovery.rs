//! Template dependency discovery.
//!
//! Parses template source with Tera's own parser and collects the tags that
//! pull in other templates:
//!
//! | Tag                                      | Reference kind | Optional |
//! |------------------------------------------|----------------|----------|
//! | `{% extends "base.html" %}`              | Extends        | no       |
//! | `{% include "part.html" %}`              | Include        | no       |
//! | `{% include ["a.html", "b.html"] %}`     | Include        | no       |
//! | `{% include "part.html" ignore missing %}` | Include      | yes      |
//! | `{% import "macros.html" as m %}`        | Import         | no       |
//!
//! Includes are found at any depth (blocks, conditionals, loops, filter
//! sections, macro bodies). Text inside comments, raw blocks and string
//! literals is never mistaken for a tag.
//!
//! Discovery is single-level: the renderer scans user source files only, never
//! the package templates it stages on their behalf. A package template that
//! includes another package template therefore renders only if that second
//! template is also referenced directly by a source file (or is the base).

use std::collections::BTreeMap;

use tera::ast::Node;
use tera::Template;

use crate::error::RenderError;

/// How a template was referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Extends,
    Include,
    Import,
}

/// One template name referenced by a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateReference {
    pub name: String,
    pub kind: ReferenceKind,
    /// `true` only for `ignore missing` includes.
    pub optional: bool,
}

/// All templates referenced by `source`, sorted by name, one entry per name.
///
/// `name` labels parse errors. When a name is referenced several times it is
/// optional only if every reference is optional.
pub fn scan(name: &str, source: &str) -> Result<Vec<TemplateReference>, RenderError> {
    let template = Template::new(name, None, source).map_err(|e| RenderError::Template {
        template: name.to_string(),
        source: e,
    })?;

    let mut found: BTreeMap<String, TemplateReference> = BTreeMap::new();
    let mut record = |name: &str, kind: ReferenceKind, optional: bool| {
        found
            .entry(name.to_string())
            .and_modify(|r| r.optional &= optional)
            .or_insert_with(|| TemplateReference {
                name: name.to_string(),
                kind,
                optional,
            });
    };

    if let Some(parent) = &template.parent {
        record(parent, ReferenceKind::Extends, false);
    }
    for (file, _namespace) in &template.imported_macro_files {
        record(file, ReferenceKind::Import, false);
    }
    visit_includes(&template.ast, &mut |names, ignore_missing| {
        for n in names {
            record(n, ReferenceKind::Include, ignore_missing);
        }
    });

    Ok(found.into_values().collect())
}

/// Names only, for callers that do not care how a template was referenced.
pub fn referenced_templates(name: &str, source: &str) -> Result<Vec<String>, RenderError> {
    Ok(scan(name, source)?.into_iter().map(|r| r.name).collect())
}

fn visit_includes(nodes: &[Node], on_include: &mut dyn FnMut(&[String], bool)) {
    for node in nodes {
        match node {
            Node::Include(_, names, ignore_missing) => on_include(names, *ignore_missing),
            Node::Block(_, block, _) => visit_includes(&block.body, on_include),
            Node::MacroDefinition(_, def, _) => visit_includes(&def.body, on_include),
            Node::FilterSection(_, section, _) => visit_includes(&section.body, on_include),
            Node::Forloop(_, forloop, _) => {
                visit_includes(&forloop.body, on_include);
                if let Some(empty) = &forloop.empty_body {
                    visit_includes(empty, on_include);
                }
            }
            Node::If(branches, _) => {
                for (_, _, body) in &branches.conditions {
                    visit_includes(body, on_include);
                }
                if let Some((_, body)) = &branches.otherwise {
                    visit_includes(body, on_include);
                }
            }
            _ => {}
        }
    }
}

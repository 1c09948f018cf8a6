//! Report context — the variable mapping shared by every template of one call.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use vizreport_core::PageTitle;

use crate::error::RenderError;

/// Context key the renderer always sets to the configured page title.
pub const DEFAULT_PAGE_TITLE_KEY: &str = "q2templates_default_page_title";

/// String-keyed mapping of JSON-like values handed to every template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportContext(Map<String, Value>);

impl ReportContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any value that serializes to a mapping.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, RenderError> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(ReportContext(map)),
            other => Err(RenderError::Context(serde_json::Error::custom(format!(
                "context must be a mapping, got {}",
                kind_of(&other)
            )))),
        }
    }

    /// Parse a JSON object.
    pub fn from_json_str(s: &str) -> Result<Self, RenderError> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_serialize(&value)
    }

    /// Insert a value, replacing any previous value under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Insert any serializable value.
    pub fn insert_serialize<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Option<Value>, RenderError> {
        Ok(self.0.insert(key.into(), serde_json::to_value(value)?))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    /// The page title currently injected, if any.
    pub fn default_page_title(&self) -> Option<&str> {
        self.0.get(DEFAULT_PAGE_TITLE_KEY).and_then(Value::as_str)
    }

    /// Set [`DEFAULT_PAGE_TITLE_KEY`], overwriting whatever the caller stored there.
    pub(crate) fn inject_default_title(&mut self, title: &PageTitle) {
        let previous = self.insert(DEFAULT_PAGE_TITLE_KEY, title.to_string());
        if let Some(previous) = previous {
            tracing::debug!("overwrote caller value for {DEFAULT_PAGE_TITLE_KEY}: {previous}");
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> tera::Context {
        let mut ctx = tera::Context::new();
        for (key, value) in &self.0 {
            ctx.insert(key.as_str(), value);
        }
        ctx
    }
}

impl From<Map<String, Value>> for ReportContext {
    fn from(map: Map<String, Value>) -> Self {
        ReportContext(map)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#![forbid(unsafe_code)]

//! Update menu attribute schema + interaction model (headless).
//!
//! An update menu is a dropdown-style button group drawn on top of a chart. This crate owns
//! everything that does not need text measurement:
//! - the attribute schema and the coercion that turns a raw layout object into [`MenuOptions`]
//! - the interaction state machine ([`MenuState`]) driven by header/button events
//! - the [`ChartApi`] seam used to invoke a button's method once it is selected
//!
//! Geometry and SVG live in `updatemenu-render`.

pub mod attributes;
pub mod chart;
pub mod color;
pub mod config;
pub mod defaults;
pub mod error;
pub mod model;
pub mod state;

pub use attributes::{Method, XAnchor, YAnchor};
pub use chart::{ChartApi, MethodCall};
pub use config::LayoutConfig;
pub use defaults::{LayoutFont, supply_defaults};
pub use error::{Error, Result};
pub use model::{Button, Font, MenuOptions};
pub use state::{ButtonVisual, Fold, MenuEvent, MenuState};

use serde_json::Value;

/// Coerces layout objects into [`MenuOptions`], merging optional site-wide layout defaults first.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    site_layout: LayoutConfig,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Site defaults sit underneath every layout passed to [`Engine::supply_defaults`].
    pub fn with_site_layout(mut self, site_layout: LayoutConfig) -> Self {
        self.site_layout.deep_merge(site_layout.as_value());
        self
    }

    pub fn site_layout(&self) -> &LayoutConfig {
        &self.site_layout
    }

    pub fn supply_defaults(&self, layout_in: &Value) -> Result<MenuOptions> {
        if !layout_in.is_object() {
            return Err(Error::InvalidLayout {
                message: format!("expected a JSON object, got {}", json_kind(layout_in)),
            });
        }

        let mut merged = self.site_layout.clone();
        merged.deep_merge(layout_in);
        Ok(defaults::supply_defaults(merged.as_value()))
    }

    /// Parses `text` as JSON before coercing it.
    pub fn supply_defaults_str(&self, text: &str) -> Result<MenuOptions> {
        let value: Value = serde_json::from_str(text)?;
        self.supply_defaults(&value)
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

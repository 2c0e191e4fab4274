use crate::attributes::{
    self, DEFAULT_BGCOLOR, DEFAULT_BORDERCOLOR, DEFAULT_BORDERWIDTH, Method, XAnchor, YAnchor,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub color: String,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: attributes::DEFAULT_FONT_FAMILY.to_string(),
            size: attributes::DEFAULT_FONT_SIZE,
            color: attributes::DEFAULT_FONT_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub method: Method,
    /// Always exactly [`attributes::MAX_ARGS`] entries after coercion; absent ones are `null`.
    pub args: Vec<Value>,
    pub label: String,
}

impl Default for Button {
    fn default() -> Self {
        Self {
            method: Method::default(),
            args: vec![Value::Null; attributes::MAX_ARGS],
            label: String::new(),
        }
    }
}

impl Button {
    pub fn new(label: impl Into<String>, method: Method, args: Vec<Value>) -> Self {
        let mut args = args;
        args.resize(attributes::MAX_ARGS, Value::Null);
        Self {
            method,
            args,
            label: label.into(),
        }
    }
}

/// Fully coerced update menu options.
///
/// Geometry (width, height, pixel position) is never stored here; it is recomputed on every
/// render from these options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuOptions {
    pub visible: bool,
    pub buttons: Vec<Button>,
    pub x: f64,
    pub y: f64,
    pub xanchor: XAnchor,
    pub yanchor: YAnchor,
    pub font: Font,
    pub bgcolor: String,
    pub bordercolor: String,
    pub borderwidth: f64,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            visible: false,
            buttons: Vec::new(),
            x: attributes::DEFAULT_X,
            y: attributes::DEFAULT_Y,
            xanchor: XAnchor::default(),
            yanchor: YAnchor::default(),
            font: Font::default(),
            bgcolor: DEFAULT_BGCOLOR.to_string(),
            bordercolor: DEFAULT_BORDERCOLOR.to_string(),
            borderwidth: DEFAULT_BORDERWIDTH,
        }
    }
}

impl MenuOptions {
    /// A visible menu with default styling.
    pub fn with_buttons(buttons: Vec<Button>) -> Self {
        Self {
            visible: !buttons.is_empty(),
            buttons,
            ..Self::default()
        }
    }

    pub fn is_drawable(&self) -> bool {
        self.visible && !self.buttons.is_empty()
    }
}

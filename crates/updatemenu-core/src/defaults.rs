//! Attribute coercion: turns a raw layout object into [`MenuOptions`].
//!
//! Coercion never fails. A value that has the wrong type, lies outside its range, or names an
//! unknown enum member is replaced by the attribute default.

use crate::attributes::{self, MAX_ARGS, Method, POSITION_MAX, POSITION_MIN, XAnchor, YAnchor};
use crate::color;
use crate::model::{Button, Font, MenuOptions};
use serde_json::Value;

/// The layout-wide font that menu fonts inherit from.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutFont(pub Font);

impl Default for LayoutFont {
    fn default() -> Self {
        Self(Font::default())
    }
}

impl LayoutFont {
    pub fn from_layout(layout_in: &Value) -> Self {
        Self(coerce_font(layout_in.get("font"), &Font::default()))
    }
}

pub fn supply_defaults(layout_in: &Value) -> MenuOptions {
    let layout_font = LayoutFont::from_layout(layout_in);
    supply_menu_defaults(layout_in.get("updatemenu"), &layout_font)
}

pub fn supply_menu_defaults(cont_in: Option<&Value>, layout_font: &LayoutFont) -> MenuOptions {
    let empty = Value::Null;
    let cont_in = cont_in.filter(|v| v.is_object()).unwrap_or(&empty);

    let buttons = buttons_defaults(cont_in.get("buttons"));
    let visible = coerce_bool(cont_in.get("visible"), !buttons.is_empty());

    let mut out = MenuOptions {
        visible,
        buttons,
        ..MenuOptions::default()
    };
    if !visible {
        return out;
    }

    let x_in = cont_in.get("x").filter(|v| !v.is_null());
    let y_in = cont_in.get("y").filter(|v| !v.is_null());
    if x_in.is_some() == y_in.is_some() {
        out.x = coerce_number(x_in, POSITION_MIN, POSITION_MAX, attributes::DEFAULT_X);
        out.y = coerce_number(y_in, POSITION_MIN, POSITION_MAX, attributes::DEFAULT_Y);
    } else {
        tracing::debug!("updatemenu: x and y must be given together; using defaults for both");
    }

    out.xanchor = coerce_str(cont_in.get("xanchor"))
        .and_then(XAnchor::parse)
        .unwrap_or_default();
    out.yanchor = coerce_str(cont_in.get("yanchor"))
        .and_then(YAnchor::parse)
        .unwrap_or_default();

    out.font = coerce_font(cont_in.get("font"), &layout_font.0);

    out.bgcolor = coerce_color(cont_in.get("bgcolor"), attributes::DEFAULT_BGCOLOR);
    out.bordercolor = coerce_color(cont_in.get("bordercolor"), attributes::DEFAULT_BORDERCOLOR);
    out.borderwidth = coerce_number(
        cont_in.get("borderwidth"),
        0.0,
        f64::INFINITY,
        attributes::DEFAULT_BORDERWIDTH,
    );

    out
}

fn buttons_defaults(buttons_in: Option<&Value>) -> Vec<Button> {
    let Some(Value::Array(buttons_in)) = buttons_in else {
        return Vec::new();
    };

    buttons_in
        .iter()
        .map(|button_in| Button {
            method: coerce_str(button_in.get("method"))
                .and_then(Method::parse)
                .unwrap_or_default(),
            args: coerce_args(button_in.get("args")),
            label: coerce_string(button_in.get("label")).unwrap_or_default(),
        })
        .collect()
}

fn coerce_font(font_in: Option<&Value>, dflt: &Font) -> Font {
    let font_in = font_in.filter(|v| v.is_object());
    let field = |key: &str| font_in.and_then(|f| f.get(key));

    Font {
        family: coerce_string(field("family"))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| dflt.family.clone()),
        size: coerce_number(
            field("size"),
            attributes::MIN_FONT_SIZE,
            f64::INFINITY,
            dflt.size,
        ),
        color: coerce_color(field("color"), &dflt.color),
    }
}

fn coerce_bool(v: Option<&Value>, dflt: bool) -> bool {
    v.and_then(Value::as_bool).unwrap_or(dflt)
}

/// Numbers and numeric strings inside `[min, max]`.
fn coerce_number(v: Option<&Value>, min: f64, max: f64, dflt: f64) -> f64 {
    let n = match v {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite() && *n >= min && *n <= max)
        .unwrap_or(dflt)
}

fn coerce_str(v: Option<&Value>) -> Option<&str> {
    v.and_then(Value::as_str)
}

/// Strings pass through and numbers are stringified. Anything else takes the default.
fn coerce_string(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_color(v: Option<&Value>, dflt: &str) -> String {
    coerce_str(v)
        .filter(|s| color::is_valid(s))
        .map(str::to_string)
        .unwrap_or_else(|| dflt.to_string())
}

fn coerce_args(v: Option<&Value>) -> Vec<Value> {
    let mut args: Vec<Value> = match v {
        Some(Value::Array(items)) => items.iter().take(MAX_ARGS).cloned().collect(),
        _ => Vec::new(),
    };
    args.resize(MAX_ARGS, Value::Null);
    args
}

//! Color helpers: validation for coercion and `fill`/`stroke` style strings for rendering.

use std::str::FromStr;

/// Parses any CSS color (`#rgb`, `#rrggbb`, `rgb()`, `hsl()`, named colors).
pub fn parse(s: &str) -> Option<svgtypes::Color> {
    svgtypes::Color::from_str(s.trim()).ok()
}

pub fn is_valid(s: &str) -> bool {
    parse(s).is_some()
}

/// `rgb(r, g, b)` without the alpha channel; opacity is emitted separately.
pub fn rgb(s: &str) -> String {
    let c = parse(s).unwrap_or_else(svgtypes::Color::black);
    format!("rgb({}, {}, {})", c.red, c.green, c.blue)
}

pub fn opacity(s: &str) -> f64 {
    parse(s).map(|c| f64::from(c.alpha) / 255.0).unwrap_or(1.0)
}

fn fmt_opacity(a: f64) -> String {
    let r = (a * 1000.0).round() / 1000.0;
    if r.fract() == 0.0 {
        format!("{}", r as i64)
    } else {
        format!("{r}")
    }
}

/// Inline style declarations equivalent to painting an element's fill with `color`.
pub fn fill_style(color: &str) -> String {
    format!(
        "fill: {}; fill-opacity: {};",
        rgb(color),
        fmt_opacity(opacity(color))
    )
}

pub fn stroke_style(color: &str) -> String {
    format!(
        "stroke: {}; stroke-opacity: {};",
        rgb(color),
        fmt_opacity(opacity(color))
    )
}

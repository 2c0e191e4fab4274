//! Attribute schema: enumerated values, numeric ranges and defaults.

use serde::{Deserialize, Serialize};

pub const POSITION_MIN: f64 = -2.0;
pub const POSITION_MAX: f64 = 3.0;
pub const DEFAULT_X: f64 = 0.0;
pub const DEFAULT_Y: f64 = 1.0;

/// `colorAttrs.lightLine`
pub const DEFAULT_BGCOLOR: &str = "#eee";
/// `colorAttrs.defaultLine`
pub const DEFAULT_BORDERCOLOR: &str = "#444";
pub const DEFAULT_BORDERWIDTH: f64 = 0.0;

pub const DEFAULT_FONT_FAMILY: &str = r#""Open Sans", verdana, arial, sans-serif"#;
pub const DEFAULT_FONT_SIZE: f64 = 12.0;
pub const DEFAULT_FONT_COLOR: &str = "#444";
pub const MIN_FONT_SIZE: f64 = 1.0;

/// Maximum number of `args` forwarded to a chart method.
pub const MAX_ARGS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Restyle,
    Relayout,
    Filter,
}

impl Method {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "restyle" => Some(Self::Restyle),
            "relayout" => Some(Self::Relayout),
            "filter" => Some(Self::Filter),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restyle => "restyle",
            Self::Relayout => "relayout",
            Self::Filter => "filter",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XAnchor {
    Auto,
    #[default]
    Left,
    Center,
    Right,
}

impl XAnchor {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(Self::Auto),
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Resolves `auto` from the normalized x position: the right third anchors right, the
    /// middle third anchors center, everything else anchors left.
    pub fn resolve(self, x: f64) -> HorizontalEdge {
        match self {
            Self::Left => HorizontalEdge::Left,
            Self::Center => HorizontalEdge::Center,
            Self::Right => HorizontalEdge::Right,
            Self::Auto if x >= 2.0 / 3.0 => HorizontalEdge::Right,
            Self::Auto if x > 1.0 / 3.0 => HorizontalEdge::Center,
            Self::Auto => HorizontalEdge::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YAnchor {
    Auto,
    Top,
    Middle,
    #[default]
    Bottom,
}

impl YAnchor {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(Self::Auto),
            "top" => Some(Self::Top),
            "middle" => Some(Self::Middle),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    /// `y` grows upwards, so the lower third anchors bottom.
    pub fn resolve(self, y: f64) -> VerticalEdge {
        match self {
            Self::Top => VerticalEdge::Top,
            Self::Middle => VerticalEdge::Middle,
            Self::Bottom => VerticalEdge::Bottom,
            Self::Auto if y <= 1.0 / 3.0 => VerticalEdge::Bottom,
            Self::Auto if y < 2.0 / 3.0 => VerticalEdge::Middle,
            Self::Auto => VerticalEdge::Top,
        }
    }
}

/// A horizontal anchor with `auto` already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalEdge {
    Left,
    Center,
    Right,
}

impl HorizontalEdge {
    /// Fraction of the menu width that lies left of the anchor point.
    pub fn fraction_before(self) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => 0.5,
            Self::Right => 1.0,
        }
    }
}

/// A vertical anchor with `auto` already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalEdge {
    Top,
    Middle,
    Bottom,
}

impl VerticalEdge {
    /// Fraction of the menu height that lies above the anchor point.
    pub fn fraction_before(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Middle => 0.5,
            Self::Bottom => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_x_anchor_splits_into_thirds() {
        assert_eq!(XAnchor::Auto.resolve(0.0), HorizontalEdge::Left);
        assert_eq!(XAnchor::Auto.resolve(1.0 / 3.0), HorizontalEdge::Left);
        assert_eq!(XAnchor::Auto.resolve(0.5), HorizontalEdge::Center);
        assert_eq!(XAnchor::Auto.resolve(2.0 / 3.0), HorizontalEdge::Right);
        assert_eq!(XAnchor::Auto.resolve(-1.0), HorizontalEdge::Left);
        assert_eq!(XAnchor::Right.resolve(0.0), HorizontalEdge::Right);
    }

    #[test]
    fn auto_y_anchor_splits_into_thirds() {
        assert_eq!(YAnchor::Auto.resolve(0.0), VerticalEdge::Bottom);
        assert_eq!(YAnchor::Auto.resolve(1.0 / 3.0), VerticalEdge::Bottom);
        assert_eq!(YAnchor::Auto.resolve(0.5), VerticalEdge::Middle);
        assert_eq!(YAnchor::Auto.resolve(1.0), VerticalEdge::Top);
        assert_eq!(YAnchor::Top.resolve(0.0), VerticalEdge::Top);
    }

    #[test]
    fn enum_strings_round_trip_through_serde() {
        let v = serde_json::to_value(XAnchor::Center).unwrap();
        assert_eq!(v, "center");
        let m: Method = serde_json::from_value(serde_json::json!("relayout")).unwrap();
        assert_eq!(m, Method::Relayout);
        assert_eq!(Method::parse("animate"), None);
    }
}

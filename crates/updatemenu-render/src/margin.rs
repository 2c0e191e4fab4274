//! Margin reservation: components push the space they need around the plot area.

use crate::layout::PlotSize;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Id under which the update menu pushes its reservation.
pub const UPDATE_MENU_MARGIN_ID: &str = "updatemenu";

/// Pixels a component occupies on each side of its anchor point `(x, y)` (normalized plot
/// coordinates, `y` up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoMargin {
    pub x: f64,
    pub y: f64,
    pub l: f64,
    pub r: f64,
    pub t: f64,
    pub b: f64,
}

/// Host side of the margin system. `None` withdraws an earlier push.
pub trait MarginHost {
    fn auto_margin(&mut self, id: &str, margin: Option<AutoMargin>);
}

/// How far pushed components stick out of the figure, per side, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarginOverflow {
    pub l: f64,
    pub r: f64,
    pub t: f64,
    pub b: f64,
}

impl MarginOverflow {
    pub fn is_zero(&self) -> bool {
        self.l <= 0.0 && self.r <= 0.0 && self.t <= 0.0 && self.b <= 0.0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarginRegistry {
    pushes: IndexMap<String, AutoMargin>,
}

impl MarginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&AutoMargin> {
        self.pushes.get(id)
    }

    pub fn len(&self) -> usize {
        self.pushes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pushes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AutoMargin)> {
        self.pushes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The extra margin needed so every pushed component fits inside the figure.
    pub fn overflow(&self, plot: &PlotSize) -> MarginOverflow {
        let mut out = MarginOverflow::default();
        for m in self.pushes.values() {
            let anchor_x = plot.l + m.x * plot.w;
            let anchor_y = plot.t + (1.0 - m.y) * plot.h;
            let figure_w = plot.l + plot.w + plot.r;
            let figure_h = plot.t + plot.h + plot.b;

            out.l = out.l.max(m.l - anchor_x);
            out.r = out.r.max(anchor_x + m.r - figure_w);
            out.t = out.t.max(m.t - anchor_y);
            out.b = out.b.max(anchor_y + m.b - figure_h);
        }
        out
    }
}

impl MarginHost for MarginRegistry {
    fn auto_margin(&mut self, id: &str, margin: Option<AutoMargin>) {
        match margin {
            Some(m) => {
                self.pushes.insert(id.to_string(), m);
            }
            None => {
                self.pushes.shift_remove(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot() -> PlotSize {
        PlotSize {
            l: 80.0,
            r: 80.0,
            t: 100.0,
            b: 80.0,
            w: 540.0,
            h: 270.0,
        }
    }

    #[test]
    fn withdraw_removes_push() {
        let mut reg = MarginRegistry::new();
        let m = AutoMargin {
            x: 0.0,
            y: 1.0,
            l: 0.0,
            r: 10.0,
            t: 10.0,
            b: 0.0,
        };
        reg.auto_margin("a", Some(m));
        reg.auto_margin("b", Some(m));
        reg.auto_margin("a", None);
        assert_eq!(reg.len(), 1);
        assert!(reg.get("b").is_some());
    }

    #[test]
    fn overflow_reports_parts_outside_the_figure() {
        let mut reg = MarginRegistry::new();
        reg.auto_margin(
            UPDATE_MENU_MARGIN_ID,
            Some(AutoMargin {
                x: 0.0,
                y: 1.0,
                l: 0.0,
                r: 60.0,
                t: 130.0,
                b: 0.0,
            }),
        );
        let o = reg.overflow(&plot());
        assert_eq!(o.t, 30.0);
        assert_eq!(o.l, 0.0);
        assert!(!o.is_zero());

        reg.auto_margin(UPDATE_MENU_MARGIN_ID, None);
        assert!(reg.overflow(&plot()).is_zero());
    }
}

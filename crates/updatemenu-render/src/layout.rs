//! Menu geometry: item sizes, vertical stacking and anchoring against the plot area.

use crate::margin::AutoMargin;
use crate::text::{TextMeasurer, TextStyle, label_lines};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use updatemenu_core::attributes::{HorizontalEdge, VerticalEdge};
use updatemenu_core::{ButtonVisual, MenuOptions, MenuState};

/// Horizontal padding added to the widest button label.
pub const BUTTON_PADDING_X: f64 = 40.0;
pub const MIN_BUTTON_WIDTH: f64 = 30.0;
/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_RATIO: f64 = 1.3;
pub const MIN_TEXT_HEIGHT: f64 = 16.0;
pub const ITEM_PADDING_Y: f64 = 3.0;
/// Baseline nudge applied to the item text.
pub const TEXT_OFFSET_Y: f64 = 3.0;
pub const HEADER_GAP: f64 = 10.0;
pub const BUTTON_GAP: f64 = 2.0;

/// The plot area inside the figure, in pixels: offsets `l`/`t`, size `w`/`h`, and the
/// remaining `r`/`b` margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotSize {
    pub l: f64,
    pub t: f64,
    pub r: f64,
    pub b: f64,
    pub w: f64,
    pub h: f64,
}

impl Default for PlotSize {
    fn default() -> Self {
        Self::from_figure(700.0, 450.0, Margins::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub l: f64,
    pub r: f64,
    pub t: f64,
    pub b: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            l: 80.0,
            r: 80.0,
            t: 100.0,
            b: 80.0,
        }
    }
}

impl Margins {
    pub fn uniform(px: f64) -> Self {
        Self {
            l: px,
            r: px,
            t: px,
            b: px,
        }
    }
}

impl PlotSize {
    pub fn from_figure(width: f64, height: f64, margins: Margins) -> Self {
        Self {
            l: margins.l,
            t: margins.t,
            r: margins.r,
            b: margins.b,
            w: width - margins.l - margins.r,
            h: height - margins.t - margins.b,
        }
    }

    pub fn figure_width(&self) -> f64 {
        self.l + self.w + self.r
    }

    pub fn figure_height(&self) -> f64 {
        self.t + self.h + self.b
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [self.l, self.t, self.r, self.b, self.w, self.h]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.w <= 0.0 || self.h <= 0.0 {
            return Err(Error::InvalidPlotSize {
                message: format!("plot area must be finite and non-empty, got {self:?}"),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum ItemKind {
    Header,
    Button(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemLayout {
    pub kind: ItemKind,
    pub label: String,
    pub lines: Vec<String>,
    /// Offset of the item inside the menu group.
    pub translate_x: f64,
    pub translate_y: f64,
    pub width: f64,
    pub height: f64,
    pub text_x: f64,
    pub text_y: f64,
    pub line_height: f64,
    /// `None` for the header.
    pub visual: Option<ButtonVisual>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuLayout {
    /// Rounded up to whole pixels.
    pub width: f64,
    pub height: f64,
    /// Top-left corner of the menu in figure pixels.
    pub lx: f64,
    pub ly: f64,
    pub xanchor: HorizontalEdge,
    pub yanchor: VerticalEdge,
    pub buttons_visible: bool,
    pub active: usize,
    pub header: ItemLayout,
    pub buttons: Vec<ItemLayout>,
    pub auto_margin: AutoMargin,
}

/// JS `Math.round`: halves round towards positive infinity.
pub(crate) fn js_round(v: f64) -> f64 {
    // `f64::round` sends negative halves away from zero; JS sends them up.
    let r = v.round();
    if v - r == 0.5 { r + 1.0 } else { r }
}

/// Lays out a visible, non-empty menu. Returns `None` when there is nothing to draw.
pub fn layout_update_menu(
    options: &MenuOptions,
    state: &MenuState,
    plot: &PlotSize,
    measurer: &dyn TextMeasurer,
) -> Option<MenuLayout> {
    if !options.is_drawable() {
        return None;
    }
    let count = options.buttons.len();
    let active = state.active_index(count)?;
    let header_label = state.header_label(options)?;

    let style = TextStyle::from(&options.font);
    let border = options.borderwidth;

    // Width comes from the buttons only; the header suffix does not widen the menu.
    let mut width: f64 = 0.0;
    for button in &options.buttons {
        let t_width = measurer.measure(&button.label, &style).width;
        width = width.max((t_width + BUTTON_PADDING_X).max(MIN_BUTTON_WIDTH));
    }

    let line_height = options.font.size * LINE_HEIGHT_RATIO;
    let mut height: f64 = 0.0;
    let mut place = |kind: ItemKind, label: String, visual: Option<ButtonVisual>| {
        let lines = label_lines(&label);
        let t_lines = lines.len().max(1) as f64;
        let h_eff = (line_height * t_lines).max(MIN_TEXT_HEIGHT) + ITEM_PADDING_Y;

        let item = ItemLayout {
            kind,
            label,
            lines,
            translate_x: border,
            translate_y: border + height,
            width,
            height: h_eff,
            text_x: width / 2.0,
            text_y: h_eff / 2.0 - (t_lines - 1.0) * line_height / 2.0 + TEXT_OFFSET_Y,
            line_height,
            visual,
        };

        height += h_eff
            + match kind {
                ItemKind::Header => HEADER_GAP,
                ItemKind::Button(_) => BUTTON_GAP,
            };
        item
    };

    let header = place(ItemKind::Header, header_label, None);
    let buttons: Vec<ItemLayout> = options
        .buttons
        .iter()
        .enumerate()
        .map(|(i, b)| {
            place(
                ItemKind::Button(i),
                b.label.clone(),
                Some(state.button_visual(i, count)),
            )
        })
        .collect();

    let xanchor = options.xanchor.resolve(options.x);
    let yanchor = options.yanchor.resolve(options.y);

    let lx = plot.l + plot.w * options.x - width * xanchor.fraction_before();
    let ly = plot.t + plot.h * (1.0 - options.y) - height * yanchor.fraction_before();

    let width = width.ceil();
    let height = height.ceil();

    let auto_margin = AutoMargin {
        x: options.x,
        y: options.y,
        l: width * xanchor.fraction_before(),
        r: width * (1.0 - xanchor.fraction_before()),
        t: height * yanchor.fraction_before(),
        b: height * (1.0 - yanchor.fraction_before()),
    };

    let layout = MenuLayout {
        width,
        height,
        lx: js_round(lx),
        ly: js_round(ly),
        xanchor,
        yanchor,
        buttons_visible: state.fold().buttons_visible(),
        active,
        header,
        buttons,
        auto_margin,
    };
    tracing::debug!(
        width = layout.width,
        height = layout.height,
        lx = layout.lx,
        ly = layout.ly,
        "updatemenu: layout"
    );
    Some(layout)
}

#![forbid(unsafe_code)]

//! Headless layout + SVG rendering for update menus.
//!
//! [`draw`] is the entry point: it lays out a coerced [`MenuOptions`] against the plot area,
//! reports the space the menu needs to the host's margin system and emits an SVG fragment.

pub mod css;
pub mod layout;
pub mod margin;
pub mod svg;
pub mod text;

use crate::layout::{MenuLayout, PlotSize};
use crate::margin::{MarginHost, UPDATE_MENU_MARGIN_ID};
use crate::svg::SvgRenderOptions;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use serde::Serialize;
use std::sync::Arc;
use updatemenu_core::{MenuOptions, MenuState};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] updatemenu_core::Error),
    #[error("invalid plot size: {message}")]
    InvalidPlotSize { message: String },
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub svg: SvgRenderOptions,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            svg: SvgRenderOptions::default(),
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("svg", &self.svg)
            .finish_non_exhaustive()
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, Serialize)]
pub struct DrawnMenu {
    pub layout: MenuLayout,
    /// `<g class="updatemenu">` fragment in figure pixels.
    pub svg: String,
}

/// Renders the menu for the current `state`.
///
/// Hidden or empty menus draw nothing and withdraw their margin reservation. `state` is synced
/// against the button list first, so exactly one button is active in every drawn menu.
pub fn draw(
    options: &MenuOptions,
    state: &mut MenuState,
    plot: &PlotSize,
    margins: &mut dyn MarginHost,
    layout_options: &LayoutOptions,
) -> Result<Option<DrawnMenu>> {
    plot.validate()?;
    state.sync(options.buttons.len());

    let Some(layout) = layout::layout_update_menu(
        options,
        state,
        plot,
        layout_options.text_measurer.as_ref(),
    ) else {
        margins.auto_margin(UPDATE_MENU_MARGIN_ID, None);
        return Ok(None);
    };

    margins.auto_margin(UPDATE_MENU_MARGIN_ID, Some(layout.auto_margin));
    let svg = svg::render_menu_svg(&layout, options, &layout_options.svg);
    Ok(Some(DrawnMenu { layout, svg }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::margin::MarginRegistry;
    use serde_json::json;
    use updatemenu_core::{Button, Method};

    fn menu() -> MenuOptions {
        MenuOptions::with_buttons(vec![
            Button::new("Linear", Method::Relayout, vec![json!({"yaxis.type": "linear"})]),
            Button::new("Log", Method::Relayout, vec![json!({"yaxis.type": "log"})]),
        ])
    }

    #[test]
    fn draw_pushes_and_withdraws_margin() {
        let mut margins = MarginRegistry::new();
        let mut state = MenuState::new();
        let mut opts = menu();

        let drawn = draw(
            &opts,
            &mut state,
            &PlotSize::default(),
            &mut margins,
            &LayoutOptions::default(),
        )
        .unwrap()
        .expect("drawn");
        assert_eq!(
            margins.get(UPDATE_MENU_MARGIN_ID),
            Some(&drawn.layout.auto_margin)
        );

        opts.visible = false;
        let none = draw(
            &opts,
            &mut state,
            &PlotSize::default(),
            &mut margins,
            &LayoutOptions::default(),
        )
        .unwrap();
        assert!(none.is_none());
        assert!(margins.is_empty());
    }

    #[test]
    fn draw_rejects_degenerate_plots() {
        let plot = PlotSize {
            w: 0.0,
            ..PlotSize::default()
        };
        let err = draw(
            &menu(),
            &mut MenuState::new(),
            &plot,
            &mut MarginRegistry::new(),
            &LayoutOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidPlotSize { .. }));
    }
}

#![forbid(unsafe_code)]

//! `updatemenu` is a headless implementation of chart update menus: a dropdown of buttons that
//! restyle, relayout or filter the chart they are drawn on.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`updatemenu::render`)
//! - `raster`: enable PNG output via pure-Rust SVG rasterization

pub use updatemenu_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use updatemenu_render::css::{
        InMemoryDocument, InjectOutcome, StyleDocument, StyleSheet, css_text, inject_styles,
    };
    pub use updatemenu_render::layout::{MenuLayout, PlotSize};
    pub use updatemenu_render::margin::{AutoMargin, MarginHost, MarginRegistry};
    pub use updatemenu_render::svg::SvgRenderOptions;
    pub use updatemenu_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use updatemenu_render::{DrawnMenu, LayoutOptions};

    use serde_json::Value;
    use updatemenu_core::{ChartApi, Engine, MenuEvent, MenuOptions, MenuState, MethodCall};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Parse(#[from] updatemenu_core::Error),
        #[error(transparent)]
        Render(#[from] updatemenu_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Synchronous draw helper (executor-free).
    pub fn draw_menu_sync(
        options: &MenuOptions,
        state: &mut MenuState,
        plot: &PlotSize,
        margins: &mut dyn MarginHost,
        layout_options: &LayoutOptions,
    ) -> Result<Option<DrawnMenu>> {
        Ok(updatemenu_render::draw(
            options,
            state,
            plot,
            margins,
            layout_options,
        )?)
    }

    pub async fn draw_menu(
        options: &MenuOptions,
        state: &mut MenuState,
        plot: &PlotSize,
        margins: &mut dyn MarginHost,
        layout_options: &LayoutOptions,
    ) -> Result<Option<DrawnMenu>> {
        draw_menu_sync(options, state, plot, margins, layout_options)
    }

    /// One update menu together with everything needed to draw it and react to events.
    ///
    /// This is intended for UI integrations that would otherwise thread options, state and
    /// margins through every call. It stays runtime-agnostic: all work is CPU-bound and does
    /// not perform I/O.
    #[derive(Debug, Clone)]
    pub struct HeadlessMenu {
        pub engine: Engine,
        pub plot: PlotSize,
        pub layout: LayoutOptions,
        options: MenuOptions,
        state: MenuState,
        margins: MarginRegistry,
    }

    impl HeadlessMenu {
        pub fn from_layout(engine: Engine, layout_in: &Value) -> Result<Self> {
            let options = engine.supply_defaults(layout_in)?;
            Ok(Self {
                engine,
                plot: PlotSize::default(),
                layout: LayoutOptions::default(),
                options,
                state: MenuState::new(),
                margins: MarginRegistry::new(),
            })
        }

        pub fn from_json(text: &str) -> Result<Self> {
            let engine = Engine::new();
            let options = engine.supply_defaults_str(text)?;
            Ok(Self {
                engine,
                plot: PlotSize::default(),
                layout: LayoutOptions::default(),
                options,
                state: MenuState::new(),
                margins: MarginRegistry::new(),
            })
        }

        pub fn with_plot(mut self, plot: PlotSize) -> Self {
            self.plot = plot;
            self
        }

        pub fn with_layout_options(mut self, layout: LayoutOptions) -> Self {
            self.layout = layout;
            self
        }

        pub fn options(&self) -> &MenuOptions {
            &self.options
        }

        pub fn state(&self) -> &MenuState {
            &self.state
        }

        pub fn margins(&self) -> &MarginRegistry {
            &self.margins
        }

        /// Re-coerces a new layout. The interaction state is kept and re-synced on the next draw.
        pub fn set_layout(&mut self, layout_in: &Value) -> Result<()> {
            self.options = self.engine.supply_defaults(layout_in)?;
            Ok(())
        }

        /// Feeds one event to the state machine. A button click also runs the button's method
        /// against `chart`; the call is returned once it succeeded.
        pub fn apply(
            &mut self,
            event: MenuEvent,
            chart: &mut dyn ChartApi,
        ) -> Result<Option<MethodCall>> {
            let Some(call) = self.state.apply(event, &self.options)? else {
                return Ok(None);
            };
            call.invoke(chart)?;
            Ok(Some(call))
        }

        pub fn draw_sync(&mut self) -> Result<Option<DrawnMenu>> {
            draw_menu_sync(
                &self.options,
                &mut self.state,
                &self.plot,
                &mut self.margins,
                &self.layout,
            )
        }

        pub async fn draw(&mut self) -> Result<Option<DrawnMenu>> {
            self.draw_sync()
        }

        /// Draws the menu into a figure-sized standalone SVG document.
        pub fn render_svg_sync(&mut self) -> Result<Option<String>> {
            let Some(drawn) = self.draw_sync()? else {
                return Ok(None);
            };
            Ok(Some(updatemenu_render::svg::render_standalone_svg(
                &drawn.layout,
                &self.options,
                &self.plot,
                &self.layout.svg,
            )))
        }

        pub async fn render_svg(&mut self) -> Result<Option<String>> {
            self.render_svg_sync()
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &mut self,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Option<Vec<u8>>> {
            let Some(svg) = self.render_svg_sync()? else {
                return Ok(None);
            };
            Ok(Some(raster::svg_to_png(&svg, raster)?))
        }
    }
}

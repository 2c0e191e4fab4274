use crate::css;
use crate::layout::{ItemKind, ItemLayout, MenuLayout, PlotSize};
use std::fmt::Write as _;
use updatemenu_core::{ButtonVisual, MenuOptions, color};

mod util;

pub(crate) use util::{escape_xml, fmt};

pub const CONTAINER_CLASS: &str = "updatemenu";
pub const HEADER_CLASS: &str = "updatemenu-header";
pub const BUTTON_CLASS: &str = "updatemenu-button";
pub const ITEM_CLASS: &str = "updatemenu-item";
pub const ITEM_RECT_CLASS: &str = "updatemenu-item-rect";
pub const ITEM_TEXT_CLASS: &str = "updatemenu-item-text";
pub const BUTTON_ACTIVE_CLASS: &str = "updatemenu-button-active";

/// Corner radii of item rects.
pub const RX: f64 = 2.0;
pub const RY: f64 = 2.0;

pub const ACTIVE_COLOR: &str = "blue";
pub const HOVER_COLOR: &str = "red";

/// Extra stroke width of the header rect over `borderwidth`.
pub const HEADER_EXTRA_BORDER: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Fill of the active button's rect.
    pub active_color: String,
    /// Fill of a hovered button's rect.
    pub hover_color: String,
    /// Root `id` of standalone documents.
    pub diagram_id: Option<String>,
    /// Background fill of standalone documents.
    pub background: Option<String>,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            active_color: ACTIVE_COLOR.to_string(),
            hover_color: HOVER_COLOR.to_string(),
            diagram_id: None,
            background: Some("white".to_string()),
        }
    }
}

/*
 * <g updatemenu>
 *   <g item header />
 *   <g item button />
 *   <g item button />
 *       ...
 */

/// Renders the menu as an SVG `<g>` fragment positioned in figure pixels.
pub fn render_menu_svg(
    layout: &MenuLayout,
    options: &MenuOptions,
    svg_options: &SvgRenderOptions,
) -> String {
    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<g class="{CONTAINER_CLASS}" style="cursor: pointer; pointer-events: visible;" transform="translate({x},{y})">"#,
        x = fmt(layout.lx),
        y = fmt(layout.ly),
    );

    render_item(&mut out, &layout.header, options, svg_options, layout);
    for button in &layout.buttons {
        render_item(&mut out, button, options, svg_options, layout);
    }

    out.push_str("</g>");
    out
}

fn render_item(
    out: &mut String,
    item: &ItemLayout,
    options: &MenuOptions,
    svg_options: &SvgRenderOptions,
    layout: &MenuLayout,
) {
    let (class, visibility, fill, stroke_width) = match item.kind {
        ItemKind::Header => (
            format!("{HEADER_CLASS} {ITEM_CLASS}"),
            None,
            options.bgcolor.as_str(),
            options.borderwidth + HEADER_EXTRA_BORDER,
        ),
        ItemKind::Button(i) => {
            let mut class = format!("{BUTTON_CLASS} {ITEM_CLASS}");
            if i == layout.active {
                let _ = write!(&mut class, " {BUTTON_ACTIVE_CLASS}");
            }
            let fill = match item.visual.unwrap_or(ButtonVisual::Normal) {
                ButtonVisual::Hovered => svg_options.hover_color.as_str(),
                ButtonVisual::Active => svg_options.active_color.as_str(),
                ButtonVisual::Normal => options.bgcolor.as_str(),
            };
            let visibility = if layout.buttons_visible {
                "visible"
            } else {
                "hidden"
            };
            (class, Some(visibility), fill, options.borderwidth)
        }
    };

    let _ = write!(out, r#"<g class="{class}""#);
    if let Some(v) = visibility {
        let _ = write!(out, r#" visibility="{v}""#);
    }
    let _ = write!(
        out,
        r#" transform="translate({x},{y})">"#,
        x = fmt(item.translate_x),
        y = fmt(item.translate_y),
    );

    let _ = write!(
        out,
        r#"<rect class="{ITEM_RECT_CLASS}" rx="{rx}" ry="{ry}" shape-rendering="crispEdges" x="0" y="0" width="{w}" height="{h}" style="{stroke} {fill} stroke-width: {sw}px;"/>"#,
        rx = fmt(RX),
        ry = fmt(RY),
        w = fmt(item.width),
        h = fmt(item.height),
        stroke = color::stroke_style(&options.bordercolor),
        fill = color::fill_style(fill),
        sw = fmt(stroke_width),
    );

    let font = &options.font;
    let _ = write!(
        out,
        r#"<text class="{ITEM_TEXT_CLASS} user-select-none" text-anchor="middle" x="{x}" y="{y}" style="font-family: {family}; font-size: {size}px; {fill}">"#,
        x = fmt(item.text_x),
        y = fmt(item.text_y),
        family = escape_xml(&font.family),
        size = fmt(font.size),
        fill = color::fill_style(&font.color),
    );
    if item.lines.len() <= 1 {
        util::escape_xml_into(out, &item.label);
    } else {
        for (i, line) in item.lines.iter().enumerate() {
            let _ = write!(
                out,
                r#"<tspan class="line" dy="{dy}em" x="{x}" y="{y}">"#,
                dy = fmt(i as f64 * crate::layout::LINE_HEIGHT_RATIO),
                x = fmt(item.text_x),
                y = fmt(item.text_y),
            );
            util::escape_xml_into(out, line);
            out.push_str("</tspan>");
        }
    }
    out.push_str("</text></g>");
}

/// Wraps the menu fragment in a figure-sized `<svg>` document with the plot CSS inlined.
pub fn render_standalone_svg(
    layout: &MenuLayout,
    options: &MenuOptions,
    plot: &PlotSize,
    svg_options: &SvgRenderOptions,
) -> String {
    let w = plot.figure_width();
    let h = plot.figure_height();
    let id = escape_xml(svg_options.diagram_id.as_deref().unwrap_or("updatemenu"));

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" class="main-svg" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = fmt(w),
        h = fmt(h),
    );
    let _ = write!(&mut out, "<style>{}</style>", escape_xml(&css::css_text()));

    if let Some(bg) = svg_options.background.as_deref() {
        let _ = write!(
            &mut out,
            r#"<rect class="bg" x="0" y="0" width="{w}" height="{h}" style="{fill}"/>"#,
            w = fmt(w),
            h = fmt(h),
            fill = color::fill_style(bg),
        );
    }
    let _ = write!(
        &mut out,
        r#"<rect class="plotarea" x="{x}" y="{y}" width="{w}" height="{h}" style="fill: none; stroke: rgb(238, 238, 238); stroke-width: 1px;"/>"#,
        x = fmt(plot.l),
        y = fmt(plot.t),
        w = fmt(plot.w),
        h = fmt(plot.h),
    );
    out.push_str(r#"<g class="infolayer">"#);
    out.push_str(&render_menu_svg(layout, options, svg_options));
    out.push_str("</g></svg>\n");
    out
}

#![forbid(unsafe_code)]

use crate::render::HeadlessError;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Headless(#[from] HeadlessError),
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("invalid background color: {0}")]
    Background(String),
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    /// Fills the pixmap before the SVG is drawn. Any CSS color.
    pub background: Option<String>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
        }
    }
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    // Menu documents always carry width/height, so the tree size is the figure size.
    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;

    if let Some(bg) = background {
        let color = parse_tiny_skia_color(bg).ok_or_else(|| RasterError::Background(bg.into()))?;
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

fn parse_tiny_skia_color(text: &str) -> Option<tiny_skia::Color> {
    if text.trim().eq_ignore_ascii_case("transparent") {
        return Some(tiny_skia::Color::TRANSPARENT);
    }
    let c = updatemenu_core::color::parse(text)?;
    Some(tiny_skia::Color::from_rgba8(c.red, c.green, c.blue, c.alpha))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_to_png_produces_png_signature() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"><rect width="10" height="10" fill="black"/></svg>"#;
        let bytes = svg_to_png(svg, &RasterOptions::default()).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn background_accepts_css_colors() {
        assert!(parse_tiny_skia_color("#eee").is_some());
        assert!(parse_tiny_skia_color("rgb(1, 2, 3)").is_some());
        assert!(parse_tiny_skia_color("transparent").is_some());
        assert!(parse_tiny_skia_color("not a color").is_none());
    }

    #[test]
    fn invalid_background_is_an_error() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"/>"#;
        let err = svg_to_png(
            svg,
            &RasterOptions {
                background: Some("nope".to_string()),
                ..RasterOptions::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, RasterError::Background(_)));
    }
}

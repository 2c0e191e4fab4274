use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;
use updatemenu_core::Font;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 12.0,
        }
    }
}

impl From<&Font> for TextStyle {
    fn from(font: &Font) -> Self {
        Self {
            font_family: Some(font.family.clone()),
            font_size: font.size,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

/// Bounding-box measurement of rendered text.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Splits a label into the lines it renders as. `<br>` variants and `\n` break lines.
pub fn label_lines(text: &str) -> Vec<String> {
    let mut t = text.to_string();
    for br in ["<br/>", "<br />", "<br>", "<BR>", "<BR/>", "<BR />"] {
        t = t.replace(br, "\n");
    }
    t.split('\n').map(|s| s.to_string()).collect()
}

/// A font-independent measurer: every column of a line is `char_width_factor * font_size` wide
/// (East Asian wide characters count as two columns).
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    fn columns(line: &str) -> usize {
        line.chars()
            .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
            .sum()
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let lines = label_lines(text);
        let font_size = style.font_size.max(1.0);
        let max_cols = lines.iter().map(|l| Self::columns(l)).max().unwrap_or(0);

        TextMetrics {
            width: max_cols as f64 * font_size * char_width_factor,
            height: lines.len() as f64 * font_size * line_height_factor,
            line_count: lines.len(),
        }
    }
}

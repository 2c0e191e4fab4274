//! Plot stylesheet rules and their one-time injection into a host document.
//!
//! Selectors are written in shorthand: `X` stands for the plot container and `Y` for the
//! notifier overlay. [`build_full_selector`] expands them.

use serde::{Deserialize, Serialize};

/// Ordered `(selector, declarations)` pairs.
pub const PLOT_CSS: &[(&str, &str)] = &[
    (
        "X,X div",
        "direction:ltr;font-family:'Open Sans', verdana, arial, sans-serif;margin:0;padding:0;",
    ),
    (
        "X input,X button",
        "font-family:'Open Sans', verdana, arial, sans-serif;",
    ),
    ("X input:focus,X button:focus", "outline:none;"),
    ("X a", "text-decoration:none;"),
    ("X a:hover", "text-decoration:none;"),
    ("X .crisp", "shape-rendering:crispEdges;"),
    (
        "X .user-select-none",
        "-webkit-user-select:none;-moz-user-select:none;-ms-user-select:none;-o-user-select:none;user-select:none;",
    ),
    ("X svg", "overflow:hidden;"),
    ("X svg a", "fill:#447adb;"),
    ("X svg a:hover", "fill:#3c6dc5;"),
    (
        "X .main-svg",
        "position:absolute;top:0;left:0;pointer-events:none;",
    ),
    ("X .main-svg .draglayer", "pointer-events:all;"),
    ("X .cursor-pointer", "cursor:pointer;"),
    ("X .updatemenu-item-text", "white-space:pre;"),
    (
        "Y",
        "font-family:'Open Sans';position:fixed;top:50px;right:20px;z-index:10000;font-size:10pt;max-width:180px;",
    ),
    ("Y p", "margin:0;"),
    (
        "Y .notifier-note",
        "min-width:180px;max-width:250px;border:1px solid #fff;z-index:3000;margin:0;background-color:#8c97af;background-color:rgba(140,151,175,0.9);color:#fff;padding:10px;",
    ),
    (
        "Y .notifier-close",
        "color:#fff;opacity:0.8;float:right;padding:0 5px;background:none;border:none;font-size:20px;font-weight:bold;line-height:20px;",
    ),
    (
        "Y .notifier-close:hover",
        "color:#444;text-decoration:none;cursor:pointer;",
    ),
];

pub const PLOT_SELECTOR: &str = ".js-plotly-plot .plotly";
pub const NOTIFIER_SELECTOR: &str = ".plotly-notifier";

/// Class of the hidden element used to check whether plot styles already reach a chart.
pub const STYLE_TESTER_CLASS: &str = "plotly-css-tester";
/// A styled tester is either hidden or painted in this color.
pub const STYLE_TESTER_COLOR: &str = "rgb(11, 23, 13)";

/// Expands `X`/`Y` shorthands, puts a space after the first comma and upgrades `:after` and
/// `:before` to their double-colon forms.
pub fn build_full_selector(selector: &str) -> String {
    selector
        .replacen(',', ", ", 1)
        .replace("::after", ":after")
        .replace("::before", ":before")
        .replace(":after", "::after")
        .replace(":before", "::before")
        .replace('X', PLOT_SELECTOR)
        .replace('Y', NOTIFIER_SELECTOR)
}

/// The whole rule table as stylesheet text (for documents that embed their own `<style>`).
pub fn css_text() -> String {
    PLOT_CSS
        .iter()
        .map(|(sel, decl)| format!("{}{{{}}}", build_full_selector(sel), decl))
        .collect()
}

/// Whether `declarations` style the tester element: `display: none` or the tester color.
pub fn styles_tester(declarations: &str) -> bool {
    let tester_color: String = STYLE_TESTER_COLOR.split_whitespace().collect();
    declarations
        .split(';')
        .filter_map(|d| d.split_once(':'))
        .any(|(property, value)| match property.trim() {
            "display" => value.trim() == "none",
            "color" => value.split_whitespace().collect::<String>() == tester_color,
            _ => false,
        })
}

/// Which rule insertion API a stylesheet exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleApi {
    InsertRule,
    AddRule,
    Unsupported,
}

pub trait StyleSheet {
    fn rule_api(&self) -> RuleApi;
    /// `rule` is `selector{declarations}`.
    fn insert_rule(&mut self, rule: &str, index: usize);
    fn add_rule(&mut self, selector: &str, declarations: &str, index: usize);
}

/// The document a chart lives in, as far as styling is concerned.
pub trait StyleDocument {
    /// Set once styles were injected into this document.
    fn plot_css_loaded(&self) -> bool;
    fn set_plot_css_loaded(&mut self);
    /// Adds a tester element with [`STYLE_TESTER_CLASS`] to the chart container, reports
    /// whether its computed style satisfies [`styles_tester`] and removes it again.
    fn plot_styles_applied(&mut self) -> bool;
    /// Selectors of every rule in every stylesheet of the document.
    fn rule_selectors(&self) -> Vec<String>;
    fn style_element_count(&self) -> usize;
    /// Appends an empty `<style>` element to the document head.
    fn append_style_element(&mut self);
    /// The sheet of the first `<style>` element.
    fn first_style_sheet(&mut self) -> Option<&mut dyn StyleSheet>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum InjectOutcome {
    /// The document was already styled (flag set or tester styled); no rules were added.
    AlreadyLoaded,
    Injected {
        inserted: usize,
        /// Rules whose selector the document already had.
        skipped: usize,
        /// Rules the stylesheet had no API for.
        failed: usize,
    },
    /// No stylesheet could be obtained from the document.
    Unavailable,
}

/// Makes sure the plot rules exist in `doc`. Repeat calls are no-ops.
pub fn inject_styles(doc: &mut dyn StyleDocument) -> InjectOutcome {
    if doc.plot_css_loaded() {
        return InjectOutcome::AlreadyLoaded;
    }
    if doc.plot_styles_applied() {
        tracing::debug!("plot styles already reach the chart; skipping injection");
        doc.set_plot_css_loaded();
        return InjectOutcome::AlreadyLoaded;
    }

    let existing = doc.rule_selectors();
    if doc.style_element_count() == 0 {
        doc.append_style_element();
    }
    let Some(sheet) = doc.first_style_sheet() else {
        tracing::warn!("injectStyles failed: document has no usable stylesheet");
        return InjectOutcome::Unavailable;
    };

    let (mut inserted, mut skipped, mut failed) = (0, 0, 0);
    for (selector, declarations) in PLOT_CSS {
        let full = build_full_selector(selector);
        if existing.iter().any(|s| *s == full) {
            skipped += 1;
            continue;
        }
        match sheet.rule_api() {
            RuleApi::InsertRule => {
                sheet.insert_rule(&format!("{full}{{{declarations}}}"), 0);
                inserted += 1;
            }
            RuleApi::AddRule => {
                sheet.add_rule(&full, declarations, 0);
                inserted += 1;
            }
            RuleApi::Unsupported => {
                tracing::warn!(selector = %full, "injectStyles failed");
                failed += 1;
            }
        }
    }

    doc.set_plot_css_loaded();
    InjectOutcome::Injected {
        inserted,
        skipped,
        failed,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssRule {
    pub selector: String,
    pub declarations: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemorySheet {
    pub api: RuleApi,
    pub rules: Vec<CssRule>,
}

impl InMemorySheet {
    pub fn new(api: RuleApi) -> Self {
        Self {
            api,
            rules: Vec::new(),
        }
    }

    pub fn to_css_text(&self) -> String {
        self.rules
            .iter()
            .map(|r| format!("{}{{{}}}\n", r.selector, r.declarations))
            .collect()
    }

    fn insert_at(&mut self, rule: CssRule, index: usize) {
        let index = index.min(self.rules.len());
        self.rules.insert(index, rule);
    }
}

impl StyleSheet for InMemorySheet {
    fn rule_api(&self) -> RuleApi {
        self.api
    }

    fn insert_rule(&mut self, rule: &str, index: usize) {
        let (selector, rest) = rule.split_once('{').unwrap_or((rule, ""));
        let declarations = rest.strip_suffix('}').unwrap_or(rest);
        self.insert_at(
            CssRule {
                selector: selector.trim().to_string(),
                declarations: declarations.to_string(),
            },
            index,
        );
    }

    fn add_rule(&mut self, selector: &str, declarations: &str, index: usize) {
        self.insert_at(
            CssRule {
                selector: selector.to_string(),
                declarations: declarations.to_string(),
            },
            index,
        );
    }
}

/// A document held entirely in memory; new style elements get sheets with `new_sheet_api`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryDocument {
    pub sheets: Vec<InMemorySheet>,
    pub plot_css_loaded: bool,
    pub new_sheet_api: RuleApi,
}

impl Default for InMemoryDocument {
    fn default() -> Self {
        Self {
            sheets: Vec::new(),
            plot_css_loaded: false,
            new_sheet_api: RuleApi::InsertRule,
        }
    }
}

impl StyleDocument for InMemoryDocument {
    fn plot_css_loaded(&self) -> bool {
        self.plot_css_loaded
    }

    fn set_plot_css_loaded(&mut self) {
        self.plot_css_loaded = true;
    }

    /// The tester counts as styled when some rule targets it, directly or as part of a
    /// selector list, with tester declarations.
    fn plot_styles_applied(&mut self) -> bool {
        let tester = format!(".{STYLE_TESTER_CLASS}");
        self.sheets.iter().flat_map(|s| &s.rules).any(|rule| {
            rule.selector
                .split(',')
                .any(|sel| sel.trim().ends_with(&tester))
                && styles_tester(&rule.declarations)
        })
    }

    fn rule_selectors(&self) -> Vec<String> {
        self.sheets
            .iter()
            .flat_map(|s| s.rules.iter().map(|r| r.selector.clone()))
            .collect()
    }

    fn style_element_count(&self) -> usize {
        self.sheets.len()
    }

    fn append_style_element(&mut self) {
        self.sheets.push(InMemorySheet::new(self.new_sheet_api));
    }

    fn first_style_sheet(&mut self) -> Option<&mut dyn StyleSheet> {
        self.sheets
            .first_mut()
            .map(|s| s as &mut dyn StyleSheet)
    }
}

use futures::executor::block_on;
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;
use updatemenu::render::raster::{RasterError, RasterOptions};
use updatemenu::render::{
    HeadlessError, HeadlessMenu, InMemoryDocument, InjectOutcome, MarginRegistry, MenuLayout,
    PlotSize, inject_styles,
};
use updatemenu::{ChartApi, Engine, LayoutConfig, MenuEvent, MenuState, Method, MethodCall};
use updatemenu_render::layout::Margins;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    InvalidArg(String),
    Io(std::io::Error),
    Menu(HeadlessError),
    Raster(RasterError),
    Json(serde_json::Error),
    NothingToDraw,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::InvalidArg(msg) => write!(f, "invalid argument: {msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Menu(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::NothingToDraw => write!(f, "Update menu is hidden or has no buttons"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Menu(value)
    }
}

impl From<updatemenu::Error> for CliError {
    fn from(value: updatemenu::Error) -> Self {
        Self::Menu(HeadlessError::Parse(value))
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Defaults,
    Layout,
    Render,
    Css,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(()),
        }
    }
}

/// `header`, `select:<i>`, `hover:<i>` or `leave:<i>`.
fn parse_event(s: &str) -> Option<MenuEvent> {
    let s = s.trim();
    if s == "header" {
        return Some(MenuEvent::HeaderClick);
    }
    let (kind, index) = s.split_once(':')?;
    let index = index.trim().parse::<usize>().ok()?;
    match kind.trim() {
        "select" => Some(MenuEvent::ButtonClick(index)),
        "hover" => Some(MenuEvent::ButtonEnter(index)),
        "leave" => Some(MenuEvent::ButtonLeave(index)),
        _ => None,
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    overrides: Vec<String>,
    events: Vec<MenuEvent>,
    plot_width: f64,
    plot_height: f64,
    margin: Option<f64>,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    out: Option<String>,
}

impl Args {
    fn plot_size(&self) -> PlotSize {
        let margins = self.margin.map(Margins::uniform).unwrap_or_default();
        PlotSize::from_figure(self.plot_width, self.plot_height, margins)
    }
}

fn usage() -> &'static str {
    "updatemenu-cli\n\
\n\
USAGE:\n\
  updatemenu-cli [defaults] [--pretty] [--set <path>=<value>]... [<path>|-]\n\
  updatemenu-cli layout [--pretty] [--set <path>=<value>]... [--plot-width <w>] [--plot-height <h>] [--margin <px>] [--event <e>]... [<path>|-]\n\
  updatemenu-cli render [--format svg|png] [--scale <n>] [--background <css-color>] [--set <path>=<value>]... [--plot-width <w>] [--plot-height <h>] [--margin <px>] [--event <e>]... [--out <path>] [<path>|-]\n\
  updatemenu-cli css\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the plot layout is read from stdin (JSON or JSON5).\n\
  - --set assigns a dotted layout path before coercion; <value> is JSON or a bare string.\n\
  - Events are applied in order: header | select:<i> | hover:<i> | leave:<i>.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG output defaults to writing next to the input file (or ./out.png for stdin).\n\
"
}

fn next_f64(it: &mut dyn Iterator<Item = &String>) -> Result<f64, CliError> {
    let Some(raw) = it.next() else {
        return Err(CliError::Usage(usage()));
    };
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !v.is_finite() {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Defaults,
        render_format: RenderFormat::Svg,
        render_scale: 1.0,
        plot_width: 700.0,
        plot_height: 450.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "defaults" => args.command = Command::Defaults,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "css" => args.command = Command::Css,
            "--pretty" => args.pretty = true,
            "--set" => {
                let Some(assignment) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.overrides.push(assignment.clone());
            }
            "--event" => {
                let Some(raw) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let event = parse_event(raw)
                    .ok_or_else(|| CliError::InvalidArg(format!("unknown event `{raw}`")))?;
                args.events.push(event);
            }
            "--plot-width" => args.plot_width = next_f64(&mut it)?,
            "--plot-height" => args.plot_height = next_f64(&mut it)?,
            "--margin" => args.margin = Some(next_f64(&mut it)?),
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

/// Strict JSON first; JSON5 (comments, unquoted keys, trailing commas) as a fallback.
fn parse_layout(text: &str) -> Result<Value, CliError> {
    match serde_json::from_str::<Value>(text) {
        Ok(v) => Ok(v),
        Err(json_err) => match json5::from_str::<Value>(text) {
            Ok(v) => Ok(v),
            Err(json5_err) => {
                tracing::debug!(%json5_err, "input is neither JSON nor JSON5");
                Err(CliError::Json(json_err))
            }
        },
    }
}

fn load_layout(args: &Args) -> Result<Value, CliError> {
    let text = read_input(args.input.as_deref())?;
    let mut layout = LayoutConfig::from_value(parse_layout(&text)?);
    for assignment in &args.overrides {
        layout.apply_override(assignment).ok_or_else(|| {
            CliError::InvalidArg(format!("expected <path>=<value>, got `{assignment}`"))
        })?;
    }
    Ok(layout.into_value())
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

/// Stands in for a live chart: records the method calls selections would make.
#[derive(Debug, Default)]
struct RecordingChart {
    calls: Vec<(Method, Vec<Value>)>,
}

impl RecordingChart {
    fn record(&mut self, method: Method, args: [&Value; 3]) -> Result<(), String> {
        self.calls
            .push((method, args.iter().map(|v| (*v).clone()).collect()));
        Ok(())
    }
}

impl ChartApi for RecordingChart {
    fn restyle(&mut self, args: [&Value; 3]) -> Result<(), String> {
        self.record(Method::Restyle, args)
    }

    fn relayout(&mut self, args: [&Value; 3]) -> Result<(), String> {
        self.record(Method::Relayout, args)
    }

    fn filter(&mut self, args: [&Value; 3]) -> Result<(), String> {
        self.record(Method::Filter, args)
    }
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    layout: Option<&'a MenuLayout>,
    state: &'a MenuState,
    calls: &'a [MethodCall],
    margins: &'a MarginRegistry,
}

fn build_menu(args: &Args) -> Result<(HeadlessMenu, Vec<MethodCall>), CliError> {
    let layout_in = load_layout(args)?;
    let mut menu = HeadlessMenu::from_layout(Engine::new(), &layout_in)?.with_plot(args.plot_size());

    let mut chart = RecordingChart::default();
    let mut calls = Vec::new();
    for event in &args.events {
        if let Some(call) = menu.apply(*event, &mut chart)? {
            calls.push(call);
        }
    }
    tracing::debug!(
        events = args.events.len(),
        calls = chart.calls.len(),
        "applied events"
    );
    Ok((menu, calls))
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Defaults => {
            let layout_in = load_layout(&args)?;
            let options = Engine::new().supply_defaults(&layout_in)?;
            write_json(&options, args.pretty)?;
            Ok(())
        }
        Command::Layout => {
            let (mut menu, calls) = build_menu(&args)?;
            let drawn = block_on(menu.draw())?;
            let out = LayoutOut {
                layout: drawn.as_ref().map(|d| &d.layout),
                state: menu.state(),
                calls: &calls,
                margins: menu.margins(),
            };
            write_json(&out, args.pretty)?;
            Ok(())
        }
        Command::Render => {
            let (mut menu, _calls) = build_menu(&args)?;
            if let Some(bg) = &args.background {
                menu.layout.svg.background = Some(bg.clone());
            }

            match args.render_format {
                RenderFormat::Svg => {
                    let Some(svg) = block_on(menu.render_svg())? else {
                        return Err(CliError::NothingToDraw);
                    };
                    write_text(&svg, args.out.as_deref())?;
                }
                RenderFormat::Png => {
                    let raster = RasterOptions {
                        scale: args.render_scale,
                        background: args.background.clone(),
                    };
                    let Some(bytes) = menu.render_png_sync(&raster)? else {
                        return Err(CliError::NothingToDraw);
                    };
                    let out = args.out.clone().unwrap_or_else(|| {
                        default_raster_out_path(args.input.as_deref(), "png")
                            .to_string_lossy()
                            .to_string()
                    });
                    if out == "-" {
                        use std::io::Write;
                        std::io::stdout().lock().write_all(&bytes)?;
                    } else {
                        std::fs::write(out, bytes)?;
                    }
                }
            }
            Ok(())
        }
        Command::Css => {
            let mut doc = InMemoryDocument::default();
            let outcome = inject_styles(&mut doc);
            if outcome == InjectOutcome::Unavailable {
                return Err(CliError::InvalidArg(
                    "no stylesheet available for injection".to_string(),
                ));
            }
            let css: String = doc.sheets.iter().map(|s| s.to_css_text()).collect();
            write_text(&css, args.out.as_deref())?;
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::NothingToDraw) => {
            eprintln!("{}", CliError::NothingToDraw);
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

use serde_json::{Value, json};
use updatemenu::render::{HeadlessError, HeadlessMenu, PlotSize};
use updatemenu::{ChartApi, Engine, Error, Fold, MenuEvent, Method};

#[derive(Default)]
struct Chart {
    calls: Vec<(&'static str, Value)>,
    fail_relayout: bool,
}

impl ChartApi for Chart {
    fn restyle(&mut self, args: [&Value; 3]) -> Result<(), String> {
        self.calls.push(("restyle", args[0].clone()));
        Ok(())
    }

    fn relayout(&mut self, args: [&Value; 3]) -> Result<(), String> {
        if self.fail_relayout {
            return Err("axis is locked".to_string());
        }
        self.calls.push(("relayout", args[0].clone()));
        Ok(())
    }

    fn filter(&mut self, args: [&Value; 3]) -> Result<(), String> {
        self.calls.push(("filter", args[0].clone()));
        Ok(())
    }
}

fn layout() -> Value {
    json!({
        "updatemenu": {
            "buttons": [
                { "label": "Linear", "method": "relayout", "args": [{ "yaxis.type": "linear" }] },
                { "label": "Log", "method": "relayout", "args": [{ "yaxis.type": "log" }] },
                { "label": "Hide", "args": ["visible", false] }
            ]
        }
    })
}

#[test]
fn click_runs_the_button_method_on_the_chart() {
    let mut menu = HeadlessMenu::from_layout(Engine::new(), &layout()).unwrap();
    let mut chart = Chart::default();

    assert!(
        menu.apply(MenuEvent::HeaderClick, &mut chart)
            .unwrap()
            .is_none()
    );
    assert_eq!(menu.state().fold(), Fold::Expanded);

    let call = menu
        .apply(MenuEvent::ButtonClick(1), &mut chart)
        .unwrap()
        .expect("method call");
    assert_eq!(call.method, Method::Relayout);
    assert_eq!(chart.calls, vec![("relayout", json!({ "yaxis.type": "log" }))]);
    assert_eq!(menu.state().fold(), Fold::Collapsed);

    menu.apply(MenuEvent::ButtonClick(2), &mut chart).unwrap();
    assert_eq!(chart.calls[1], ("restyle", json!("visible")));
}

#[test]
fn chart_failures_surface_as_errors() {
    let mut menu = HeadlessMenu::from_layout(Engine::new(), &layout()).unwrap();
    let mut chart = Chart {
        fail_relayout: true,
        ..Chart::default()
    };
    let err = menu
        .apply(MenuEvent::ButtonClick(0), &mut chart)
        .unwrap_err();
    assert!(matches!(
        err,
        HeadlessError::Parse(Error::ChartMethod { .. })
    ));
    assert!(err.to_string().contains("axis is locked"));
}

#[test]
fn out_of_range_clicks_are_rejected() {
    let mut menu = HeadlessMenu::from_layout(Engine::new(), &layout()).unwrap();
    let err = menu
        .apply(MenuEvent::ButtonClick(7), &mut Chart::default())
        .unwrap_err();
    assert!(matches!(
        err,
        HeadlessError::Parse(Error::ButtonOutOfRange { index: 7, len: 3 })
    ));
}

#[test]
fn draw_reserves_and_withdraws_margin() {
    let mut menu = HeadlessMenu::from_layout(Engine::new(), &layout()).unwrap();
    let drawn = menu.draw_sync().unwrap().expect("drawn");
    assert_eq!(menu.margins().len(), 1);
    assert_eq!(
        menu.margins().iter().next().map(|(_, m)| *m),
        Some(drawn.layout.auto_margin)
    );

    menu.set_layout(&json!({ "updatemenu": { "visible": false } }))
        .unwrap();
    assert!(menu.draw_sync().unwrap().is_none());
    assert!(menu.margins().is_empty());
}

#[test]
fn shrinking_the_button_list_resets_the_selection() {
    let mut menu = HeadlessMenu::from_layout(Engine::new(), &layout()).unwrap();
    menu.apply(MenuEvent::ButtonClick(2), &mut Chart::default())
        .unwrap();

    menu.set_layout(&json!({
        "updatemenu": { "buttons": [{ "label": "Only" }] }
    }))
    .unwrap();
    let drawn = menu.draw_sync().unwrap().expect("drawn");
    assert_eq!(drawn.layout.active, 0);
    assert_eq!(drawn.layout.header.label, "Only  ▼");
}

#[test]
fn async_wrappers_match_sync_output() {
    let mut a = HeadlessMenu::from_layout(Engine::new(), &layout()).unwrap();
    let mut b = a.clone();
    let sync = a.render_svg_sync().unwrap().expect("svg");
    let async_svg = futures::executor::block_on(b.render_svg())
        .unwrap()
        .expect("svg");
    assert_eq!(sync, async_svg);

    let doc = roxmltree::Document::parse(&sync).expect("well-formed svg");
    assert!(
        doc.descendants()
            .any(|n| n.attribute("class") == Some("updatemenu"))
    );
}

#[test]
fn figure_size_controls_the_document_size() {
    let plot = PlotSize::from_figure(400.0, 300.0, Default::default());
    let mut menu = HeadlessMenu::from_json(&layout().to_string())
        .unwrap()
        .with_plot(plot);
    let svg = menu.render_svg_sync().unwrap().expect("svg");
    let doc = roxmltree::Document::parse(&svg).unwrap();
    assert_eq!(doc.root_element().attribute("width"), Some("400"));
    assert_eq!(doc.root_element().attribute("height"), Some("300"));
}

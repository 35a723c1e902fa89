//! Integration tests for panelkit.
//!
//! These tests exercise the public API from outside the crate: markup and
//! builder construction, layout, bindings, panels and hot reload working
//! together through the recording painter.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, SystemTime};

use pretty_assertions::assert_eq;

use panelkit::demo::CityPanelBuilder;
use panelkit::pipeline::{validate_hierarchy, HierarchyError};
use panelkit::prelude::*;
use panelkit::testing::{outline, structure, DrawCall, RecordingPainter};

fn asset(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join(name)
}

fn write_at(path: &Path, body: &str, secs: u64) {
    std::fs::write(path, body).unwrap();
    std::fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

fn render(panel: &mut Panel, painter: &mut RecordingPainter, data: &mut AppData) {
    let mut cx = RenderCx::new(painter, data);
    panel.render(&mut cx);
}

// ---------------------------------------------------------------------------
// Markup assets
// ---------------------------------------------------------------------------

#[test]
fn contact_panel_loads() {
    let cx = LayoutContext::new();
    let loader = MarkupLoader::new(&cx);
    let panel = loader
        .parse_panel_from_file(asset("contact_panel.xml"), &AppData::new())
        .unwrap();

    assert_eq!(panel.title(), "Contact");
    assert_eq!(panel.size(), Size::new(420.0, 260.0));
    insta::assert_snapshot!(structure(panel.find("name_row").unwrap()), @r###"
    hlayout#name_row
      label#name_label "Name"
      text input#name (bound)
    "###);
    assert!(validate_hierarchy(panel.root().unwrap()).is_ok());
}

#[test]
fn contact_form_edits_data_and_clicks_submit() {
    let cx = LayoutContext::new();
    let mut loader = MarkupLoader::new(&cx);
    let submitted = Rc::new(Cell::new(0));
    let count = submitted.clone();
    loader.add_button_callback("submit", move || count.set(count.get() + 1));

    let mut data = AppData::new();
    let mut panel = loader
        .parse_panel_from_file(asset("contact_panel.xml"), &data)
        .unwrap();

    let mut painter = RecordingPainter::new(Size::new(404.0, 244.0));
    painter.type_text("name", "Ada");
    painter.type_text("email", "ada@example.com");
    painter.toggle("Rust");
    painter.click("Submit");

    let mut rcx = RenderCx::new(&mut painter, &mut data);
    panel.render(&mut rcx);
    let clicked = rcx.take_clicked();
    assert!(!painter.has_pending_input());

    assert_eq!(data.name, "Ada");
    assert_eq!(data.email, "ada@example.com");
    assert!(data.rust);
    assert!(!data.python);
    assert_eq!(submitted.get(), 0);
    panelkit::render::run_callbacks(&clicked);
    assert_eq!(submitted.get(), 1);
}

#[test]
fn city_markup_binds_rows() {
    let cx = LayoutContext::new();
    let loader = MarkupLoader::new(&cx);
    let mut data = AppData::with_sample_cities();
    let mut panel = loader
        .parse_panel_from_file(asset("city_data_panel.xml"), &data)
        .unwrap();

    let mut painter = RecordingPainter::new(Size::new(884.0, 304.0));
    painter.set_float("lat_1", 35.0);
    painter.pick("Arid");
    render(&mut panel, &mut painter, &mut data);

    assert_eq!(data.cities[1].latitude, 35.0);
    assert_eq!(data.cities[0].climate_zone, ClimateZone::Arid);

    let names: Vec<&str> = painter
        .calls()
        .iter()
        .filter_map(|call| match call {
            DrawCall::InputText { value, .. } => Some(value.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, ["New York", "Los Angeles"]);
}

// ---------------------------------------------------------------------------
// Builder and markup agree
// ---------------------------------------------------------------------------

#[test]
fn builder_and_markup_build_the_same_tree() {
    let cx = LayoutContext::new();
    let loader = MarkupLoader::new(&cx);
    let data = AppData::new();

    let mut from_markup = loader
        .parse_widget_from_str(
            r#"<hlayout id="row" gap="4" padding="2" align="center">
                 <label id="a" text="A" flex="1" bold="true"/>
                 <label id="b" text="B" width="50" height="20"/>
               </hlayout>"#,
            &data,
        )
        .unwrap()
        .unwrap();

    let mut from_builder = HLayoutBuilder::new(&cx, "row")
        .gap(4.0)
        .padding(2.0)
        .align(Align::Center)
        .add_child(LabelBuilder::new(&cx, "a", "A").flex(1.0).bold(true))
        .add_child(LabelBuilder::new(&cx, "b", "B").width(50.0).height(20.0))
        .build();

    assert_eq!(structure(&from_markup), structure(&from_builder));
    for id in ["row", "a", "b"] {
        let m = from_markup.find(id).unwrap();
        let b = from_builder.find(id).unwrap();
        assert_eq!(m.style(), b.style(), "style of {id}");
        assert_eq!(
            (m.width(), m.height(), m.flex()),
            (b.width(), b.height(), b.flex()),
            "geometry hints of {id}"
        );
    }

    from_markup.update_layout(Some(200.0), Some(40.0));
    from_builder.update_layout(Some(200.0), Some(40.0));
    assert_eq!(outline(&from_markup), outline(&from_builder));

    let a = from_markup.find("a").unwrap().bounds();
    assert!((a.width - 142.0).abs() < 0.01, "a: {a:?}");
}

#[test]
fn two_equal_flex_children_split_evenly() {
    let cx = LayoutContext::new();
    let mut row = HLayoutBuilder::new(&cx, "row")
        .gap(0.0)
        .add_child(LabelBuilder::new(&cx, "left", "L").flex(1.0))
        .add_child(LabelBuilder::new(&cx, "right", "R").flex(1.0))
        .build();
    row.update_layout(Some(200.0), Some(30.0));

    let left = row.find("left").unwrap().bounds();
    let right = row.find("right").unwrap().bounds();
    assert!((left.width - 100.0).abs() < 0.01);
    assert!((right.width - 100.0).abs() < 0.01);
    assert!((right.x - 100.0).abs() < 0.01);
}

#[test]
fn markup_flex_labels_share_the_row() {
    let source = r#"<panel width="200" height="100">
  <hlayout id="row">
    <label id="left" text="L" flex="1"/>
    <label id="right" text="R" flex="1"/>
  </hlayout>
</panel>"#;
    let cx = LayoutContext::new();
    let loader = MarkupLoader::new(&cx);
    let mut data = AppData::new();
    let mut panel = loader.parse_panel_from_str(source, &data).unwrap();

    let mut painter = RecordingPainter::new(Size::new(200.0, 100.0));
    render(&mut panel, &mut painter, &mut data);

    let left = panel.find("left").unwrap().bounds();
    let right = panel.find("right").unwrap().bounds();
    assert!(left.width > 0.0 && right.width > 0.0);
    assert!(left.width + right.width <= 200.0, "{left:?} {right:?}");
    assert!((left.width - right.width).abs() <= 1.0, "{left:?} {right:?}");
    assert!(right.x >= left.x + left.width);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn same_orientation_nesting_is_reported_but_installed() {
    let source = r#"<panel><vlayout id="outer"><vlayout id="inner"/></vlayout></panel>"#;
    let cx = LayoutContext::new();
    let loader = MarkupLoader::new(&cx);
    let panel = loader.parse_panel_from_str(source, &AppData::new()).unwrap();

    assert!(panel.find("inner").is_some());
    assert!(matches!(
        validate_hierarchy(panel.root().unwrap()),
        Err(HierarchyError::SameOrientation { .. })
    ));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested.xml");
    std::fs::write(&path, source).unwrap();
    assert!(matches!(
        loader.validate_file(&path),
        Err(LoadError::Hierarchy(_))
    ));
}

#[test]
fn load_errors() {
    let cx = LayoutContext::new();
    let loader = MarkupLoader::new(&cx);
    let data = AppData::new();

    assert!(matches!(
        loader.parse_panel_from_file("/definitely/not/here.xml", &data),
        Err(LoadError::Io { .. })
    ));
    assert!(matches!(
        loader.parse_panel_from_str("<window/>", &data),
        Err(LoadError::MissingPanel { .. })
    ));
    assert!(matches!(
        loader.parse_panel_from_str("<panel><label></panel>", &data),
        Err(LoadError::Markup(_))
    ));
}

// ---------------------------------------------------------------------------
// Bindings
// ---------------------------------------------------------------------------

#[test]
fn out_of_range_city_is_left_unbound() {
    let cx = LayoutContext::new();
    let loader = MarkupLoader::new(&cx);
    let mut data = AppData::with_sample_cities();
    let mut panel = loader
        .parse_panel_from_str(
            r#"<panel>
                 <vlayout>
                   <input id="c0" bind="city_name_0"/>
                   <input id="c7" bind="city_name_7"/>
                 </vlayout>
               </panel>"#,
            &data,
        )
        .unwrap();

    assert!(panel.find("c0").unwrap().kind().is_bound());
    assert!(!panel.find("c7").unwrap().kind().is_bound());

    let mut painter = RecordingPainter::new(Size::new(300.0, 200.0));
    render(&mut panel, &mut painter, &mut data);
    assert!(painter.rect_of("c0").is_some());
    assert!(painter.rect_of("c7").is_none());
}

#[test]
fn data_reset_requires_rebind() {
    let cx = LayoutContext::new();
    let mut data = AppData::with_sample_cities();
    let root = TextInputBuilder::new(&cx, "city")
        .bind(TextField::CityName(0), &data)
        .build();
    let mut registry = PanelRegistry::new();
    registry.add("p", Panel::new("P", Size::new(200.0, 60.0)).with_root(root));
    let mut painter = RecordingPainter::new(Size::new(200.0, 60.0));

    let mut cities = AppData::sample_cities();
    cities[0].name = "Boston".to_owned();
    data.reset_cities(cities);

    {
        let mut rcx = RenderCx::new(&mut painter, &mut data);
        registry.render_all(&mut rcx);
    }
    assert!(painter.rect_of("city").is_none());

    assert_eq!(registry.rebind_all(&data), 0);
    painter.clear();
    {
        let mut rcx = RenderCx::new(&mut painter, &mut data);
        registry.render_all(&mut rcx);
    }
    assert!(painter.calls().iter().any(|call| matches!(
        call,
        DrawCall::InputText { id, value, .. } if id == "city" && value == "Boston"
    )));
}

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

#[test]
fn dpi_round_trip_restores_size() {
    let cx = LayoutContext::new();
    let mut data = AppData::with_sample_cities();
    let mut panel = CityPanelBuilder::new(&cx, &mut data)
        .with_size(Size::new(500.0, 400.0))
        .build();

    assert!(panel.set_dpi_scale(2.0));
    assert_eq!(panel.size(), Size::new(1000.0, 800.0));
    assert!(!panel.set_dpi_scale(0.0));
    assert!(panel.set_dpi_scale(1.0));
    assert_eq!(panel.size(), Size::new(500.0, 400.0));

    let mut painter = RecordingPainter::new(Size::new(484.0, 384.0));
    render(&mut panel, &mut painter, &mut data);
    assert_eq!(
        painter.calls()[0],
        DrawCall::BeginPanel {
            title: "City Data Grid".to_owned(),
            size: Size::new(500.0, 400.0),
            force_size: true,
        }
    );

    painter.clear();
    render(&mut panel, &mut painter, &mut data);
    assert!(matches!(
        painter.calls()[0],
        DrawCall::BeginPanel { force_size: false, .. }
    ));
}

#[test]
fn closed_panel_draws_nothing() {
    let cx = LayoutContext::new();
    let mut data = AppData::new();
    let mut registry = PanelRegistry::new();
    registry.add(
        "a",
        Panel::new("A", Size::new(100.0, 100.0)).with_root(Node::label(&cx, "l", "Hello")),
    );
    registry.hide("a");

    let mut painter = RecordingPainter::new(Size::new(100.0, 100.0));
    let mut rcx = RenderCx::new(&mut painter, &mut data);
    registry.render_all(&mut rcx);
    drop(rcx);
    assert!(painter.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Hot reload through App
// ---------------------------------------------------------------------------

#[test]
fn app_hot_reloads_changed_markup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.xml");
    write_at(&path, r#"<panel title="Main"><label text="Before"/></panel>"#, 1_000);

    let mut app = App::new(AppConfig::new());
    let mut data = AppData::new();
    app.load_panel("main", &path, &data, true).unwrap();

    let mut painter = RecordingPainter::new(Size::new(300.0, 200.0));
    let report = app.frame(&mut painter, &mut data);
    assert!(report.reloaded.is_empty());
    assert_eq!(painter.texts(), ["Before"]);

    write_at(&path, r#"<panel title="Main"><label text="After"/></panel>"#, 2_000);
    painter.clear();
    let report = app.frame(&mut painter, &mut data);
    assert_eq!(report.reloaded, ["main"]);
    assert_eq!(painter.texts(), ["After"]);
}

#[test]
fn app_keeps_panel_when_reload_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.xml");
    write_at(&path, r#"<panel title="Main"><label text="Stable"/></panel>"#, 1_000);

    let mut app = App::default();
    let mut data = AppData::new();
    app.load_panel("main", &path, &data, true).unwrap();

    write_at(&path, r#"<panel title="Main"><label text="Broken"></panel>"#, 2_000);
    assert!(matches!(
        app.reload("main", &data),
        Err(LoadError::Markup(_))
    ));

    let mut painter = RecordingPainter::new(Size::new(300.0, 200.0));
    let report = app.frame(&mut painter, &mut data);
    assert!(report.reloaded.is_empty());
    assert_eq!(painter.texts(), ["Stable"]);
}

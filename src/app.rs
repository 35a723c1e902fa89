//! App struct: panels, markup sources and the per-frame sequence.
//!
//! [`App`] ties together the panel registry, the markup loader and one file
//! watcher per markup-backed panel. [`App::frame`] runs one iteration of the
//! frame loop: poll sources and rebuild changed panels, rebind after a data
//! model reset, then draw every open panel. Button callbacks clicked during
//! the frame are handed back in the [`FrameReport`] so they run once drawing
//! is over.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use tracing::{debug, error, info};

use crate::geometry::Size;
use crate::layout::LayoutContext;
use crate::model::{AppData, ModelId};
use crate::panel::{Panel, DEFAULT_LAYOUT_TOLERANCE};
use crate::pipeline::{LoadError, MarkupLoader, DEFAULT_PANEL_SIZE, DEFAULT_TITLE};
use crate::registry::PanelRegistry;
use crate::render::{run_callbacks, Callback, Painter, RenderCx};
use crate::watch::FileWatcher;

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Content-area change, in layout units, that triggers a re-solve.
    pub layout_tolerance: f32,
    /// Window padding added around content by fit-to-content.
    pub window_padding: Size,
    /// Size of markup panels that do not set one.
    pub default_panel_size: Size,
    /// Title of markup panels that do not set one.
    pub default_title: String,
    /// Poll markup sources for changes every frame.
    pub watch: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            layout_tolerance: DEFAULT_LAYOUT_TOLERANCE,
            window_padding: Size::new(8.0, 8.0),
            default_panel_size: DEFAULT_PANEL_SIZE,
            default_title: DEFAULT_TITLE.to_owned(),
            watch: true,
        }
    }
}

impl AppConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout_tolerance(mut self, tolerance: f32) -> Self {
        self.layout_tolerance = tolerance;
        self
    }

    pub fn with_window_padding(mut self, padding: Size) -> Self {
        self.window_padding = padding;
        self
    }

    pub fn with_default_panel_size(mut self, size: Size) -> Self {
        self.default_panel_size = size;
        self
    }

    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Enable or disable hot reload (builder).
    pub fn with_watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }
}

// ---------------------------------------------------------------------------
// FrameReport
// ---------------------------------------------------------------------------

/// What happened during one [`App::frame`].
#[derive(Default)]
pub struct FrameReport {
    /// Panels rebuilt from changed sources, in name order.
    pub reloaded: Vec<String>,
    /// Callbacks of buttons clicked this frame, in click order.
    pub clicked: Vec<Callback>,
}

impl FrameReport {
    /// Run the clicked callbacks in order.
    pub fn run_callbacks(&self) {
        run_callbacks(&self.clicked);
    }
}

impl fmt::Debug for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameReport")
            .field("reloaded", &self.reloaded)
            .field("clicked", &self.clicked.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The frame loop context.
///
/// Owns the layout context, the panels and their markup sources.
pub struct App {
    /// Registered panels.
    pub panels: PanelRegistry,
    /// Loader used for markup panels; register button callbacks here before
    /// loading.
    pub loader: MarkupLoader,
    /// Application configuration.
    pub config: AppConfig,
    cx: LayoutContext,
    /// Markup source watchers, by panel name.
    sources: BTreeMap<String, FileWatcher>,
    /// Data model generation the panels were last bound to.
    bound_model: Option<ModelId>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("panels", &self.panels)
            .field("sources", &self.sources)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let cx = LayoutContext::new();
        let loader = MarkupLoader::with_defaults(
            &cx,
            config.default_title.clone(),
            config.default_panel_size,
        );
        Self {
            panels: PanelRegistry::new(),
            loader,
            config,
            cx,
            sources: BTreeMap::new(),
            bound_model: None,
        }
    }

    /// Layout context every panel of this app is built in.
    pub fn context(&self) -> &LayoutContext {
        &self.cx
    }

    /// Register a programmatically built panel.
    pub fn add_panel(&mut self, name: impl Into<String>, panel: Panel) {
        let panel = panel.with_tolerance(self.config.layout_tolerance);
        self.panels.add(name, panel);
    }

    /// Load a panel from the markup file at `path` and watch the file.
    pub fn load_panel(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
        data: &AppData,
        open: bool,
    ) -> Result<(), LoadError> {
        let name = name.into();
        let path = path.as_ref();
        let watcher = FileWatcher::new(path);
        let mut panel = self
            .loader
            .parse_panel_from_file(path, data)?
            .with_tolerance(self.config.layout_tolerance);
        panel.set_open(open);

        info!(panel = %name, path = %path.display(), "panel loaded");
        self.panels.add(name.clone(), panel);
        self.sources.insert(name, watcher);
        Ok(())
    }

    /// Markup file backing panel `name`, if it was loaded from one.
    pub fn source_path(&self, name: &str) -> Option<&Path> {
        self.sources.get(name).map(FileWatcher::path)
    }

    /// Rebuild panel `name` from its markup file.
    ///
    /// The new tree replaces the old one whole; the panel keeps its open state
    /// and DPI scale. Returns `Ok(false)` if the panel has no markup source.
    /// On error the old panel stays in place.
    pub fn reload(&mut self, name: &str, data: &AppData) -> Result<bool, LoadError> {
        let Some(watcher) = self.sources.get(name) else {
            return Ok(false);
        };
        let mut panel = self
            .loader
            .parse_panel_from_file(watcher.path(), data)?
            .with_tolerance(self.config.layout_tolerance);
        if let Some(previous) = self.panels.get(name) {
            panel.inherit_scale(previous);
        }
        self.panels.replace_root_preserving_open(name, panel);
        info!(panel = name, "panel reloaded");
        Ok(true)
    }

    /// Check every markup source once and rebuild the panels whose file
    /// changed. Returns the names of the panels rebuilt.
    pub fn poll_sources(&mut self, data: &AppData) -> Vec<String> {
        let changed: Vec<String> = self
            .sources
            .iter_mut()
            .filter_map(|(name, watcher)| watcher.has_changed().then(|| name.clone()))
            .collect();

        changed
            .into_iter()
            .filter(|name| match self.reload(name, data) {
                Ok(reloaded) => reloaded,
                Err(err) => {
                    error!(panel = %name, %err, "reload failed, keeping previous panel");
                    false
                }
            })
            .collect()
    }

    /// Take every source's current state as unchanged.
    pub fn reset_watchers(&mut self) {
        for watcher in self.sources.values_mut() {
            watcher.reset();
        }
    }

    /// Rescale every panel. Ignores non-positive scales.
    pub fn set_dpi_scale(&mut self, scale: f32) -> bool {
        self.panels.set_all_dpi_scale(scale)
    }

    /// Size every panel to its content plus the configured window padding.
    pub fn fit_all_to_content(&mut self) {
        self.panels.fit_all_to_content(self.config.window_padding);
    }

    /// Run one frame.
    ///
    /// Sources are polled and changed panels rebuilt before anything is
    /// drawn, so a frame never shows a half-built tree. If `data` was reset
    /// since the last frame, every binding is re-attached first.
    pub fn frame(&mut self, painter: &mut dyn Painter, data: &mut AppData) -> FrameReport {
        let reloaded = if self.config.watch {
            self.poll_sources(data)
        } else {
            Vec::new()
        };

        if self.bound_model != Some(data.id()) {
            let dead = self.panels.rebind_all(data);
            if self.bound_model.is_some() {
                debug!(dead, "data model reset, bindings re-attached");
            }
            self.bound_model = Some(data.id());
        }

        let mut cx = RenderCx::new(painter, data);
        self.panels.render_all(&mut cx);
        let clicked = cx.take_clicked();

        let (current, peak) = self.panels.layout_durations();
        debug!(
            current_us = current.as_micros() as u64,
            peak_us = peak.as_micros() as u64,
            "frame drawn"
        );

        FrameReport { reloaded, clicked }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use crate::testing::{DrawCall, RecordingPainter};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::{Duration, SystemTime};

    fn write_panel(path: &Path, body: &str, secs: u64) {
        std::fs::write(path, body).unwrap();
        let file = std::fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    // ── AppConfig builder ────────────────────────────────────────────

    #[test]
    fn config_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.layout_tolerance, 0.5);
        assert_eq!(config.window_padding, Size::new(8.0, 8.0));
        assert_eq!(config.default_panel_size, Size::new(400.0, 300.0));
        assert_eq!(config.default_title, "Panel");
        assert!(config.watch);
    }

    #[test]
    fn config_builders_chain() {
        let config = AppConfig::new()
            .with_layout_tolerance(1.0)
            .with_window_padding(Size::new(4.0, 2.0))
            .with_default_panel_size(Size::new(640.0, 480.0))
            .with_default_title("Untitled")
            .with_watch(false);
        assert_eq!(config.layout_tolerance, 1.0);
        assert_eq!(config.window_padding, Size::new(4.0, 2.0));
        assert_eq!(config.default_panel_size, Size::new(640.0, 480.0));
        assert_eq!(config.default_title, "Untitled");
        assert!(!config.watch);
    }

    // ── Loading and reloading ────────────────────────────────────────

    #[test]
    fn load_panel_uses_config_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.xml");
        write_panel(&path, "<panel><label text=\"Hi\"/></panel>", 1_000);

        let mut app = App::new(AppConfig::new().with_default_title("Untitled"));
        app.load_panel("p", &path, &AppData::new(), false).unwrap();

        let panel = app.panels.get("p").unwrap();
        assert_eq!(panel.title(), "Untitled");
        assert!(!panel.is_open());
        assert_eq!(app.source_path("p"), Some(path.as_path()));
    }

    #[test]
    fn reload_without_source_is_a_no_op() {
        let mut app = App::default();
        app.add_panel("code", Panel::new("Code", Size::new(100.0, 100.0)));
        assert!(!app.reload("code", &AppData::new()).unwrap());
    }

    #[test]
    fn changed_source_is_rebuilt_keeping_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.xml");
        write_panel(&path, r#"<panel title="One"><label id="a"/></panel>"#, 1_000);

        let mut app = App::default();
        let data = AppData::new();
        app.load_panel("p", &path, &data, true).unwrap();
        app.panels.hide("p");
        app.set_dpi_scale(2.0);

        assert!(app.poll_sources(&data).is_empty());

        write_panel(&path, r#"<panel title="Two"><label id="b"/></panel>"#, 2_000);
        assert_eq!(app.poll_sources(&data), ["p"]);

        let panel = app.panels.get("p").unwrap();
        assert_eq!(panel.title(), "Two");
        assert!(panel.find("b").is_some());
        assert!(!panel.is_open());
        assert_eq!(panel.dpi_scale(), 2.0);
        assert_eq!(panel.width(), 800.0);
    }

    #[test]
    fn reload_leaves_window_size_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.xml");
        write_panel(&path, r#"<panel title="One"><label id="a"/></panel>"#, 1_000);

        let mut app = App::default();
        let mut data = AppData::new();
        app.load_panel("p", &path, &data, true).unwrap();
        let mut painter = RecordingPainter::new(Size::new(300.0, 200.0));
        app.frame(&mut painter, &mut data);

        write_panel(&path, r#"<panel title="Two"><label id="b"/></panel>"#, 2_000);
        let report = app.frame(&mut painter, &mut data);
        assert_eq!(report.reloaded, ["p"]);

        let forced: Vec<bool> = painter
            .calls()
            .iter()
            .filter_map(|call| match call {
                DrawCall::BeginPanel { force_size, .. } => Some(*force_size),
                _ => None,
            })
            .collect();
        assert_eq!(forced, vec![false, false]);
    }

    #[test]
    fn broken_source_keeps_previous_panel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.xml");
        write_panel(&path, r#"<panel title="Good"><label id="a"/></panel>"#, 1_000);

        let mut app = App::default();
        let data = AppData::new();
        app.load_panel("p", &path, &data, true).unwrap();

        write_panel(&path, "<panel><label", 2_000);
        assert!(app.poll_sources(&data).is_empty());
        assert_eq!(app.panels.get("p").unwrap().title(), "Good");
        assert!(app.panels.get("p").unwrap().find("a").is_some());
    }

    #[test]
    fn reset_watchers_swallows_pending_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.xml");
        write_panel(&path, r#"<panel title="One"/>"#, 1_000);

        let mut app = App::default();
        let data = AppData::new();
        app.load_panel("p", &path, &data, true).unwrap();

        write_panel(&path, r#"<panel title="Two"/>"#, 2_000);
        app.reset_watchers();
        assert!(app.poll_sources(&data).is_empty());
        assert_eq!(app.panels.get("p").unwrap().title(), "One");
    }

    // ── Frames ───────────────────────────────────────────────────────

    #[test]
    fn clicks_are_reported_not_run() {
        let mut app = App::default();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        app.loader.add_button_callback("go", move || h.set(h.get() + 1));

        let panel = app
            .loader
            .parse_panel_from_str(r#"<panel><button id="go" text="Go"/></panel>"#, &AppData::new())
            .unwrap();
        app.add_panel("main", panel);

        let mut painter = RecordingPainter::new(Size::new(200.0, 100.0));
        painter.click("Go");
        let mut data = AppData::new();
        let report = app.frame(&mut painter, &mut data);

        assert_eq!(report.clicked.len(), 1);
        assert_eq!(hits.get(), 0);
        report.run_callbacks();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn frame_rebinds_after_model_reset() {
        let mut app = App::default();
        let mut data = AppData::with_sample_cities();
        let root = crate::builder::TextInputBuilder::new(app.context(), "city")
            .bind(crate::binding::TextField::CityName(0), &data)
            .build();
        app.add_panel("p", Panel::new("P", Size::new(200.0, 100.0)).with_root(root));

        let mut painter = RecordingPainter::new(Size::new(200.0, 100.0));
        app.frame(&mut painter, &mut data);
        assert_eq!(painter.calls().len(), 3);

        data.reset_cities(AppData::sample_cities());
        painter.clear();
        painter.type_text("city", "Boston");
        app.frame(&mut painter, &mut data);
        assert_eq!(data.cities[0].name, "Boston");
    }

    #[test]
    fn watch_disabled_skips_polling() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.xml");
        write_panel(&path, r#"<panel title="One"/>"#, 1_000);

        let mut app = App::new(AppConfig::new().with_watch(false));
        let mut data = AppData::new();
        app.load_panel("p", &path, &data, true).unwrap();
        write_panel(&path, r#"<panel title="Two"/>"#, 2_000);

        let mut painter = RecordingPainter::new(Size::new(100.0, 100.0));
        let report = app.frame(&mut painter, &mut data);
        assert!(report.reloaded.is_empty());
        assert_eq!(app.panels.get("p").unwrap().title(), "One");
    }

    #[test]
    fn fit_all_uses_window_padding() {
        let mut app = App::new(AppConfig::new().with_window_padding(Size::new(4.0, 4.0)));
        let mut label = Node::label(app.context(), "l", "L");
        label.set_width(Some(50.0));
        label.set_height(Some(10.0));
        app.add_panel("p", Panel::new("P", Size::new(400.0, 300.0)).with_root(label));
        app.fit_all_to_content();
        assert_eq!(app.panels.get("p").unwrap().size(), Size::new(58.0, 18.0));
    }
}

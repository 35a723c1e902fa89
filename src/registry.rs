//! Named collection of panels.
//!
//! [`PanelRegistry`] is an ordinary owned value: the frame loop holds one and
//! passes it where it is needed. Panels are kept in name order, which is also
//! the order they are drawn in.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::debug;

use crate::geometry::Size;
use crate::model::AppData;
use crate::panel::Panel;
use crate::render::RenderCx;

#[derive(Debug, Default)]
pub struct PanelRegistry {
    panels: BTreeMap<String, Panel>,
    peak_layout_duration: Duration,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `panel` under `name`, returning the panel it replaced.
    pub fn add(&mut self, name: impl Into<String>, panel: Panel) -> Option<Panel> {
        self.panels.insert(name.into(), panel)
    }

    /// Register `panel` under `name`, carrying over the open state of the
    /// panel it replaces. Returns the replaced panel.
    pub fn replace_root_preserving_open(
        &mut self,
        name: impl Into<String>,
        mut panel: Panel,
    ) -> Option<Panel> {
        let name = name.into();
        if let Some(existing) = self.panels.get(&name) {
            panel.set_open(existing.is_open());
        }
        self.panels.insert(name, panel)
    }

    pub fn remove(&mut self, name: &str) -> Option<Panel> {
        self.panels.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Panel> {
        self.panels.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Panel> {
        self.panels.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.panels.contains_key(name)
    }

    /// Panel names in draw order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.panels.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Panel)> {
        self.panels.iter().map(|(name, panel)| (name.as_str(), panel))
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    // -- visibility --------------------------------------------------------

    /// Returns `false` if no panel is named `name`.
    pub fn show(&mut self, name: &str) -> bool {
        self.with_panel(name, Panel::show)
    }

    pub fn hide(&mut self, name: &str) -> bool {
        self.with_panel(name, Panel::hide)
    }

    pub fn toggle(&mut self, name: &str) -> bool {
        self.with_panel(name, Panel::toggle)
    }

    fn with_panel(&mut self, name: &str, f: impl FnOnce(&mut Panel)) -> bool {
        match self.panels.get_mut(name) {
            Some(panel) => {
                f(panel);
                true
            }
            None => false,
        }
    }

    // -- bulk operations ---------------------------------------------------

    /// Draw every open panel.
    pub fn render_all(&mut self, cx: &mut RenderCx<'_>) {
        for panel in self.panels.values_mut() {
            panel.render(cx);
        }
    }

    pub fn update_all_layouts(&mut self) {
        for panel in self.panels.values_mut() {
            panel.update_layout();
        }
    }

    /// Rescale every panel. Returns `false`, changing nothing, if `scale` is
    /// not positive.
    pub fn set_all_dpi_scale(&mut self, scale: f32) -> bool {
        if scale.is_nan() || scale <= 0.0 {
            return false;
        }
        for panel in self.panels.values_mut() {
            panel.set_dpi_scale(scale);
        }
        debug!(scale, panels = self.panels.len(), "panels rescaled");
        true
    }

    pub fn fit_all_to_content(&mut self, padding: Size) {
        for panel in self.panels.values_mut() {
            panel.fit_to_content(padding);
        }
    }

    /// Re-attach every panel's bindings after a data model reset.
    ///
    /// Returns the number of bindings left dead.
    pub fn rebind_all(&mut self, data: &AppData) -> usize {
        self.panels
            .values_mut()
            .map(|panel| panel.rebind(data))
            .sum()
    }

    // -- timing ------------------------------------------------------------

    /// The slowest last solve among all panels, and the slowest ever seen.
    pub fn layout_durations(&mut self) -> (Duration, Duration) {
        let current = self
            .panels
            .values()
            .map(Panel::last_layout_duration)
            .max()
            .unwrap_or_default();
        self.peak_layout_duration = self.peak_layout_duration.max(current);
        (current, self.peak_layout_duration)
    }

    /// Slowest solve observed by [`layout_durations`](Self::layout_durations).
    pub fn peak_layout_duration(&self) -> Duration {
        self.peak_layout_duration
    }
}

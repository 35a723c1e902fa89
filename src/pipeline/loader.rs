//! Markup loader: documents and files to panels.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::geometry::Size;
use crate::layout::LayoutContext;
use crate::markup::{self, Element, MarkupError};
use crate::model::AppData;
use crate::node::Node;
use crate::panel::Panel;

use super::attrs::apply_properties;
use super::callbacks::CallbackRegistry;
use super::strategy::{BuildError, ElementKind};
use super::validate::{validate_hierarchy, HierarchyError};

/// Tag of the root element of a panel document.
pub const PANEL_TAG: &str = "panel";

/// Default panel title when the document does not set one.
pub const DEFAULT_TITLE: &str = "Panel";

/// Default panel size when the document does not set one.
pub const DEFAULT_PANEL_SIZE: Size = Size::new(400.0, 300.0);

/// A panel document could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Markup(#[from] MarkupError),

    #[error("no <panel> element in document (first element is <{found}>)")]
    MissingPanel { found: String },

    #[error("document contains no elements")]
    Empty,

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

/// Builds widget trees and panels from markup.
///
/// Nodes are created in the loader's [`LayoutContext`]; button callbacks are
/// looked up by element id in its [`CallbackRegistry`] while building.
#[derive(Debug)]
pub struct MarkupLoader {
    cx: LayoutContext,
    callbacks: CallbackRegistry,
    default_title: String,
    default_size: Size,
}

impl MarkupLoader {
    pub fn new(cx: &LayoutContext) -> Self {
        Self::with_defaults(cx, DEFAULT_TITLE, DEFAULT_PANEL_SIZE)
    }

    /// Create a loader whose panels fall back to `title` and `size`.
    pub fn with_defaults(cx: &LayoutContext, title: impl Into<String>, size: Size) -> Self {
        Self {
            cx: cx.clone(),
            callbacks: CallbackRegistry::new(),
            default_title: title.into(),
            default_size: size,
        }
    }

    pub fn context(&self) -> &LayoutContext {
        &self.cx
    }

    // -- callbacks ---------------------------------------------------------

    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    /// Attach `callback` to buttons with `id` built from now on.
    pub fn add_button_callback(&mut self, id: impl Into<String>, callback: impl Fn() + 'static) {
        self.callbacks.add(id, callback);
    }

    pub fn remove_button_callback(&mut self, id: &str) -> bool {
        self.callbacks.remove(id)
    }

    pub fn clear_callbacks(&mut self) {
        self.callbacks.clear();
    }

    // -- widgets -----------------------------------------------------------

    /// Build the subtree for `element`.
    ///
    /// Returns `None` if the element cannot be built; the reason is logged.
    /// Children that cannot be built are left out and their siblings kept.
    pub fn build_element(&self, element: &Element, data: &AppData) -> Option<Node> {
        match self.try_build(element, data) {
            Ok(node) => Some(node),
            Err(err) => {
                warn!(%err, "element skipped");
                None
            }
        }
    }

    fn try_build(&self, element: &Element, data: &AppData) -> Result<Node, BuildError> {
        let kind = ElementKind::from_tag(&element.tag).ok_or_else(|| BuildError::UnknownTag {
            tag: element.tag.clone(),
        })?;

        let mut node = kind.build(element, &self.cx, data, &self.callbacks)?;
        apply_properties(&mut node, element);

        if kind.is_container() {
            for child in &element.children {
                if let Some(child) = self.build_element(child, data) {
                    // Container kinds always accept children.
                    let _ = node.add_child(child);
                }
            }
        }
        Ok(node)
    }

    /// Build a single widget subtree from a markup fragment.
    pub fn parse_widget_from_str(
        &self,
        source: &str,
        data: &AppData,
    ) -> Result<Option<Node>, MarkupError> {
        let element = markup::parse_fragment(source)?;
        Ok(self.build_element(&element, data))
    }

    // -- panels ------------------------------------------------------------

    /// Build a panel from a `<panel>` element.
    ///
    /// The first child element becomes the root. A tree that breaks the
    /// nesting rules is logged and installed anyway.
    pub fn build_panel(&self, element: &Element, data: &AppData) -> Panel {
        let title = element.attr_or("title", &self.default_title);
        let size = Size::new(
            dimension(element, "width", self.default_size.width),
            dimension(element, "height", self.default_size.height),
        );
        let mut panel = Panel::new(title, size);

        let Some((root_element, extra)) = element.children.split_first() else {
            return panel;
        };
        if !extra.is_empty() {
            warn!(
                panel = title,
                ignored = extra.len(),
                "panel has more than one root element, extra ones ignored"
            );
        }

        if let Some(root) = self.build_element(root_element, data) {
            if let Err(err) = validate_hierarchy(&root) {
                warn!(panel = title, %err, "layout validation failed, installing anyway");
            }
            panel.set_root(root);
        }
        panel
    }

    /// Build a panel from a markup document.
    ///
    /// The first top-level `<panel>` element is used.
    pub fn parse_panel_from_str(&self, source: &str, data: &AppData) -> Result<Panel, LoadError> {
        let roots = markup::parse_document(source)?;
        let element = find_panel(&roots)?;
        Ok(self.build_panel(element, data))
    }

    pub fn parse_panel_from_file(
        &self,
        path: impl AsRef<Path>,
        data: &AppData,
    ) -> Result<Panel, LoadError> {
        let source = read(path.as_ref())?;
        self.parse_panel_from_str(&source, data)
    }

    /// Rebuild `panel` from the file at `path`, keeping its open state.
    ///
    /// Title, size and tree are replaced together. On error the panel is left
    /// untouched.
    pub fn reload_panel(
        &self,
        panel: &mut Panel,
        path: impl AsRef<Path>,
        data: &AppData,
    ) -> Result<(), LoadError> {
        let path = path.as_ref();
        let mut fresh = self.parse_panel_from_file(path, data)?;

        panel.set_title(fresh.title());
        panel.set_width(fresh.width());
        panel.set_height(fresh.height());
        match fresh.take_root() {
            Some(root) => panel.set_root(root),
            None => {
                panel.take_root();
            }
        }
        info!(path = %path.display(), panel = panel.title(), "panel reloaded");
        Ok(())
    }

    /// Check that the file at `path` loads and its tree follows the nesting
    /// rules.
    pub fn validate_file(&self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let source = read(path.as_ref())?;
        let roots = markup::parse_document(&source)?;
        let element = find_panel(&roots)?;
        let data = AppData::new();
        match element
            .children
            .first()
            .and_then(|root| self.build_element(root, &data))
        {
            Some(root) => Ok(validate_hierarchy(&root)?),
            None => Ok(()),
        }
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn find_panel(roots: &[Element]) -> Result<&Element, LoadError> {
    let first = roots.first().ok_or(LoadError::Empty)?;
    roots
        .iter()
        .find(|element| element.tag == PANEL_TAG)
        .ok_or_else(|| LoadError::MissingPanel {
            found: first.tag.clone(),
        })
}

fn dimension(element: &Element, name: &str, default: f32) -> f32 {
    let Some(raw) = element.attr(name).filter(|raw| !raw.is_empty()) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|err| {
        warn!(attribute = name, value = raw, %err, "panel dimension ignored");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeKind, Orientation};
    use std::cell::Cell;
    use std::io::Write;
    use std::rc::Rc;

    const CONTACT: &str = r#"<?xml version="1.0"?>
<panel title="Contact" width="420" height="260">
  <vlayout id="form" padding="8">
    <hlayout id="name_row">
      <label text="Name"/>
      <input id="name" bind="name" flex="1"/>
    </hlayout>
    <slider id="volume"/>
    <button id="submit" text="Submit" variant="primary"/>
  </vlayout>
</panel>"#;

    #[test]
    fn panel_attributes_and_tree() {
        let cx = LayoutContext::new();
        let loader = MarkupLoader::new(&cx);
        let panel = loader
            .parse_panel_from_str(CONTACT, &AppData::new())
            .unwrap();

        assert_eq!(panel.title(), "Contact");
        assert_eq!(panel.size(), Size::new(420.0, 260.0));

        let root = panel.root().unwrap();
        assert_eq!(root.orientation(), Some(Orientation::Vertical));
        let ids: Vec<&str> = root.children().iter().map(Node::id).collect();
        assert_eq!(ids, ["name_row", "submit"]);
        assert!(panel.find("name").unwrap().kind().is_bound());
    }

    #[test]
    fn doctype_cdata_and_prose_are_skipped() {
        let src = r#"<?xml version="1.0"?>
<!DOCTYPE panel>
<panel title="Notes">
  <vlayout id="body">
    <![CDATA[ <button id="ghost"/> ]]>
    Don't "panic": the form below still loads.
    <label id="hint" text="It's fine"/>
    <button id="ok" text="OK"/>
  </vlayout>
</panel>"#;
        let cx = LayoutContext::new();
        let loader = MarkupLoader::new(&cx);
        let panel = loader.parse_panel_from_str(src, &AppData::new()).unwrap();

        assert_eq!(panel.title(), "Notes");
        let ids: Vec<&str> = panel.root().unwrap().children().iter().map(Node::id).collect();
        assert_eq!(ids, ["hint", "ok"]);
        assert!(panel.find("ghost").is_none());
    }

    #[test]
    fn defaults_apply_without_attributes() {
        let cx = LayoutContext::new();
        let loader = MarkupLoader::new(&cx);
        let panel = loader
            .parse_panel_from_str("<panel/>", &AppData::new())
            .unwrap();
        assert_eq!(panel.title(), DEFAULT_TITLE);
        assert_eq!(panel.size(), DEFAULT_PANEL_SIZE);
        assert!(panel.root().is_none());

        let loader = MarkupLoader::with_defaults(&cx, "Untitled", Size::new(640.0, 480.0));
        let panel = loader
            .parse_panel_from_str(r#"<panel width="oops"/>"#, &AppData::new())
            .unwrap();
        assert_eq!(panel.title(), "Untitled");
        assert_eq!(panel.width(), 640.0);
    }

    #[test]
    fn missing_panel_and_empty_document() {
        let cx = LayoutContext::new();
        let loader = MarkupLoader::new(&cx);
        let data = AppData::new();
        assert!(matches!(
            loader.parse_panel_from_str("<window/>", &data),
            Err(LoadError::MissingPanel { found }) if found == "window"
        ));
        assert!(matches!(
            loader.parse_panel_from_str("<!-- nothing -->", &data),
            Err(LoadError::Empty)
        ));
        assert!(matches!(
            loader.parse_panel_from_str("<panel>", &data),
            Err(LoadError::Markup(_))
        ));
    }

    #[test]
    fn unknown_root_leaves_panel_empty() {
        let cx = LayoutContext::new();
        let loader = MarkupLoader::new(&cx);
        let panel = loader
            .parse_panel_from_str("<panel><grid/><vlayout/></panel>", &AppData::new())
            .unwrap();
        assert!(panel.root().is_none());
    }

    #[test]
    fn invalid_nesting_is_installed() {
        let cx = LayoutContext::new();
        let loader = MarkupLoader::new(&cx);
        let panel = loader
            .parse_panel_from_str(
                r#"<panel><vlayout id="a"><vlayout id="b"/></vlayout></panel>"#,
                &AppData::new(),
            )
            .unwrap();
        assert!(panel.find("b").is_some());
    }

    #[test]
    fn leaf_children_are_not_built() {
        let cx = LayoutContext::new();
        let loader = MarkupLoader::new(&cx);
        let node = loader
            .parse_widget_from_str(r#"<label text="x"><button id="b"/></label>"#, &AppData::new())
            .unwrap()
            .unwrap();
        assert!(node.children().is_empty());
        assert_eq!(cx.node_count(), 1);
    }

    #[test]
    fn callbacks_are_looked_up_at_build_time() {
        let cx = LayoutContext::new();
        let mut loader = MarkupLoader::new(&cx);
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        loader.add_button_callback("go", move || h.set(h.get() + 1));

        let data = AppData::new();
        let with = loader
            .parse_widget_from_str(r#"<button id="go"/>"#, &data)
            .unwrap()
            .unwrap();
        assert!(loader.remove_button_callback("go"));
        let without = loader
            .parse_widget_from_str(r#"<button id="go"/>"#, &data)
            .unwrap()
            .unwrap();

        assert!(matches!(with.kind(), NodeKind::Button { callback: Some(_), .. }));
        assert!(matches!(without.kind(), NodeKind::Button { callback: None, .. }));
    }

    #[test]
    fn reload_keeps_open_state_and_survives_errors() {
        let cx = LayoutContext::new();
        let loader = MarkupLoader::new(&cx);
        let data = AppData::new();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"<panel title="One"><label id="a" text="A"/></panel>"#).unwrap();

        let mut panel = loader.parse_panel_from_file(file.path(), &data).unwrap();
        panel.hide();

        std::fs::write(
            file.path(),
            r#"<panel title="Two" width="300"><label id="b" text="B"/></panel>"#,
        )
        .unwrap();
        loader.reload_panel(&mut panel, file.path(), &data).unwrap();
        assert_eq!(panel.title(), "Two");
        assert_eq!(panel.width(), 300.0);
        assert!(panel.find("b").is_some());
        assert!(!panel.is_open());

        std::fs::write(file.path(), "<panel><label").unwrap();
        assert!(loader.reload_panel(&mut panel, file.path(), &data).is_err());
        assert_eq!(panel.title(), "Two");
        assert!(panel.find("b").is_some());
    }

    #[test]
    fn validate_file_reports_nesting() {
        let cx = LayoutContext::new();
        let loader = MarkupLoader::new(&cx);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"<panel><hlayout id="row"><hlayout id="inner"/></hlayout></panel>"#
        )
        .unwrap();
        assert!(matches!(
            loader.validate_file(file.path()),
            Err(LoadError::Hierarchy(HierarchyError::SameOrientation { .. }))
        ));

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            loader.validate_file(&missing),
            Err(LoadError::Io { .. })
        ));
    }
}

//! Snapshot helpers.
//!
//! Plain-text dumps of a widget tree for snapshot-style assertions. One line
//! per node, indented two spaces per level, in pre-order.

use crate::node::Node;

/// Tree dump with each node's computed box.
///
/// # Examples
///
/// ```ignore
/// let text = outline(panel.root().unwrap());
/// assert_eq!(text, "hlayout#row [0,0 200x20]\n  label#a [0,0 96x20] \"A\"\n  ...");
/// ```
pub fn outline(node: &Node) -> String {
    dump(node, true)
}

/// Tree dump without geometry: kinds, ids, texts and binding state only.
pub fn structure(node: &Node) -> String {
    dump(node, false)
}

fn dump(node: &Node, with_bounds: bool) -> String {
    let mut lines = Vec::new();
    node.walk(&mut |n, depth| {
        let mut line = format!("{:indent$}{}", "", n.kind().name(), indent = depth * 2);
        if !n.id().is_empty() {
            line.push('#');
            line.push_str(n.id());
        }
        if with_bounds {
            let b = n.bounds();
            line.push_str(&format!(" [{},{} {}x{}]", b.x, b.y, b.width, b.height));
        }
        if let Some(text) = n.kind().text() {
            line.push_str(&format!(" {text:?}"));
        }
        if n.kind().is_bound() {
            line.push_str(" (bound)");
        }
        lines.push(line);
    });
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutContext;

    #[test]
    fn structure_lists_nodes_in_pre_order() {
        let cx = LayoutContext::new();
        let mut row = Node::hlayout(&cx, "row");
        row.add_child(Node::label(&cx, "", "Name")).unwrap();
        row.add_child(Node::text_input(&cx, "name")).unwrap();

        assert_eq!(
            structure(&row),
            "hlayout#row\n  label \"Name\"\n  text input#name"
        );
    }

    #[test]
    fn outline_includes_bounds() {
        let cx = LayoutContext::new();
        let mut label = Node::label(&cx, "a", "A");
        label.update_layout(Some(100.0), Some(20.0));
        assert_eq!(outline(&label), "label#a [0,0 100x20] \"A\"");
    }
}

//! Hierarchy checks on a built tree.

use crate::node::{Node, Orientation};

/// A container nesting rule was broken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    #[error(
        "layout container '{parent}' contains child layout '{child}' of the same orientation ({orientation}); \
         consider alternating hlayout and vlayout"
    )]
    SameOrientation {
        parent: String,
        child: String,
        orientation: Orientation,
    },
}

/// Reject containers whose direct child is a container of the same
/// orientation. The first offending pair in pre-order is reported.
pub fn validate_hierarchy(node: &Node) -> Result<(), HierarchyError> {
    let Some(orientation) = node.orientation() else {
        return Ok(());
    };
    for child in node.children() {
        let Some(child_orientation) = child.orientation() else {
            continue;
        };
        if child_orientation == orientation {
            return Err(HierarchyError::SameOrientation {
                parent: node.id().to_owned(),
                child: child.id().to_owned(),
                orientation,
            });
        }
        validate_hierarchy(child)?;
    }
    Ok(())
}

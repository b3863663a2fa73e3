use permtree_types::PermissionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a node inside a [`crate::MenuForest`] arena.
///
/// Indices follow catalog order among menu records, so comparing two
/// indices compares their catalog positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hierarchical checkbox state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    Checked,
    Unchecked,
    Indeterminate,
}

impl TriState {
    /// True for `Checked` and `Indeterminate`.
    pub fn is_partially_selected(&self) -> bool {
        !matches!(self, Self::Unchecked)
    }
}

/// One menu permission in the forest.
#[derive(Debug, Clone)]
pub struct MenuNode {
    pub(crate) id: PermissionId,
    pub(crate) code: String,
    pub(crate) name: String,
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) children: Vec<NodeIndex>,
    pub(crate) checked: bool,
    pub(crate) indeterminate: bool,
}

impl MenuNode {
    pub fn id(&self) -> PermissionId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lookup-only link to the parent node.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_indeterminate(&self) -> bool {
        self.indeterminate
    }

    pub fn state(&self) -> TriState {
        if self.checked {
            TriState::Checked
        } else if self.indeterminate {
            TriState::Indeterminate
        } else {
            TriState::Unchecked
        }
    }
}

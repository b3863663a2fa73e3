use permtree_types::{PermissionId, PermissionKind};
use serde::{Deserialize, Serialize};

/// One permission whose `selected` flag changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChange {
    pub id: PermissionId,
    pub kind: PermissionKind,
    pub selected: bool,
}

/// Minimal delta produced by a selection operation, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOutcome {
    pub changes: Vec<SelectionChange>,
}

impl SelectionOutcome {
    /// True when the operation changed nothing (including rejected targets).
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn selected(&self) -> impl Iterator<Item = PermissionId> + '_ {
        self.changes.iter().filter(|c| c.selected).map(|c| c.id)
    }

    pub fn deselected(&self) -> impl Iterator<Item = PermissionId> + '_ {
        self.changes.iter().filter(|c| !c.selected).map(|c| c.id)
    }

    pub fn contains(&self, id: PermissionId) -> bool {
        self.changes.iter().any(|c| c.id == id)
    }
}

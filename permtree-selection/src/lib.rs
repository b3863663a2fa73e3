//! Role permission selection for permtree.
//!
//! [`SelectionEngine`] backs the "edit role" screen: an administrator ticks
//! menu nodes in a tri-state tree and the engine keeps three things
//! consistent after every change:
//!
//! - **Cascade**: toggling a node forces its whole subtree to the same value.
//! - **Tri-state**: every ancestor is checked iff all its children are, and
//!   indeterminate iff it is not checked but something below it is.
//! - **Api union**: an api permission is selected iff at least one of the
//!   menus it is associated with is checked.
//!
//! The engine owns its catalog snapshot. Selection flags are derived from
//! engine state when the permission list is read back, so callers never see
//! partially updated records.

mod engine;
mod outcome;

pub use engine::SelectionEngine;
pub use outcome::{SelectionChange, SelectionOutcome};
pub use permtree_forest::TriState;

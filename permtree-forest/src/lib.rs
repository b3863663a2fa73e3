//! Menu permission forest for permtree.
//!
//! Turns the `menu` subset of a permission catalog into an ordered forest of
//! [`MenuNode`]s and holds each node's tri-state selection flags:
//!
//! - [`MenuForest`]: arena of nodes addressed by [`NodeIndex`]
//! - [`MenuNode`]: one menu permission plus parent/children links
//! - [`TriState`]: checked / unchecked / indeterminate
//!
//! Parent resolution applies an explicit `parent_id` first and falls back to
//! the code path (`menu:a:b` hangs under `menu:a`). Dangling references and
//! `parent_id` cycles degrade to roots, so the result is always a proper
//! forest.

mod forest;
mod node;

pub use forest::{Ancestors, MenuForest};
pub use node::{MenuNode, NodeIndex, TriState};

//! Api-to-menu association inference for permtree.
//!
//! Catalog data only sometimes links an `api` permission to the menu that
//! needs it. [`AssociationResolver`] infers the links, taking the first of
//! four rules that yields a candidate:
//!
//! 1. explicit `parent_id` naming a menu
//! 2. path containment, longest menu path wins
//! 3. segment-overlap scoring, highest score wins
//! 4. resource string containment
//!
//! The result is an [`AssociationMap`], symmetric between `api → menus` and
//! `menu → apis`, with the [`MatchTier`] that produced each api's links.
//! Rules 3 and 4 are approximate; they are logged separately so catalog data
//! can be audited.

mod map;
mod resolver;

pub use map::{AssociationMap, MatchTier};
pub use resolver::AssociationResolver;

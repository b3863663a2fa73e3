use permtree_types::PermissionId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Which rule produced an api's associations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    ExplicitParent,
    PathPrefix,
    Heuristic,
    ResourceFallback,
}

impl MatchTier {
    /// Rules 1 and 2 are exact; 3 and 4 are approximate.
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::ExplicitParent | Self::PathPrefix)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExplicitParent => "explicit-parent",
            Self::PathPrefix => "path-prefix",
            Self::Heuristic => "heuristic",
            Self::ResourceFallback => "resource-fallback",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Symmetric many-to-many relation between api and menu permissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationMap {
    api_to_menus: BTreeMap<PermissionId, BTreeSet<PermissionId>>,
    menu_to_apis: BTreeMap<PermissionId, BTreeSet<PermissionId>>,
    tiers: BTreeMap<PermissionId, MatchTier>,
    unassociated: Vec<PermissionId>,
}

impl AssociationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links `api` to `menu` in both directions. The first tier recorded for
    /// an api is kept.
    pub fn link(&mut self, api: PermissionId, menu: PermissionId, tier: MatchTier) {
        self.api_to_menus.entry(api).or_default().insert(menu);
        self.menu_to_apis.entry(menu).or_default().insert(api);
        self.tiers.entry(api).or_insert(tier);
        self.unassociated.retain(|id| *id != api);
    }

    /// Records an api that no rule could place.
    pub fn mark_unassociated(&mut self, api: PermissionId) {
        if !self.api_to_menus.contains_key(&api) && !self.unassociated.contains(&api) {
            self.unassociated.push(api);
        }
    }

    pub fn menus_for(&self, api: PermissionId) -> impl Iterator<Item = PermissionId> + '_ {
        self.api_to_menus.get(&api).into_iter().flatten().copied()
    }

    pub fn apis_for(&self, menu: PermissionId) -> impl Iterator<Item = PermissionId> + '_ {
        self.menu_to_apis.get(&menu).into_iter().flatten().copied()
    }

    pub fn tier(&self, api: PermissionId) -> Option<MatchTier> {
        self.tiers.get(&api).copied()
    }

    pub fn is_associated(&self, api: PermissionId) -> bool {
        self.api_to_menus.contains_key(&api)
    }

    /// Api ids with no menu, in catalog order.
    pub fn unassociated(&self) -> &[PermissionId] {
        &self.unassociated
    }

    /// Api ids placed by the heuristic or resource rules.
    pub fn low_confidence(&self) -> impl Iterator<Item = PermissionId> + '_ {
        self.tiers
            .iter()
            .filter(|(_, tier)| !tier.is_exact())
            .map(|(api, _)| *api)
    }

    /// `(api, menus, tier)` for every associated api, ordered by api id.
    pub fn iter(&self) -> impl Iterator<Item = (PermissionId, &BTreeSet<PermissionId>, MatchTier)> {
        self.api_to_menus.iter().map(|(api, menus)| {
            let tier = self.tiers.get(api).copied().unwrap_or(MatchTier::ExplicitParent);
            (*api, menus, tier)
        })
    }

    /// Number of associated apis.
    pub fn len(&self) -> usize {
        self.api_to_menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.api_to_menus.is_empty()
    }
}

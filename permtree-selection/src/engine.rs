use crate::outcome::{SelectionChange, SelectionOutcome};
use permtree_assoc::{AssociationMap, AssociationResolver};
use permtree_forest::{MenuForest, NodeIndex, TriState};
use permtree_types::{Permission, PermissionId, PermtreeConfig};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Selection state for one role-editing session.
///
/// Menu selection lives in the forest's tri-state flags; api selection lives
/// in a separate table keyed by id. The catalog snapshot is never mutated, so
/// [`SelectionEngine::permissions`] always reflects a consistent state.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    catalog: Vec<Permission>,
    forest: MenuForest,
    associations: AssociationMap,
    api_selected: HashMap<PermissionId, bool>,
}

impl SelectionEngine {
    /// Builds the forest and associations for `catalog`, seeds selection
    /// from the records' `selected` flags, then rehydrates.
    pub fn new(catalog: Vec<Permission>, config: &PermtreeConfig) -> Self {
        let forest = MenuForest::build(&catalog, &config.forest);
        let associations = AssociationResolver::new(config.association.clone()).resolve(&catalog);
        Self::from_parts(catalog, forest, associations)
    }

    /// Uses a forest and association map built elsewhere from the same
    /// catalog. Selection is seeded and rehydrated as in [`Self::new`].
    pub fn from_parts(
        catalog: Vec<Permission>,
        forest: MenuForest,
        associations: AssociationMap,
    ) -> Self {
        let mut api_selected = HashMap::new();
        for api in catalog.iter().filter(|p| p.is_api()) {
            api_selected.entry(api.id).or_insert(api.selected);
        }
        let mut engine = Self {
            catalog,
            forest,
            associations,
            api_selected,
        };
        engine.rehydrate();
        engine
    }

    pub fn forest(&self) -> &MenuForest {
        &self.forest
    }

    pub fn associations(&self) -> &AssociationMap {
        &self.associations
    }

    /// Tri-state of a menu node, `None` for api or unknown ids.
    pub fn state(&self, id: PermissionId) -> Option<TriState> {
        self.forest.get(id).map(|node| node.state())
    }

    pub fn is_selected(&self, id: PermissionId) -> bool {
        match self.forest.get(id) {
            Some(node) => node.is_checked(),
            None => self.api_selected.get(&id).copied().unwrap_or(false),
        }
    }

    /// Ids of every selected permission, menu and api, in catalog order.
    /// This is what gets persisted as the role.
    pub fn selected_ids(&self) -> Vec<PermissionId> {
        let mut seen = HashSet::new();
        self.catalog
            .iter()
            .map(|p| p.id)
            .filter(|id| self.is_selected(*id) && seen.insert(*id))
            .collect()
    }

    /// The catalog with each record's `selected` flag taken from engine state.
    pub fn permissions(&self) -> Vec<Permission> {
        self.catalog
            .iter()
            .map(|p| Permission {
                selected: self.is_selected(p.id),
                ..p.clone()
            })
            .collect()
    }

    /// Checks or unchecks a menu node together with its subtree, updates
    /// ancestors and associated apis, and reports what changed.
    ///
    /// Unknown ids and api ids are ignored.
    pub fn toggle(&mut self, id: PermissionId, value: bool) -> SelectionOutcome {
        let Some(index) = self.forest.index_of(id) else {
            debug!(%id, "toggle target is not a menu node, ignoring");
            return SelectionOutcome::default();
        };
        let before = self.snapshot();
        self.apply_toggle(index, value);
        self.diff(&before)
    }

    /// Sets an unassociated api permission directly.
    ///
    /// Menu and unknown ids are ignored, as are apis associated with a menu:
    /// those follow their menus' checked state.
    pub fn toggle_api(&mut self, id: PermissionId, value: bool) -> SelectionOutcome {
        if self.forest.contains(id) || !self.api_selected.contains_key(&id) {
            debug!(%id, "toggle_api target is not an api permission, ignoring");
            return SelectionOutcome::default();
        }
        if self.associations.is_associated(id) {
            debug!(%id, "api permission follows its menus, ignoring toggle_api");
            return SelectionOutcome::default();
        }
        let before = self.snapshot();
        self.api_selected.insert(id, value);
        self.diff(&before)
    }

    /// Checks or unchecks every root and therefore the whole forest.
    pub fn set_all(&mut self, value: bool) -> SelectionOutcome {
        let before = self.snapshot();
        let roots = self.forest.roots().to_vec();
        for root in roots {
            self.apply_toggle(root, value);
        }
        self.diff(&before)
    }

    /// Replaces all selection with a persisted id set and rehydrates.
    ///
    /// Ids that name nothing in the catalog are skipped.
    pub fn load_selection<I>(&mut self, ids: I) -> SelectionOutcome
    where
        I: IntoIterator<Item = PermissionId>,
    {
        let wanted: HashSet<PermissionId> = ids.into_iter().collect();
        let before = self.snapshot();

        let nodes: Vec<NodeIndex> = self.forest.iter().map(|(idx, _)| idx).collect();
        for idx in nodes {
            let checked = wanted.contains(&self.forest.node(idx).id());
            self.forest.set_checked(idx, checked);
        }
        for (api, selected) in self.api_selected.iter_mut() {
            *selected = wanted.contains(api);
        }
        self.rehydrate();
        self.diff(&before)
    }

    /// Resolves tri-state flags bottom-up from the current leaf selection,
    /// then selects the apis of every checked menu.
    ///
    /// Running it twice changes nothing the second time.
    pub fn rehydrate(&mut self) {
        for idx in self.forest.post_order() {
            self.forest.refresh_from_children(idx);
        }
        let checked: Vec<NodeIndex> = self
            .forest
            .iter()
            .filter(|(_, node)| node.is_checked())
            .map(|(idx, _)| idx)
            .collect();
        self.sync_apis(&checked, true);
        debug!(
            menus = self.forest.len(),
            checked = checked.len(),
            "rehydrated selection"
        );
    }

    fn apply_toggle(&mut self, index: NodeIndex, value: bool) {
        let subtree = self.forest.set_subtree(index, value);
        self.sync_apis(&subtree, value);

        let ancestors: Vec<NodeIndex> = self.forest.ancestors(index).collect();
        let mut flipped = Vec::new();
        for ancestor in ancestors {
            let was_checked = self.forest.node(ancestor).is_checked();
            self.forest.refresh_from_children(ancestor);
            if self.forest.node(ancestor).is_checked() != was_checked {
                flipped.push(ancestor);
            }
        }
        // Ancestors only ever move in the direction of `value`.
        self.sync_apis(&flipped, value);

        debug!(
            id = %self.forest.node(index).id(),
            value,
            subtree = subtree.len(),
            ancestors_flipped = flipped.len(),
            "toggled menu node"
        );
    }

    /// Applies the api side effect of `nodes` becoming `value`: select every
    /// associated api, or recompute each as the union over its menus.
    fn sync_apis(&mut self, nodes: &[NodeIndex], value: bool) {
        for idx in nodes {
            let menu = self.forest.node(*idx).id();
            let apis: Vec<PermissionId> = self.associations.apis_for(menu).collect();
            for api in apis {
                let selected = value || self.any_menu_checked(api);
                self.api_selected.insert(api, selected);
            }
        }
    }

    fn any_menu_checked(&self, api: PermissionId) -> bool {
        self.associations
            .menus_for(api)
            .any(|menu| self.forest.get(menu).is_some_and(|node| node.is_checked()))
    }

    fn snapshot(&self) -> Vec<bool> {
        self.catalog.iter().map(|p| self.is_selected(p.id)).collect()
    }

    fn diff(&self, before: &[bool]) -> SelectionOutcome {
        let mut seen = HashSet::new();
        let changes = self
            .catalog
            .iter()
            .zip(before)
            .filter_map(|(perm, was)| {
                let now = self.is_selected(perm.id);
                (now != *was && seen.insert(perm.id)).then_some(SelectionChange {
                    id: perm.id,
                    kind: perm.kind,
                    selected: now,
                })
            })
            .collect();
        SelectionOutcome { changes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> PermissionId {
        PermissionId::new(raw)
    }

    fn engine(catalog: Vec<Permission>) -> SelectionEngine {
        SelectionEngine::new(catalog, &PermtreeConfig::default())
    }

    #[test]
    fn toggle_on_unknown_id_is_a_no_op() {
        let mut e = engine(vec![Permission::menu(1, "menu:a")]);
        assert!(e.toggle(id(99), true).is_empty());
        assert!(!e.is_selected(id(1)));
    }

    #[test]
    fn toggle_on_api_id_is_a_no_op() {
        let mut e = engine(vec![
            Permission::menu(1, "menu:a"),
            Permission::api(2, "api:a:list"),
        ]);
        assert!(e.toggle(id(2), true).is_empty());
        assert!(!e.is_selected(id(2)));
    }

    #[test]
    fn toggle_api_ignores_menus() {
        let mut e = engine(vec![Permission::menu(1, "menu:a")]);
        assert!(e.toggle_api(id(1), true).is_empty());
        assert!(!e.is_selected(id(1)));
    }

    #[test]
    fn repeated_toggle_reports_nothing() {
        let mut e = engine(vec![Permission::menu(1, "menu:a")]);
        assert_eq!(e.toggle(id(1), true).len(), 1);
        assert!(e.toggle(id(1), true).is_empty());
    }

    #[test]
    fn permissions_do_not_alias_the_snapshot() {
        let mut e = engine(vec![Permission::menu(1, "menu:a")]);
        let before = e.permissions();
        e.toggle(id(1), true);
        assert!(!before[0].selected);
        assert!(e.permissions()[0].selected);
    }
}

mod common;

use common::{engine, id, ids, role_catalog};
use permtree_assoc::{AssociationMap, MatchTier};
use permtree_forest::MenuForest;
use permtree_selection::{SelectionChange, SelectionEngine, TriState};
use permtree_types::{ForestConfig, Permission, PermissionKind};
use pretty_assertions::assert_eq;

#[test]
fn fixture_associations_follow_paths() {
    let e = engine(role_catalog());
    let map = e.associations();
    assert_eq!(map.menus_for(id(10)).collect::<Vec<_>>(), ids(&[2]));
    assert_eq!(map.menus_for(id(13)).collect::<Vec<_>>(), ids(&[1]));
    assert_eq!(map.unassociated(), ids(&[14]).as_slice());
}

#[test]
fn checking_one_child_makes_parent_indeterminate() {
    let mut e = engine(role_catalog());
    let outcome = e.toggle(id(2), true);

    assert_eq!(
        outcome.changes,
        vec![
            SelectionChange { id: id(2), kind: PermissionKind::Menu, selected: true },
            SelectionChange { id: id(10), kind: PermissionKind::Api, selected: true },
        ]
    );
    assert_eq!(e.state(id(1)), Some(TriState::Indeterminate));
    assert!(!e.is_selected(id(1)));
}

#[test]
fn checking_all_children_checks_parent_and_its_apis() {
    let mut e = engine(role_catalog());
    e.toggle(id(2), true);
    let outcome = e.toggle(id(3), true);

    assert_eq!(outcome.selected().collect::<Vec<_>>(), ids(&[1, 3, 11, 13]));
    assert_eq!(e.state(id(1)), Some(TriState::Checked));
}

#[test]
fn unchecking_a_child_demotes_parent_and_drops_its_apis() {
    let mut e = engine(role_catalog());
    e.toggle(id(1), true);
    let outcome = e.toggle(id(3), false);

    assert_eq!(outcome.deselected().collect::<Vec<_>>(), ids(&[1, 3, 11, 13]));
    assert_eq!(e.state(id(1)), Some(TriState::Indeterminate));
    assert!(e.is_selected(id(10)));
}

#[test]
fn cascade_reaches_every_descendant() {
    let mut e = engine(role_catalog());
    e.toggle(id(4), true);
    for raw in [4, 5, 6, 12] {
        assert!(e.is_selected(id(raw)), "{raw} should be selected");
    }
    assert_eq!(e.state(id(5)), Some(TriState::Checked));

    e.toggle(id(4), false);
    for raw in [4, 5, 6, 12] {
        assert!(!e.is_selected(id(raw)), "{raw} should be cleared");
    }
    assert_eq!(e.state(id(5)), Some(TriState::Unchecked));
}

#[test]
fn deep_leaf_propagates_to_root() {
    let mut e = engine(role_catalog());
    e.toggle(id(6), true);
    // single-child chain: every ancestor becomes fully checked
    assert_eq!(e.state(id(5)), Some(TriState::Checked));
    assert_eq!(e.state(id(4)), Some(TriState::Checked));
}

#[test]
fn set_all_selects_every_menu_and_associated_api() {
    let mut e = engine(role_catalog());
    e.set_all(true);
    assert_eq!(e.selected_ids(), ids(&[1, 2, 3, 4, 5, 6, 10, 11, 12, 13]));

    let outcome = e.set_all(false);
    assert_eq!(outcome.len(), 10);
    assert!(e.selected_ids().is_empty());
}

#[test]
fn unassociated_api_is_managed_directly() {
    let mut e = engine(role_catalog());
    e.set_all(true);
    assert!(!e.is_selected(id(14)));

    let outcome = e.toggle_api(id(14), true);
    assert_eq!(outcome.selected().collect::<Vec<_>>(), ids(&[14]));

    // menu toggles never touch it
    e.set_all(false);
    assert!(e.is_selected(id(14)));
}

#[test]
fn associated_api_follows_its_menu() {
    let mut e = engine(vec![
        Permission::menu(1, "menu:a"),
        Permission::api(10, "api:a:list"),
    ]);
    e.toggle(id(1), true);

    assert!(e.toggle_api(id(10), false).is_empty());
    assert!(e.is_selected(id(10)));

    e.toggle(id(1), false);
    assert!(e.toggle_api(id(10), true).is_empty());
    assert!(!e.is_selected(id(10)));
}

#[test]
fn permissions_reflect_engine_state() {
    let mut e = engine(role_catalog());
    e.toggle(id(2), true);
    let selected: Vec<u64> = e
        .permissions()
        .iter()
        .filter(|p| p.selected)
        .map(|p| p.id.get())
        .collect();
    assert_eq!(selected, vec![2, 10]);
}

#[test]
fn outcome_serializes_for_the_ui() {
    let mut e = engine(role_catalog());
    let outcome = e.toggle(id(3), true);
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["changes"][0]["id"], 3);
    assert_eq!(json["changes"][0]["kind"], "menu");
    assert_eq!(json["changes"][1]["id"], 11);
    assert_eq!(json["changes"][1]["selected"], true);
}

fn shared_api_engine() -> SelectionEngine {
    let catalog = vec![
        Permission::menu(1, "menu:alerts"),
        Permission::menu(2, "menu:reports"),
        Permission::api(10, "api:shared:export"),
    ];
    let forest = MenuForest::build(&catalog, &ForestConfig::default());
    let mut map = AssociationMap::new();
    map.link(id(10), id(1), MatchTier::Heuristic);
    map.link(id(10), id(2), MatchTier::Heuristic);
    SelectionEngine::from_parts(catalog, forest, map)
}

#[test]
fn shared_api_survives_while_any_menu_is_checked() {
    let mut e = shared_api_engine();

    e.toggle(id(1), true);
    assert!(e.is_selected(id(10)));

    // m2 off while m1 still on
    let outcome = e.toggle(id(2), false);
    assert!(outcome.is_empty());
    assert!(e.is_selected(id(10)));

    e.toggle(id(2), true);
    e.toggle(id(2), false);
    assert!(e.is_selected(id(10)));

    let outcome = e.toggle(id(1), false);
    assert_eq!(outcome.deselected().collect::<Vec<_>>(), ids(&[1, 10]));
    assert!(!e.is_selected(id(10)));
}

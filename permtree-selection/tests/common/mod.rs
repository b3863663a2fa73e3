//! Shared fixtures for selection tests.

#![allow(dead_code)]

use permtree_selection::SelectionEngine;
use permtree_types::{Permission, PermissionId, PermtreeConfig};

pub fn id(raw: u64) -> PermissionId {
    PermissionId::new(raw)
}

pub fn ids(raw: &[u64]) -> Vec<PermissionId> {
    raw.iter().copied().map(PermissionId::new).collect()
}

/// Two menu trees with apis placed by path:
///
/// ```text
/// 1 nodes            13 api:nodes:summary
/// ├── 2 backends     10 api:nodes:backends:list
/// └── 3 frontends    11 api:nodes:frontends:list
/// 4 clusters
/// └── 5 overview
///     └── 6 sql      12 api:clusters:overview:sql:top
/// 14 api:audit:export (matches no menu)
/// ```
pub fn role_catalog() -> Vec<Permission> {
    vec![
        Permission::menu(1, "menu:nodes").with_name("Nodes"),
        Permission::menu(2, "menu:nodes:backends").with_name("Backends"),
        Permission::menu(3, "menu:nodes:frontends").with_name("Frontends"),
        Permission::menu(4, "menu:clusters").with_name("Clusters"),
        Permission::menu(5, "menu:clusters:overview").with_name("Overview"),
        Permission::menu(6, "menu:clusters:overview:sql").with_name("Slow SQL"),
        Permission::api(10, "api:nodes:backends:list"),
        Permission::api(11, "api:nodes:frontends:list"),
        Permission::api(12, "api:clusters:overview:sql:top"),
        Permission::api(13, "api:nodes:summary"),
        Permission::api(14, "api:audit:export"),
    ]
}

/// `role_catalog` with the given ids marked as persisted selections.
pub fn persisted(selected: &[u64]) -> Vec<Permission> {
    role_catalog()
        .into_iter()
        .map(|p| {
            let on = selected.contains(&p.id.get());
            p.with_selected(on)
        })
        .collect()
}

pub fn engine(catalog: Vec<Permission>) -> SelectionEngine {
    SelectionEngine::new(catalog, &PermtreeConfig::default())
}

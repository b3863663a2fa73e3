//! Shared catalog fixtures for forest tests.

#![allow(dead_code)]

use permtree_types::Permission;

/// A small console catalog mixing explicit `parent_id` links and
/// path-derived parents.
pub fn console_catalog() -> Vec<Permission> {
    vec![
        Permission::menu(1, "menu:dashboard").with_name("Dashboard"),
        Permission::menu(2, "menu:nodes").with_name("Nodes"),
        Permission::menu(3, "menu:nodes:backends").with_name("Backends").with_parent(2),
        Permission::menu(4, "menu:nodes:frontends").with_name("Frontends"),
        Permission::api(5, "api:nodes:backends:list").with_parent(3),
        Permission::menu(6, "menu:clusters").with_name("Clusters"),
        Permission::menu(7, "menu:clusters:overview").with_name("Overview"),
        Permission::menu(8, "menu:clusters:overview:sql").with_name("Slow SQL"),
        Permission::api(9, "api:clusters:list"),
    ]
}

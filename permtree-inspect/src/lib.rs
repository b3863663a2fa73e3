//! Catalog loading and text rendering for the `permtree-inspect` binary.

use anyhow::{Context, Result};
use permtree_assoc::AssociationMap;
use permtree_guard::Decision;
use permtree_selection::{SelectionChange, SelectionEngine, SelectionOutcome, TriState};
use permtree_types::{parse_catalog, Permission, PermissionId, PermtreeConfig};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

/// Reads a JSON array of permission records.
pub fn load_catalog(path: &Path) -> Result<Vec<Permission>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog = parse_catalog(&contents)
        .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
    info!(
        "Loaded {} permissions ({} menus) from {}",
        catalog.len(),
        catalog.iter().filter(|p| p.is_menu()).count(),
        path.display()
    );
    Ok(catalog)
}

/// Configuration from `path`, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> PermtreeConfig {
    path.map(PermtreeConfig::load_from).unwrap_or_default()
}

fn marker(state: TriState) -> &'static str {
    match state {
        TriState::Checked => "[x]",
        TriState::Unchecked => "[ ]",
        TriState::Indeterminate => "[-]",
    }
}

fn label(perm: &Permission) -> &str {
    if perm.name.is_empty() { &perm.code } else { &perm.name }
}

/// Indented menu tree with tri-state markers. Each menu lists its
/// associated apis beneath it.
pub fn render_tree(engine: &SelectionEngine) -> String {
    let permissions = engine.permissions();
    let by_id: HashMap<PermissionId, &Permission> =
        permissions.iter().map(|p| (p.id, p)).collect();
    let forest = engine.forest();
    let mut out = String::new();

    for root in forest.roots() {
        for idx in forest.descendants(*root) {
            let node = forest.node(idx);
            let indent = "    ".repeat(forest.depth(idx));
            let name = by_id.get(&node.id()).map_or(node.code(), |p| label(p));
            let _ = writeln!(out, "{indent}{} {name} ({}) #{}", marker(node.state()), node.code(), node.id());
            for api in engine.associations().apis_for(node.id()) {
                let Some(perm) = by_id.get(&api) else { continue };
                let mark = if perm.selected { "[x]" } else { "[ ]" };
                let _ = writeln!(out, "{indent}    · {mark} {} #{}", perm.code, api);
            }
        }
    }
    out
}

/// One line per associated api with its menus and match tier, followed by
/// the unassociated apis.
pub fn render_associations(
    catalog: &[Permission],
    map: &AssociationMap,
    low_confidence_only: bool,
) -> String {
    let codes: HashMap<PermissionId, &str> = catalog.iter().map(|p| (p.id, p.code.as_str())).collect();
    let code_of = |id: PermissionId| codes.get(&id).copied().unwrap_or("?");
    let mut out = String::new();

    for api in catalog.iter().filter(|p| p.is_api()) {
        let Some(tier) = map.tier(api.id) else { continue };
        if low_confidence_only && tier.is_exact() {
            continue;
        }
        let menus: Vec<&str> = map.menus_for(api.id).map(code_of).collect();
        let _ = writeln!(out, "{} -> {} [{tier}]", api.code, menus.join(", "));
    }

    if !map.unassociated().is_empty() {
        out.push_str("unassociated:\n");
        for id in map.unassociated() {
            let _ = writeln!(out, "  {}", code_of(*id));
        }
    }
    out
}

/// Machine-readable result of a `select` run.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub selected: Vec<PermissionId>,
    pub changes: SelectionOutcome,
}

impl SelectionReport {
    pub fn new(engine: &SelectionEngine, changes: SelectionOutcome) -> Self {
        Self {
            selected: engine.selected_ids(),
            changes,
        }
    }
}

/// Changes between `before` and the engine's current state, so toggles that
/// cancel each other out are not reported.
pub fn net_changes(before: &[Permission], engine: &SelectionEngine) -> SelectionOutcome {
    let changes = before
        .iter()
        .zip(engine.permissions())
        .filter(|(old, new)| old.selected != new.selected)
        .map(|(_, new)| SelectionChange {
            id: new.id,
            kind: new.kind,
            selected: new.selected,
        })
        .collect();
    SelectionOutcome { changes }
}

/// `+code` / `-code` lines for each change and a summary line.
pub fn render_selection(engine: &SelectionEngine, outcome: &SelectionOutcome) -> String {
    let permissions = engine.permissions();
    let codes: HashMap<PermissionId, &str> =
        permissions.iter().map(|p| (p.id, p.code.as_str())).collect();
    let mut out = String::new();
    for change in &outcome.changes {
        let sign = if change.selected { '+' } else { '-' };
        let code = codes.get(&change.id).copied().unwrap_or("?");
        let _ = writeln!(out, "{sign} {code} ({})", change.kind);
    }
    let _ = writeln!(
        out,
        "{} of {} permissions selected",
        engine.selected_ids().len(),
        permissions.len()
    );
    out
}

pub fn render_decision(code: &str, action: Option<&str>, decision: Decision) -> String {
    match action {
        Some(action) => format!("{code} [{action}]: {decision}"),
        None => format!("{code}: {decision}"),
    }
}

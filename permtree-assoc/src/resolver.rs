use crate::map::{AssociationMap, MatchTier};
use permtree_types::code::{strip_kind, SEPARATOR};
use permtree_types::{AssociationConfig, Permission, PermissionId};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Infers which menu permissions each api permission belongs to.
#[derive(Debug, Clone, Default)]
pub struct AssociationResolver {
    config: AssociationConfig,
}

/// A menu record prepared for matching.
struct MenuPath<'a> {
    id: PermissionId,
    code: &'a str,
    path: &'a str,
    segments: Vec<&'a str>,
}

impl AssociationResolver {
    pub fn new(config: AssociationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssociationConfig {
        &self.config
    }

    /// Resolves associations for every `api` record in the catalog.
    pub fn resolve(&self, catalog: &[Permission]) -> AssociationMap {
        let menu_ids: HashSet<PermissionId> =
            catalog.iter().filter(|p| p.is_menu()).map(|p| p.id).collect();
        let menus: Vec<MenuPath<'_>> = catalog
            .iter()
            .filter(|p| p.is_menu())
            .filter_map(|p| {
                derived_path(p).map(|path| MenuPath {
                    id: p.id,
                    code: &p.code,
                    path,
                    segments: path.split(SEPARATOR).collect(),
                })
            })
            .collect();

        let mut map = AssociationMap::new();
        for api in catalog.iter().filter(|p| p.is_api()) {
            match self.candidates(api, &menu_ids, &menus) {
                Some((tier, matched)) => {
                    if tier.is_exact() {
                        debug!(api = %api.code, %tier, menus = ?matched, "associated api permission");
                    } else {
                        info!(api = %api.code, %tier, menus = ?matched, "low-confidence api association");
                    }
                    for menu in matched {
                        map.link(api.id, menu, tier);
                    }
                }
                None => {
                    warn!(api = %api.code, id = %api.id, "api permission matches no menu, leaving unassociated");
                    map.mark_unassociated(api.id);
                }
            }
        }
        map
    }

    fn candidates(
        &self,
        api: &Permission,
        menu_ids: &HashSet<PermissionId>,
        menus: &[MenuPath<'_>],
    ) -> Option<(MatchTier, Vec<PermissionId>)> {
        if let Some(parent) = api.parent_id.filter(|pid| menu_ids.contains(pid)) {
            return Some((MatchTier::ExplicitParent, vec![parent]));
        }

        if let Some(api_path) = derived_path(api) {
            let matched = path_prefix_matches(api_path, menus);
            if !matched.is_empty() {
                return Some((MatchTier::PathPrefix, matched));
            }

            if self.config.heuristic {
                let matched = self.heuristic_matches(api_path, menus);
                if !matched.is_empty() {
                    return Some((MatchTier::Heuristic, matched));
                }
            }
        }

        if self.config.resource_fallback {
            if let Some(resource) = api.resource() {
                let matched: Vec<PermissionId> = menus
                    .iter()
                    .filter(|m| resource.contains(m.path) || m.path.contains(resource))
                    .map(|m| m.id)
                    .collect();
                if !matched.is_empty() {
                    return Some((MatchTier::ResourceFallback, matched));
                }
            }
        }

        None
    }

    fn heuristic_matches(&self, api_path: &str, menus: &[MenuPath<'_>]) -> Vec<PermissionId> {
        let api_segments: Vec<&str> = api_path.split(SEPARATOR).collect();
        let mut best_score = 0;
        let mut best: Vec<&MenuPath<'_>> = Vec::new();
        for menu in menus {
            let score = self.score(&api_segments, &menu.segments);
            if score == 0 || score < best_score {
                continue;
            }
            if score > best_score {
                best_score = score;
                best.clear();
            }
            best.push(menu);
        }
        if !best.is_empty() {
            let codes: Vec<&str> = best.iter().map(|m| m.code).collect();
            debug!(api_path, score = best_score, menus = ?codes, "heuristic winners");
        }
        best.iter().map(|m| m.id).collect()
    }

    /// Weighted segment overlap between an api path and a menu path.
    pub fn score(&self, api_segments: &[&str], menu_segments: &[&str]) -> u32 {
        let mut score = 0;
        if menu_segments.iter().all(|s| api_segments.contains(s)) {
            score += self.config.weight_all_segments;
        }
        if api_segments.first() == menu_segments.first() {
            score += self.config.weight_first_segment;
        }
        if api_segments.last() == menu_segments.last() {
            score += self.config.weight_last_segment;
        }
        if menu_segments.last().is_some_and(|last| api_segments.contains(last)) {
            score += self.config.weight_last_member;
        }
        score
    }
}

/// The code minus its kind segment, or the resource when that is empty.
fn derived_path(perm: &Permission) -> Option<&str> {
    let path = strip_kind(&perm.code);
    if path.is_empty() {
        perm.resource()
    } else {
        Some(path)
    }
}

/// Menus whose path equals or is a segment-prefix of the api path, keeping
/// only the longest (most specific) menu path.
fn path_prefix_matches(api_path: &str, menus: &[MenuPath<'_>]) -> Vec<PermissionId> {
    let mut best_len = 0;
    let mut best = Vec::new();
    for menu in menus {
        let contained = api_path == menu.path
            || api_path
                .strip_prefix(menu.path)
                .is_some_and(|rest| rest.starts_with(SEPARATOR));
        if !contained || menu.path.len() < best_len {
            continue;
        }
        if menu.path.len() > best_len {
            best_len = menu.path.len();
            best.clear();
        }
        best.push(menu.id);
    }
    best
}

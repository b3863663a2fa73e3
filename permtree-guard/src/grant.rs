use permtree_types::Permission;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One granted code, optionally restricted to a single action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grant {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl Grant {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            action: None,
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// The action restriction, treating an empty string as none.
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref().map(str::trim).filter(|a| !a.is_empty())
    }
}

impl From<&Permission> for Grant {
    fn from(perm: &Permission) -> Self {
        Self {
            code: perm.code.clone(),
            action: perm.action().map(str::to_owned),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct CodeGrants {
    /// Some grant for this code carries no action.
    unrestricted: bool,
    actions: HashSet<String>,
}

/// A user's grants indexed by code.
#[derive(Debug, Clone, Default)]
pub struct GrantSet {
    by_code: HashMap<String, CodeGrants>,
}

impl GrantSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record of an already-filtered catalog becomes a grant.
    pub fn from_permissions(permissions: &[Permission]) -> Self {
        permissions.iter().map(Grant::from).collect()
    }

    /// Only records flagged `selected`, as produced by a role editor.
    pub fn from_selected(permissions: &[Permission]) -> Self {
        permissions
            .iter()
            .filter(|p| p.selected)
            .map(Grant::from)
            .collect()
    }

    pub fn insert(&mut self, grant: Grant) {
        let action = grant.action().map(str::to_owned);
        let entry = self.by_code.entry(grant.code.trim().to_owned()).or_default();
        match action {
            Some(action) => {
                entry.actions.insert(action);
            }
            None => entry.unrestricted = true,
        }
    }

    /// True when a grant for `code` exists and, if `action` is given, the
    /// grant either names that action or names none.
    pub fn matches(&self, code: &str, action: Option<&str>) -> bool {
        let Some(grants) = self.by_code.get(code) else {
            return false;
        };
        match action {
            None => true,
            Some(action) => grants.unrestricted || grants.actions.contains(action),
        }
    }

    /// Number of distinct granted codes.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

impl FromIterator<Grant> for GrantSet {
    fn from_iter<T: IntoIterator<Item = Grant>>(iter: T) -> Self {
        let mut set = Self::new();
        for grant in iter {
            set.insert(grant);
        }
        set
    }
}

impl Extend<Grant> for GrantSet {
    fn extend<T: IntoIterator<Item = Grant>>(&mut self, iter: T) {
        for grant in iter {
            self.insert(grant);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_action_is_unrestricted() {
        let set: GrantSet = [Grant::new("api:nodes").with_action("  ")].into_iter().collect();
        assert!(set.matches("api:nodes", Some("delete")));
    }

    #[test]
    fn restricted_grant_only_matches_its_actions() {
        let set: GrantSet = [
            Grant::new("api:nodes").with_action("list"),
            Grant::new("api:nodes").with_action("get"),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 1);
        assert!(set.matches("api:nodes", Some("get")));
        assert!(!set.matches("api:nodes", Some("delete")));
        assert!(set.matches("api:nodes", None));
    }

    #[test]
    fn from_selected_skips_unselected_records() {
        let perms = vec![
            Permission::menu(1, "menu:nodes").with_selected(true),
            Permission::api(2, "api:nodes").with_action("list"),
        ];
        let set = GrantSet::from_selected(&perms);
        assert!(set.matches("menu:nodes", None));
        assert!(!set.matches("api:nodes", None));
        assert_eq!(GrantSet::from_permissions(&perms).len(), 2);
    }
}

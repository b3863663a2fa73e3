use crate::grant::GrantSet;
use permtree_types::code::{segment_count, split_action};
use permtree_types::{GuardConfig, MalformedPolicy};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Why a query was allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowReason {
    SuperAdmin,
    Exact,
    /// The last code segment was read as the action.
    LegacyFallback,
    /// The code had fewer than two segments and policy lets it through.
    Malformed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow(AllowReason),
    Deny,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow(AllowReason::SuperAdmin) => f.write_str("allow (super-admin)"),
            Self::Allow(AllowReason::Exact) => f.write_str("allow (exact)"),
            Self::Allow(AllowReason::LegacyFallback) => f.write_str("allow (legacy fallback)"),
            Self::Allow(AllowReason::Malformed) => f.write_str("allow (malformed code)"),
            Self::Deny => f.write_str("deny"),
        }
    }
}

/// Checks `(code, action)` queries against one user's grants.
#[derive(Debug, Clone, Default)]
pub struct RuntimeEvaluator {
    grants: GrantSet,
    super_admin: bool,
    config: GuardConfig,
}

impl RuntimeEvaluator {
    pub fn new(grants: GrantSet, super_admin: bool, config: GuardConfig) -> Self {
        Self {
            grants,
            super_admin,
            config,
        }
    }

    pub fn grants(&self) -> &GrantSet {
        &self.grants
    }

    pub fn is_super_admin(&self) -> bool {
        self.super_admin
    }

    /// Evaluates a query. Rules are tried in order: super-admin bypass, exact
    /// grant, legacy `base:action` split, malformed-code policy, deny.
    pub fn decide(&self, code: &str, action: Option<&str>) -> Decision {
        if self.super_admin {
            return Decision::Allow(AllowReason::SuperAdmin);
        }

        let code = code.trim();
        let action = action.map(str::trim).filter(|a| !a.is_empty());

        if self.grants.matches(code, action) {
            return Decision::Allow(AllowReason::Exact);
        }

        let segments = segment_count(code);
        if self.config.legacy_fallback && action.is_none() && segments >= 3 {
            if let Some((base, implied)) = split_action(code) {
                if self.grants.matches(base, Some(implied)) {
                    debug!(code, base, action = implied, "allowed by legacy action fallback");
                    return Decision::Allow(AllowReason::LegacyFallback);
                }
            }
        }

        if segments < 2 {
            return match self.config.malformed {
                MalformedPolicy::Allow => {
                    warn!(code, "permission code has fewer than two segments, allowing");
                    Decision::Allow(AllowReason::Malformed)
                }
                MalformedPolicy::Deny => {
                    warn!(code, "permission code has fewer than two segments, denying");
                    Decision::Deny
                }
            };
        }

        Decision::Deny
    }

    pub fn check(&self, code: &str, action: Option<&str>) -> bool {
        self.decide(code, action).is_allowed()
    }

    /// True when at least one query is allowed.
    pub fn check_any<'a, I>(&self, queries: I) -> bool
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        queries.into_iter().any(|(code, action)| self.check(code, action))
    }

    /// True when every query is allowed. An empty query list is allowed.
    pub fn check_all<'a, I>(&self, queries: I) -> bool
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        queries.into_iter().all(|(code, action)| self.check(code, action))
    }
}

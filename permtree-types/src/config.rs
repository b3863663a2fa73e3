//! Configuration for the permtree components, read from a TOML file such as
//! `permtree.toml`:
//!
//! ```toml
//! [forest]
//! sibling_order = "name"
//!
//! [association]
//! heuristic = true
//! resource_fallback = false
//!
//! [guard]
//! legacy_fallback = true
//! malformed = "deny"
//! ```
//!
//! Every section and key is optional. A missing file, an unreadable file, or
//! a file that fails to parse all fall back to [`PermtreeConfig::default`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Sibling ordering inside the menu forest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiblingOrder {
    #[default]
    /// Original catalog order.
    Catalog,
    /// Display name, ties broken by catalog order.
    Name,
}

/// What the runtime evaluator answers for a code with fewer than two segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    #[default]
    /// Allow and log a warning.
    Allow,
    /// Deny like any other unmatched query.
    Deny,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestConfig {
    #[serde(default)]
    pub sibling_order: SiblingOrder,
}

/// Controls the low-confidence association tiers and heuristic weights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationConfig {
    #[serde(default = "default_true")]
    pub heuristic: bool,
    #[serde(default = "default_true")]
    pub resource_fallback: bool,
    #[serde(default = "default_weight_all_segments")]
    pub weight_all_segments: u32,
    #[serde(default = "default_weight_first_segment")]
    pub weight_first_segment: u32,
    #[serde(default = "default_weight_last_segment")]
    pub weight_last_segment: u32,
    #[serde(default = "default_weight_last_member")]
    pub weight_last_member: u32,
}

fn default_true() -> bool {
    true
}

fn default_weight_all_segments() -> u32 {
    8
}

fn default_weight_first_segment() -> u32 {
    4
}

fn default_weight_last_segment() -> u32 {
    2
}

fn default_weight_last_member() -> u32 {
    1
}

impl Default for AssociationConfig {
    fn default() -> Self {
        Self {
            heuristic: true,
            resource_fallback: true,
            weight_all_segments: default_weight_all_segments(),
            weight_first_segment: default_weight_first_segment(),
            weight_last_segment: default_weight_last_segment(),
            weight_last_member: default_weight_last_member(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    #[serde(default = "default_true")]
    pub legacy_fallback: bool,
    #[serde(default)]
    pub malformed: MalformedPolicy,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            legacy_fallback: true,
            malformed: MalformedPolicy::Allow,
        }
    }
}

/// Top-level configuration, one section per component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermtreeConfig {
    #[serde(default)]
    pub forest: ForestConfig,
    #[serde(default)]
    pub association: AssociationConfig,
    #[serde(default)]
    pub guard: GuardConfig,
}

impl PermtreeConfig {
    /// Parses a config from TOML text.
    pub fn from_toml_str(contents: &str) -> crate::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses a config file, reporting read and parse failures.
    pub fn read_from(path: impl AsRef<Path>) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads config from an explicit path.
    /// Falls back to defaults with a warning on read or parse errors.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::read_from(path) {
            Ok(config) => {
                info!("Loaded permtree config from {:?}", path);
                config
            }
            Err(e) => {
                warn!(
                    "Failed to load config file {:?}: {}. Falling back to defaults.",
                    path, e
                );
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn with_forest(mut self, forest: ForestConfig) -> Self {
        self.forest = forest;
        self
    }

    #[must_use]
    pub fn with_association(mut self, association: AssociationConfig) -> Self {
        self.association = association;
        self
    }

    #[must_use]
    pub fn with_guard(mut self, guard: GuardConfig) -> Self {
        self.guard = guard;
        self
    }
}

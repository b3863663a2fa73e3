//! Core type definitions for permtree.
//!
//! This crate defines the types shared by every permtree component:
//! - [`Permission`] records as supplied by the backend catalog
//! - [`PermissionId`] and [`PermissionKind`] (`menu` / `api`)
//! - Colon-delimited code-path helpers in [`code`]
//! - [`PermtreeConfig`], the TOML-backed configuration for the forest,
//!   association and guard components
//!
//! Tree construction, association, selection and runtime evaluation live in
//! their own crates and depend on this one.

pub mod code;
pub mod config;
mod ids;
mod permission;

pub use config::{
    AssociationConfig, ForestConfig, GuardConfig, MalformedPolicy, PermtreeConfig, SiblingOrder,
};
pub use ids::PermissionId;
pub use permission::{Permission, PermissionKind};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading catalogs or configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses a permission catalog from a JSON array.
pub fn parse_catalog(json: &str) -> Result<Vec<Permission>> {
    Ok(serde_json::from_str(json)?)
}

use crate::PermissionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind discriminator of a catalog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionKind {
    /// A navigable section; becomes a node in the menu forest.
    Menu,
    /// A backend-enforced action; associated with the menus that need it.
    Api,
}

impl PermissionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Api => "api",
        }
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A permission record as supplied by the backend catalog.
///
/// Only `id`, `code` and `type` are required on the wire. The remaining
/// fields default to empty / unset / false. `resource` and `action` holding an
/// empty string are treated as unset by the accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PermissionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, alias = "parentId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<PermissionId>,
    #[serde(default)]
    pub selected: bool,
}

impl Permission {
    /// Creates a record with only the required fields set.
    pub fn new(id: impl Into<PermissionId>, code: impl Into<String>, kind: PermissionKind) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: String::new(),
            kind,
            resource: None,
            action: None,
            parent_id: None,
            selected: false,
        }
    }

    /// Shorthand for a `menu` record.
    pub fn menu(id: impl Into<PermissionId>, code: impl Into<String>) -> Self {
        Self::new(id, code, PermissionKind::Menu)
    }

    /// Shorthand for an `api` record.
    pub fn api(id: impl Into<PermissionId>, code: impl Into<String>) -> Self {
        Self::new(id, code, PermissionKind::Api)
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<PermissionId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    #[must_use]
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn is_menu(&self) -> bool {
        self.kind == PermissionKind::Menu
    }

    pub fn is_api(&self) -> bool {
        self.kind == PermissionKind::Api
    }

    /// Returns the resource, treating an empty string as unset.
    pub fn resource(&self) -> Option<&str> {
        non_empty(self.resource.as_deref())
    }

    /// Returns the action qualifier, treating an empty string as unset.
    pub fn action(&self) -> Option<&str> {
        non_empty(self.action.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

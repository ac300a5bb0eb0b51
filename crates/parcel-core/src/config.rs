//! Registry configuration.

use serde::{Deserialize, Serialize};

/// What `ClassRegistry` does when a qualified name is registered twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the first registration and return `RegistryError::AlreadyRegistered`.
    #[default]
    Reject,
    /// Last registration wins.
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub on_duplicate: DuplicatePolicy,

    /// Reject malformed qualified names at registration time.
    pub validate_names: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            on_duplicate: DuplicatePolicy::Reject,
            validate_names: true,
        }
    }
}

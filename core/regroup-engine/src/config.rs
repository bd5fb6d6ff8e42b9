//! FILENAME: core/regroup-engine/src/config.rs
//! Regroup configuration - how strictly upstream sequencing is checked.

use serde::{Deserialize, Serialize};

/// Settings for a [`Regrouper`](crate::Regrouper).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegroupConfig {
    /// Panic when a spare group (one appended past the previous group list)
    /// would start with a column that carries a series identity. When off, the
    /// mismatch is logged and regrouping continues.
    pub strict_sequencing: bool,
}

impl RegroupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict_sequencing(mut self, strict: bool) -> Self {
        self.strict_sequencing = strict;
        self
    }
}

impl Default for RegroupConfig {
    fn default() -> Self {
        RegroupConfig {
            strict_sequencing: cfg!(debug_assertions),
        }
    }
}

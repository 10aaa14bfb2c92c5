//! Compiler configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What to do with a condition whose operator has no clause mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedPolicy {
    /// Abort the compile with `UnsupportedOperator`.
    #[default]
    Fail,
    /// Drop the condition and log a warning.
    Skip,
}

impl fmt::Display for UnsupportedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedPolicy::Fail => write!(f, "fail"),
            UnsupportedPolicy::Skip => write!(f, "skip"),
        }
    }
}

impl FromStr for UnsupportedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(UnsupportedPolicy::Fail),
            "skip" => Ok(UnsupportedPolicy::Skip),
            _ => Err(format!("unknown unsupported-operator policy: {}", s)),
        }
    }
}

/// Options for [`QueryCompiler`](crate::QueryCompiler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Maximum nesting depth of condition groups (default: 32).
    /// The top-level group is depth 1.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Handling of unmapped operators (default: `fail`).
    #[serde(default)]
    pub on_unsupported: UnsupportedPolicy,
}

fn default_max_depth() -> usize {
    32
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            on_unsupported: UnsupportedPolicy::default(),
        }
    }
}

impl CompileOptions {
    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the unsupported-operator policy.
    pub fn with_unsupported_policy(mut self, policy: UnsupportedPolicy) -> Self {
        self.on_unsupported = policy;
        self
    }
}

//! Executor configuration

use serde::Deserialize;

/// Defaults and limits applied while normalizing options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Value of `include_docs` when the request leaves it out.
    pub include_docs_by_default: bool,
    /// Upper bound on the length of an explicit `keys` list.
    pub max_requested_keys: Option<usize>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            include_docs_by_default: true,
            max_requested_keys: None,
        }
    }
}

impl ExecutorConfig {
    /// Config that omits documents unless asked for
    pub fn metadata_only() -> Self {
        Self {
            include_docs_by_default: false,
            ..Self::default()
        }
    }

    pub fn with_max_requested_keys(mut self, max: usize) -> Self {
        self.max_requested_keys = Some(max);
        self
    }
}

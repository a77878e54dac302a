//! Request size ceilings.

use serde::{Deserialize, Serialize};

/// Size limits enforced before any service logic runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_request")]
    pub max_request_bytes: usize,
    /// Maximum document content size in bytes.
    #[serde(default = "default_max_document")]
    pub max_document_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_bytes: default_max_request(),
            max_document_bytes: default_max_document(),
        }
    }
}

fn default_max_request() -> usize {
    2 * 1024 * 1024
}

fn default_max_document() -> usize {
    1024 * 1024
}

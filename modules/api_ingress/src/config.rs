use serde::{Deserialize, Serialize};

/// HTTP host configuration (`modules.api_ingress` section).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    pub bind_addr: String,
    #[serde(default)]
    pub enable_docs: bool,
    #[serde(default = "default_cors_enabled")]
    pub cors_enabled: bool,
    /// Maximum accepted request body, in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_string(),
            enable_docs: false,
            cors_enabled: default_cors_enabled(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

fn default_cors_enabled() -> bool {
    true
}

fn default_body_limit() -> usize {
    16 * 1024 * 1024
}

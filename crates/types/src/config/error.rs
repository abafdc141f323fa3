/// Error type for [`crate::AttackConfig`]. Captures errors related to loading
/// configuration from the environment or other sources.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error loading from environment variable
    #[error("missing or non-unicode environment variable: {0}")]
    Var(String),
    /// Error parsing a URL
    #[error("failed to parse url: {0}")]
    Url(#[from] url::ParseError),
    /// Error parsing hex from environment variable
    #[error("failed to parse hex: {0}")]
    Hex(#[from] alloy::primitives::hex::FromHexError),
    /// Error loading a signing key
    #[error("invalid signing key: {0}")]
    Key(#[from] alloy::signers::local::LocalSignerError),
}

impl ConfigError {
    /// Missing or non-unicode env var.
    pub fn missing(s: &str) -> Self {
        ConfigError::Var(s.to_string())
    }
}

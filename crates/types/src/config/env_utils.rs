//! Helpers for reading typed values from the process environment.

use crate::ConfigError;
use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use std::env;
use url::Url;

/// Load a variable from the environment
pub fn load_string(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::missing(key))
}

/// Load a variable from the environment
pub fn load_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

/// Load a variable from the environment
pub fn load_url(key: &str) -> Result<Url, ConfigError> {
    load_string(key)?.parse().map_err(Into::into)
}

/// Load a variable from the environment
pub fn load_url_opt(key: &str) -> Result<Option<Url>, ConfigError> {
    load_string_opt(key).map(|s| s.parse()).transpose().map_err(Into::into)
}

/// Load an optional base URL from the environment. A missing trailing slash
/// is added, so relative paths join beneath the URL's last segment.
pub fn load_base_url_opt(key: &str) -> Result<Option<Url>, ConfigError> {
    Ok(load_url_opt(key)?.map(with_trailing_slash))
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Load a variable from the environment
pub fn load_address(key: &str) -> Result<Address, ConfigError> {
    load_string(key)?.trim().parse().map_err(Into::into)
}

/// Load a private key from the environment. The `0x` prefix is optional.
pub fn load_signer(key: &str) -> Result<PrivateKeySigner, ConfigError> {
    parse_signer(&load_string(key)?)
}

/// Load an optional private key from the environment.
pub fn load_signer_opt(key: &str) -> Result<Option<PrivateKeySigner>, ConfigError> {
    load_string_opt(key).as_deref().map(parse_signer).transpose()
}

fn parse_signer(raw: &str) -> Result<PrivateKeySigner, ConfigError> {
    let raw = raw.trim();
    let hex = raw.strip_prefix("0x").unwrap_or(raw);
    hex.parse::<PrivateKeySigner>().map_err(Into::into)
}

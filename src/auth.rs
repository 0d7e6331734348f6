// ABOUTME: API token discovery with precedence chain
// ABOUTME: CLI flag → config file → env var

use crate::{Error, Result};
use std::env;

pub fn resolve_token(cli_token: Option<String>, config_token: Option<&str>) -> Result<String> {
    // 1. CLI flag
    if let Some(token) = cli_token {
        return Ok(token);
    }

    // 2. Config file
    if let Some(token) = config_token {
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }

    // 3. Environment variable
    if let Ok(token) = env::var("QUIP_API_TOKEN") {
        if !token.is_empty() {
            return Ok(token);
        }
    }

    Err(Error::Auth(
        "No API token found. Provide via --token, the config file, or QUIP_API_TOKEN".into(),
    ))
}

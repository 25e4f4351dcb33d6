//! Access token loading

use greg_core::GregError;
use std::path::Path;

pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Resolve the access token from exactly one of the raw flag or token file,
/// falling back to `env_token` when neither is given.
pub fn resolve_token(
    raw: Option<&str>,
    file: Option<&Path>,
    env_token: Option<String>,
) -> greg_core::Result<String> {
    match (raw, file) {
        (Some(_), Some(_)) => Err(GregError::Credentials(
            "only one of access token and access token file may be specified".to_string(),
        )),
        (Some(raw), None) => token_from_string(raw),
        (None, Some(file)) => token_from_file(file),
        (None, None) => match env_token {
            Some(token) => token_from_string(&token),
            None => Err(GregError::Credentials(format!(
                "must specify either access token or access token file (or set {})",
                TOKEN_ENV
            ))),
        },
    }
}

pub fn token_from_string(raw: &str) -> greg_core::Result<String> {
    let token = raw.trim();
    if token.is_empty() {
        return Err(GregError::Credentials(
            "access token cannot be empty".to_string(),
        ));
    }
    Ok(token.to_string())
}

pub fn token_from_file(path: &Path) -> greg_core::Result<String> {
    let content = std::fs::read_to_string(path)?;
    token_from_string(&content)
}

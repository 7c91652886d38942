use anyhow::{ensure, Context as _, Result};
use std::fmt::{Debug, Formatter};
use std::path::Path;

#[derive(Clone)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct AccessToken {
    access_token: String,
}

impl AccessToken {
    pub fn new(access_token: String) -> AccessToken {
        AccessToken { access_token }
    }

    /// Reads a personal access token from a file. Trailing whitespace, e.g. the newline an
    /// editor adds, is not part of the token.
    pub async fn load(path: &Path) -> Result<AccessToken> {
        log::info!("Loading API token from {}...", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read API token from {}", path.display()))?;
        let token = content.trim_end();
        ensure!(!token.is_empty(), "API token file {} is empty", path.display());
        log::info!("Loading API token...done");
        Ok(AccessToken::new(token.to_string()))
    }

    pub fn get(&self) -> &str {
        &self.access_token
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken(*****)")
    }
}

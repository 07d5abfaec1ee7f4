/// Fallback login when nothing identifies the target user.
pub const DEFAULT_LOGIN: &str = "octocat";

/// Resolved target user and API credential.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub login: String,
    /// Empty string when no credential is available.
    pub token: String,
}

impl Identity {
    /// Resolve the target user and credential from an explicit login and the
    /// environment.
    ///
    /// Login precedence: explicit value, `DINOGRAPH_USER`, `GITHUB_ACTOR`,
    /// `GITHUB_REPOSITORY_OWNER`, then [`DEFAULT_LOGIN`]. The token comes from
    /// `GITHUB_TOKEN` and defaults to the empty string.
    pub fn resolve(explicit_login: Option<&str>) -> Self {
        let login = explicit_login
            .map(str::to_owned)
            .or_else(|| env_non_empty("DINOGRAPH_USER"))
            .or_else(|| env_non_empty("GITHUB_ACTOR"))
            .or_else(|| env_non_empty("GITHUB_REPOSITORY_OWNER"))
            .unwrap_or_else(|| DEFAULT_LOGIN.to_owned());
        let token = env_non_empty("GITHUB_TOKEN").unwrap_or_default();
        Self { login, token }
    }

    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

//! Navigator configuration

use crate::guard::LOGIN_PATH;
use crate::routes::Revision;
use crate::session::SESSION_KEY;

/// Navigator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Redirect target for unauthenticated sessions
    pub login_path: String,
    /// Storage key of the session marker
    pub session_key: String,
    /// Redirect hops allowed in a single navigation
    pub max_redirects: usize,
    /// Route table revision to build
    pub revision: Revision,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            login_path: LOGIN_PATH.to_string(),
            session_key: SESSION_KEY.to_string(),
            max_redirects: 3,
            revision: Revision::default(),
        }
    }
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = key.into();
        self
    }

    pub fn max_redirects(mut self, hops: usize) -> Self {
        self.max_redirects = hops;
        self
    }

    pub fn revision(mut self, revision: Revision) -> Self {
        self.revision = revision;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.session_key, "identifier");
        assert_eq!(config.max_redirects, 3);
        assert_eq!(config.revision, Revision::Guarded);
    }

    #[test]
    fn test_builder() {
        let config = RouterConfig::new()
            .login_path("/")
            .session_key("token")
            .max_redirects(1)
            .revision(Revision::Views);
        assert_eq!(config.login_path, "/");
        assert_eq!(config.session_key, "token");
        assert_eq!(config.max_redirects, 1);
        assert_eq!(config.revision, Revision::Views);
    }
}

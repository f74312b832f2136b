//! Navigation guards
//!
//! A guard runs before a transition commits and either lets it through or
//! redirects it. Guards see the target route, the route being left, and an
//! [`AuthContext`] read from the session marker by the caller; they never
//! touch storage themselves.

use crate::route::RouteRecord;
use crate::table::ResolvedRoute;
use std::sync::Arc;

/// Where unauthenticated users are sent
pub const LOGIN_PATH: &str = "/login";

/// Outcome of a guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Commit the transition
    Proceed,
    /// Abandon it and navigate here instead
    RedirectTo(String),
}

impl NavigationAction {
    pub fn is_proceed(&self) -> bool {
        matches!(self, NavigationAction::Proceed)
    }
}

/// Authentication state of the current session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    identifier: Option<String>,
}

impl AuthContext {
    /// No session marker
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session marker present with this value
    pub fn authenticated(identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identifier.is_some()
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}

impl From<Option<String>> for AuthContext {
    fn from(identifier: Option<String>) -> Self {
        Self { identifier }
    }
}

/// True if any record in the chain requires authentication
pub fn requires_auth(chain: &[Arc<RouteRecord>]) -> bool {
    chain.iter().any(|record| record.meta.requires_auth)
}

/// Authentication check with the default login path
///
/// # Example
/// ```
/// use wasaphoto_core::{decide, AuthContext, NavigationAction, Revision, RouteTable};
///
/// let table = RouteTable::for_revision(Revision::Guarded).unwrap();
/// let stream = table.resolve("/stream").unwrap();
///
/// assert_eq!(
///     decide(stream.matched(), None, &AuthContext::anonymous()),
///     NavigationAction::RedirectTo("/login".to_string())
/// );
/// assert_eq!(
///     decide(stream.matched(), None, &AuthContext::authenticated("7")),
///     NavigationAction::Proceed
/// );
/// ```
pub fn decide(
    target: &[Arc<RouteRecord>],
    current: Option<&ResolvedRoute>,
    auth: &AuthContext,
) -> NavigationAction {
    AuthGuard::default().decide(target, current, auth)
}

/// Guard trait - inspect a pending transition
pub trait NavigationGuard: Send + Sync {
    /// Decide whether `to` may be entered from `from`
    fn check(
        &self,
        to: &ResolvedRoute,
        from: Option<&ResolvedRoute>,
        auth: &AuthContext,
    ) -> NavigationAction;
}

/// Redirects unauthenticated sessions away from protected routes
#[derive(Debug, Clone)]
pub struct AuthGuard {
    login_path: String,
}

impl AuthGuard {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Decide on a matched record chain
    pub fn decide(
        &self,
        target: &[Arc<RouteRecord>],
        _current: Option<&ResolvedRoute>,
        auth: &AuthContext,
    ) -> NavigationAction {
        let protected = requires_auth(target);
        let authenticated = auth.is_authenticated();

        let action = if protected && !authenticated {
            NavigationAction::RedirectTo(self.login_path.clone())
        } else {
            NavigationAction::Proceed
        };

        tracing::debug!(protected, authenticated, ?action, "auth guard");
        action
    }
}

impl Default for AuthGuard {
    fn default() -> Self {
        Self::new(LOGIN_PATH)
    }
}

impl NavigationGuard for AuthGuard {
    fn check(
        &self,
        to: &ResolvedRoute,
        from: Option<&ResolvedRoute>,
        auth: &AuthContext,
    ) -> NavigationAction {
        self.decide(to.matched(), from, auth)
    }
}

/// Guard built from a closure
pub struct FnGuard<F>(F);

/// Wrap a closure as a guard
pub fn guard_fn<F>(f: F) -> FnGuard<F>
where
    F: Fn(&ResolvedRoute, Option<&ResolvedRoute>, &AuthContext) -> NavigationAction + Send + Sync,
{
    FnGuard(f)
}

impl<F> NavigationGuard for FnGuard<F>
where
    F: Fn(&ResolvedRoute, Option<&ResolvedRoute>, &AuthContext) -> NavigationAction + Send + Sync,
{
    fn check(
        &self,
        to: &ResolvedRoute,
        from: Option<&ResolvedRoute>,
        auth: &AuthContext,
    ) -> NavigationAction {
        (self.0)(to, from, auth)
    }
}

/// Guards run in registration order
pub struct GuardChain {
    guards: Vec<Box<dyn NavigationGuard>>,
}

impl GuardChain {
    pub fn new() -> Self {
        Self { guards: Vec::new() }
    }

    pub fn add<G: NavigationGuard + 'static>(&mut self, guard: G) {
        self.guards.push(Box::new(guard));
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Run every guard, the first redirect wins
    pub fn run(
        &self,
        to: &ResolvedRoute,
        from: Option<&ResolvedRoute>,
        auth: &AuthContext,
    ) -> NavigationAction {
        for guard in &self.guards {
            if let action @ NavigationAction::RedirectTo(_) = guard.check(to, from, auth) {
                return action;
            }
        }
        NavigationAction::Proceed
    }
}

impl Default for GuardChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::Revision;
    use crate::table::RouteTable;

    fn table() -> RouteTable {
        RouteTable::for_revision(Revision::Guarded).unwrap()
    }

    fn redirect_login() -> NavigationAction {
        NavigationAction::RedirectTo("/login".to_string())
    }

    #[test]
    fn test_unprotected_routes_always_proceed() {
        let table = table();
        for path in ["/", "/login"] {
            let route = table.resolve(path).unwrap();
            assert!(!route.requires_auth());
            assert_eq!(
                decide(route.matched(), None, &AuthContext::anonymous()),
                NavigationAction::Proceed
            );
            assert_eq!(
                decide(route.matched(), None, &AuthContext::authenticated("1")),
                NavigationAction::Proceed
            );
        }
    }

    #[test]
    fn test_protected_routes_without_marker_redirect() {
        let table = table();
        for path in [
            "/stream",
            "/profile/42",
            "/search",
            "/settings",
            "/photos/3/comments",
        ] {
            let route = table.resolve(path).unwrap();
            assert_eq!(
                decide(route.matched(), None, &AuthContext::anonymous()),
                redirect_login(),
                "{}",
                path
            );
        }
    }

    #[test]
    fn test_protected_routes_with_marker_proceed() {
        let table = table();
        let auth = AuthContext::authenticated("42");
        for path in ["/stream", "/profile/42", "/search", "/settings/bans"] {
            let route = table.resolve(path).unwrap();
            let action = decide(route.matched(), None, &auth);
            assert_eq!(action, NavigationAction::Proceed, "{}", path);
        }
    }

    #[test]
    fn test_protected_parent_covers_children() {
        let table = table();
        let route = table.resolve("/settings/username").unwrap();
        assert!(!route.record().meta.requires_auth);
        assert!(route.requires_auth());
        assert_eq!(
            decide(route.matched(), None, &AuthContext::anonymous()),
            redirect_login()
        );
    }

    #[test]
    fn test_decide_is_idempotent() {
        let table = table();
        let route = table.resolve("/stream").unwrap();
        let current = table.resolve("/").unwrap();
        let auth = AuthContext::anonymous();

        let first = decide(route.matched(), Some(&current), &auth);
        let second = decide(route.matched(), Some(&current), &auth);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_login_path() {
        let table = table();
        let guard = AuthGuard::new("/");
        let route = table.resolve("/stream").unwrap();
        assert_eq!(
            guard.check(&route, None, &AuthContext::anonymous()),
            NavigationAction::RedirectTo("/".to_string())
        );
        assert_eq!(guard.login_path(), "/");
    }

    #[test]
    fn test_chain_first_redirect_wins() {
        let table = table();
        let mut chain = GuardChain::new();
        chain.add(guard_fn(|_, _, _| NavigationAction::Proceed));
        chain.add(AuthGuard::default());
        chain.add(guard_fn(|_, _, _| {
            NavigationAction::RedirectTo("/elsewhere".into())
        }));
        assert_eq!(chain.len(), 3);

        let stream = table.resolve("/stream").unwrap();
        assert_eq!(
            chain.run(&stream, None, &AuthContext::anonymous()),
            redirect_login()
        );
        assert_eq!(
            chain.run(&stream, None, &AuthContext::authenticated("1")),
            NavigationAction::RedirectTo("/elsewhere".to_string())
        );
    }

    #[test]
    fn test_empty_chain_proceeds() {
        let table = table();
        let chain = GuardChain::default();
        let stream = table.resolve("/stream").unwrap();
        assert!(chain.is_empty());
        let action = chain.run(&stream, None, &AuthContext::anonymous());
        assert!(action.is_proceed());
    }

    #[test]
    fn test_auth_context() {
        assert!(!AuthContext::anonymous().is_authenticated());
        let auth = AuthContext::authenticated("mario");
        assert!(auth.is_authenticated());
        assert_eq!(auth.identifier(), Some("mario"));
        assert_eq!(AuthContext::from(None), AuthContext::anonymous());
    }
}

//! Navigator
//!
//! Drives a navigation attempt from request to commit:
//!
//! 1. resolve the location against the table
//! 2. run the guard chain with the target and the current route
//! 3. on redirect, resolve the new target and guard it again
//! 4. commit the final route and record it in the hash history
//!
//! A failed attempt (not found, redirect loop) leaves the navigator as it
//! was.

use crate::config::RouterConfig;
use crate::guard::{AuthContext, AuthGuard, GuardChain, NavigationAction, NavigationGuard};
use crate::location::Location;
use crate::session::SessionMarker;
use crate::table::{ResolvedRoute, RouteTable};
use crate::{Error, Result};
use std::sync::Arc;

/// How a navigation attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The requested route was entered
    Committed(ResolvedRoute),
    /// A guard sent the user somewhere else
    Redirected {
        /// Location originally asked for
        requested: String,
        /// Route actually entered
        route: ResolvedRoute,
    },
}

impl NavigationOutcome {
    /// The route that was entered
    pub fn route(&self) -> &ResolvedRoute {
        match self {
            NavigationOutcome::Committed(route) => route,
            NavigationOutcome::Redirected { route, .. } => route,
        }
    }

    pub fn into_route(self) -> ResolvedRoute {
        match self {
            NavigationOutcome::Committed(route) => route,
            NavigationOutcome::Redirected { route, .. } => route,
        }
    }

    pub fn is_redirected(&self) -> bool {
        matches!(self, NavigationOutcome::Redirected { .. })
    }
}

/// Client-side navigator with hash history
pub struct Navigator {
    table: Arc<RouteTable>,
    guards: GuardChain,
    config: RouterConfig,
    marker: SessionMarker,
    current: Option<ResolvedRoute>,
    history: Vec<String>,
    position: usize,
}

impl Navigator {
    /// Create a navigator over a table, guarded by [`AuthGuard`]
    pub fn new(table: Arc<RouteTable>, config: RouterConfig) -> Self {
        let mut guards = GuardChain::new();
        guards.add(AuthGuard::new(config.login_path.clone()));

        Self {
            table,
            guards,
            marker: SessionMarker::new(config.session_key.clone()),
            config,
            current: None,
            history: Vec::new(),
            position: 0,
        }
    }

    /// Build the table named by `config.revision` and wrap it
    pub fn from_config(config: RouterConfig) -> Result<Self> {
        let table = RouteTable::for_revision(config.revision)?;
        Ok(Self::new(Arc::new(table), config))
    }

    /// Register an extra guard, run after the ones already present
    pub fn with_guard<G: NavigationGuard + 'static>(mut self, guard: G) -> Self {
        self.guards.add(guard);
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Marker configured for this navigator
    pub fn session(&self) -> &SessionMarker {
        &self.marker
    }

    pub fn current(&self) -> Option<&ResolvedRoute> {
        self.current.as_ref()
    }

    /// History entries, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Index of the current entry in [`history`](Self::history)
    pub fn position(&self) -> usize {
        self.position
    }

    /// Navigate and add a history entry
    ///
    /// Navigating to the location already shown re-runs the guards but
    /// does not add an entry.
    pub fn push(
        &mut self,
        location: impl Into<Location>,
        auth: &AuthContext,
    ) -> Result<NavigationOutcome> {
        let outcome = self.run(location.into(), auth)?;
        let same = self
            .current
            .as_ref()
            .is_some_and(|c| c.full_path == outcome.route().full_path);
        self.commit(&outcome, same);
        Ok(outcome)
    }

    /// Navigate, replacing the current history entry
    pub fn replace(
        &mut self,
        location: impl Into<Location>,
        auth: &AuthContext,
    ) -> Result<NavigationOutcome> {
        let outcome = self.run(location.into(), auth)?;
        self.commit(&outcome, true);
        Ok(outcome)
    }

    /// Go one entry back; `None` at the start of history
    ///
    /// The entry is guarded again, so a session that logged out meanwhile
    /// is redirected and the entry is overwritten with the redirect target.
    pub fn back(&mut self, auth: &AuthContext) -> Result<Option<NavigationOutcome>> {
        if self.history.is_empty() || self.position == 0 {
            return Ok(None);
        }
        self.go(self.position - 1, auth).map(Some)
    }

    /// Go one entry forward; `None` at the end of history
    pub fn forward(&mut self, auth: &AuthContext) -> Result<Option<NavigationOutcome>> {
        if self.position + 1 >= self.history.len() {
            return Ok(None);
        }
        self.go(self.position + 1, auth).map(Some)
    }

    fn go(&mut self, index: usize, auth: &AuthContext) -> Result<NavigationOutcome> {
        let outcome = self.run(Location::parse(&self.history[index]), auth)?;
        let route = outcome.route();
        self.position = index;
        self.history[index] = route.full_path.clone();
        tracing::info!(
            path = %route.full_path,
            redirected = outcome.is_redirected(),
            "history traversal"
        );
        self.current = Some(route.clone());
        Ok(outcome)
    }

    /// Resolve and guard without touching state
    fn run(&self, location: Location, auth: &AuthContext) -> Result<NavigationOutcome> {
        let requested = location.full_path();
        let mut visited = vec![location.path.clone()];
        let mut route = self.table.resolve(location)?;

        loop {
            match self.guards.run(&route, self.current.as_ref(), auth) {
                NavigationAction::Proceed => break,
                NavigationAction::RedirectTo(target) => {
                    let target = Location::parse(&target);
                    if visited.contains(&target.path) || visited.len() > self.config.max_redirects {
                        visited.push(target.path);
                        tracing::warn!(requested = %requested, hops = ?visited, "redirect loop");
                        return Err(Error::RedirectLoop(visited));
                    }
                    tracing::debug!(from = %route.path, to = %target.path, "redirect");
                    visited.push(target.path.clone());
                    route = self.table.resolve(target)?;
                }
            }
        }

        if visited.len() == 1 {
            Ok(NavigationOutcome::Committed(route))
        } else {
            Ok(NavigationOutcome::Redirected { requested, route })
        }
    }

    fn commit(&mut self, outcome: &NavigationOutcome, replace: bool) {
        let route = outcome.route();
        let entry = route.full_path.clone();

        if self.history.is_empty() {
            self.history.push(entry);
            self.position = 0;
        } else if replace {
            self.history[self.position] = entry;
        } else {
            self.history.truncate(self.position + 1);
            self.history.push(entry);
            self.position = self.history.len() - 1;
        }

        tracing::info!(
            path = %route.full_path,
            name = route.name.as_deref().unwrap_or(""),
            redirected = outcome.is_redirected(),
            "navigation committed"
        );
        self.current = Some(route.clone());
    }
}

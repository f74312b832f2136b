//! wasaphoto-core: Client-side navigation for the WASAPhoto front-end
//!
//! The route table, the authentication guard and the session marker,
//! shared between the WASM bindings and native hosts (tests, tooling).
//!
//! ## Flow
//! 1. [`RouteTable`] is built once from [`RouteDef`] declarations
//! 2. [`SessionMarker::read`] turns storage into an [`AuthContext`]
//! 3. [`Navigator::push`] resolves, guards, redirects and commits
//!
//! ## Example
//! ```
//! use wasaphoto_core::{MemoryStore, Navigator, RouterConfig};
//!
//! let store = MemoryStore::new();
//! let mut nav = Navigator::from_config(RouterConfig::default()).unwrap();
//!
//! let auth = nav.session().read(&store);
//! let outcome = nav.push("/stream", &auth).unwrap();
//! assert_eq!(outcome.route().path, "/login");
//!
//! let auth = nav.session().login(&store, "42").unwrap();
//! let outcome = nav.push("/profile/42", &auth).unwrap();
//! assert_eq!(outcome.route().param("profileId"), Some("42"));
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod guard;
pub mod location;
pub mod navigator;
pub mod route;
pub mod routes;
pub mod session;
pub mod table;

// Re-exports
pub use config::RouterConfig;
pub use error::{Error, Result};
pub use guard::{
    decide, guard_fn, requires_auth, AuthContext, AuthGuard, FnGuard, GuardChain,
    NavigationAction, NavigationGuard, LOGIN_PATH,
};
pub use location::{Location, Query};
pub use navigator::{NavigationOutcome, Navigator};
pub use route::{RouteDef, RouteMeta, RouteRecord, ViewId};
pub use routes::Revision;
pub use session::{MemoryStore, SessionMarker, SessionStore, SESSION_KEY};
pub use table::{ResolvedRoute, RouteTable};

//! WASM bindings for JavaScript interop
//!
//! ```js
//! const nav = new WasmNavigator("guarded");
//! const result = nav.push(window.location.hash);
//! if (result.redirected) window.location.hash = result.path;
//! render(result.view, result.params);
//! ```

use crate::storage::LocalStorage;
use wasaphoto_core::{
    AuthContext, AuthGuard, Error, NavigationAction, NavigationGuard, NavigationOutcome, Navigator,
    Revision, RouterConfig,
};
use wasm_bindgen::prelude::*;

fn to_js(err: Error) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

// ============================================================================
// Navigator
// ============================================================================

/// WASM-exposed navigator
///
/// Reads the session marker from `localStorage` before every navigation.
#[wasm_bindgen]
pub struct WasmNavigator {
    inner: Navigator,
    store: LocalStorage,
}

#[wasm_bindgen]
impl WasmNavigator {
    /// Create a navigator for a table revision (`"scaffold"`, `"views"`,
    /// `"guarded"`); the newest one when omitted
    #[wasm_bindgen(constructor)]
    pub fn new(revision: Option<String>) -> Result<WasmNavigator, JsValue> {
        let revision = match revision {
            Some(name) => name.parse::<Revision>().map_err(to_js)?,
            None => Revision::default(),
        };
        let config = RouterConfig::default().revision(revision);
        Ok(Self {
            inner: Navigator::from_config(config).map_err(to_js)?,
            store: LocalStorage::new().map_err(to_js)?,
        })
    }

    /// Navigate, adding a history entry
    pub fn push(&mut self, location: &str) -> Result<WasmNavigation, JsValue> {
        let auth = self.auth();
        self.inner
            .push(location, &auth)
            .map(WasmNavigation::from)
            .map_err(to_js)
    }

    /// Navigate, replacing the current history entry
    pub fn replace(&mut self, location: &str) -> Result<WasmNavigation, JsValue> {
        let auth = self.auth();
        self.inner
            .replace(location, &auth)
            .map(WasmNavigation::from)
            .map_err(to_js)
    }

    /// Step back; `undefined` at the start of history
    pub fn back(&mut self) -> Result<Option<WasmNavigation>, JsValue> {
        let auth = self.auth();
        self.inner
            .back(&auth)
            .map(|o| o.map(WasmNavigation::from))
            .map_err(to_js)
    }

    /// Step forward; `undefined` at the end of history
    pub fn forward(&mut self) -> Result<Option<WasmNavigation>, JsValue> {
        let auth = self.auth();
        self.inner
            .forward(&auth)
            .map(|o| o.map(WasmNavigation::from))
            .map_err(to_js)
    }

    /// Guard decision for a location without navigating
    ///
    /// Returns the redirect target, or `undefined` to proceed. Meant for a
    /// JS router's `beforeEach` hook.
    pub fn check(&self, location: &str) -> Result<Option<String>, JsValue> {
        let route = self.inner.table().resolve(location).map_err(to_js)?;
        let guard = AuthGuard::new(self.inner.config().login_path.clone());
        match guard.check(&route, self.inner.current(), &self.auth()) {
            NavigationAction::Proceed => Ok(None),
            NavigationAction::RedirectTo(path) => Ok(Some(path)),
        }
    }

    /// Store the identifier returned by `POST /session`
    pub fn login(&self, identifier: &str) -> Result<(), JsValue> {
        self.inner
            .session()
            .login(&self.store, identifier)
            .map(|_| ())
            .map_err(to_js)
    }

    /// Clear the session marker
    pub fn logout(&self) -> Result<(), JsValue> {
        self.inner.session().logout(&self.store).map_err(to_js)
    }

    /// Whether the session marker is present
    pub fn is_authenticated(&self) -> bool {
        self.auth().is_authenticated()
    }

    /// Identifier stored by the login flow
    #[wasm_bindgen(getter)]
    pub fn identifier(&self) -> Option<String> {
        self.auth().identifier().map(str::to_string)
    }

    /// Path of a named route; `params` is a flat `[name, value, ...]` list
    pub fn resolve_named(&self, name: &str, params: Vec<String>) -> Result<String, JsValue> {
        let pairs: Vec<(&str, &str)> = params
            .chunks_exact(2)
            .map(|kv| (kv[0].as_str(), kv[1].as_str()))
            .collect();
        self.inner
            .table()
            .resolve_named(name, &pairs)
            .map_err(to_js)
    }

    /// Full path of the current route
    #[wasm_bindgen(getter)]
    pub fn current_path(&self) -> Option<String> {
        self.inner.current().map(|r| r.full_path.clone())
    }

    /// History entries, oldest first
    #[wasm_bindgen(getter)]
    pub fn history(&self) -> Vec<String> {
        self.inner.history().to_vec()
    }
}

impl WasmNavigator {
    fn auth(&self) -> AuthContext {
        self.inner.session().read(&self.store)
    }
}

/// Navigation result for WASM
#[wasm_bindgen]
pub struct WasmNavigation {
    /// A guard redirected the navigation
    pub redirected: bool,
    /// The entered route requires authentication
    pub requires_auth: bool,
    requested: String,
    path: String,
    full_path: String,
    name: Option<String>,
    view: String,
    params: Vec<String>,
}

#[wasm_bindgen]
impl WasmNavigation {
    /// `"proceed"` or `"redirect"`
    #[wasm_bindgen(getter)]
    pub fn action(&self) -> String {
        let action = if self.redirected {
            "redirect"
        } else {
            "proceed"
        };
        action.to_string()
    }

    /// Location originally asked for
    #[wasm_bindgen(getter)]
    pub fn requested(&self) -> String {
        self.requested.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn path(&self) -> String {
        self.path.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn full_path(&self) -> String {
        self.full_path.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn name(&self) -> Option<String> {
        self.name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn view(&self) -> String {
        self.view.clone()
    }

    /// Path params flattened as `[name, value, ...]`
    #[wasm_bindgen(getter)]
    pub fn params(&self) -> Vec<String> {
        self.params.clone()
    }

    /// Value of one path param
    pub fn param(&self, name: &str) -> Option<String> {
        self.params
            .chunks_exact(2)
            .find(|kv| kv[0] == name)
            .map(|kv| kv[1].clone())
    }
}

impl From<NavigationOutcome> for WasmNavigation {
    fn from(outcome: NavigationOutcome) -> Self {
        let redirected = outcome.is_redirected();
        let requested = match &outcome {
            NavigationOutcome::Redirected { requested, .. } => requested.clone(),
            NavigationOutcome::Committed(route) => route.full_path.clone(),
        };
        let route = outcome.into_route();
        let requires_auth = route.requires_auth();
        let view = route.view().to_string();
        let params = route.params.into_iter().flat_map(|(k, v)| [k, v]);

        Self {
            redirected,
            requires_auth,
            requested,
            view,
            params: params.collect(),
            path: route.path,
            full_path: route.full_path,
            name: route.name,
        }
    }
}

/// Current `window.location.hash`, without the leading `#`
#[wasm_bindgen]
pub fn current_hash() -> Option<String> {
    let hash = web_sys::window()?.location().hash().ok()?;
    Some(hash.trim_start_matches('#').to_string())
}

/// Names of the available table revisions
#[wasm_bindgen]
pub fn revisions() -> Vec<String> {
    Revision::ALL
        .iter()
        .map(|r| r.as_str().to_string())
        .collect()
}

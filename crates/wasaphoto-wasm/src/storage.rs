//! `localStorage`-backed session store
//!
//! Survives page reloads, which is what makes the marker a session.

use wasaphoto_core::{Error, Result, SessionStore};
use wasm_bindgen::JsValue;

/// Session store over `window.localStorage`
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open the window's local storage
    ///
    /// Fails outside a window context or when storage is disabled.
    pub fn new() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| Error::Storage("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| Error::Storage("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }

    /// Wrap an existing storage object (e.g. `sessionStorage`)
    pub fn from_storage(storage: web_sys::Storage) -> Self {
        Self { storage }
    }
}

impl SessionStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(js_error)
    }
}

pub(crate) fn js_error(value: JsValue) -> Error {
    let message = value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value));
    tracing::warn!(error = %message, "localStorage call failed");
    Error::Storage(message)
}

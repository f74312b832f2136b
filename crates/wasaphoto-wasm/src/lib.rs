//! wasaphoto-wasm: WASAPhoto navigator for the browser
//!
//! Exposes the route table and authentication guard of `wasaphoto-core`
//! to JavaScript, with the session marker kept in `window.localStorage`.

#[cfg(feature = "wasm")]
pub mod storage;

#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use storage::LocalStorage;

#[cfg(feature = "wasm")]
pub use wasm::*;

pub use wasaphoto_core::{
    AuthContext, NavigationAction, NavigationOutcome, Navigator, Revision, RouterConfig,
};

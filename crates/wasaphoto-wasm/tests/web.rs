//! Browser tests: `wasm-pack test --headless --firefox crates/wasaphoto-wasm`

#![cfg(target_arch = "wasm32")]

use wasaphoto_core::SessionStore;
use wasaphoto_wasm::{LocalStorage, WasmNavigator};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn fresh_navigator() -> WasmNavigator {
    LocalStorage::new().unwrap().remove("identifier").unwrap();
    WasmNavigator::new(None).unwrap()
}

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    let store = LocalStorage::new().unwrap();
    store.set("wasaphoto-test", "1").unwrap();
    assert_eq!(store.get("wasaphoto-test").unwrap(), Some("1".to_string()));
    store.remove("wasaphoto-test").unwrap();
    assert_eq!(store.get("wasaphoto-test").unwrap(), None);
}

#[wasm_bindgen_test]
fn stream_redirects_to_login_without_marker() {
    let mut nav = fresh_navigator();
    let result = nav.push("/stream").unwrap();

    assert!(result.redirected);
    assert_eq!(result.action(), "redirect");
    assert_eq!(result.path(), "/login");
    assert_eq!(result.requested(), "/stream");
    assert_eq!(nav.check("/stream").unwrap(), Some("/login".to_string()));
}

#[wasm_bindgen_test]
fn login_marker_opens_profile() {
    let mut nav = fresh_navigator();
    nav.login("42").unwrap();
    assert!(nav.is_authenticated());
    assert_eq!(nav.identifier(), Some("42".to_string()));

    let result = nav.push("/profile/42").unwrap();
    assert!(!result.redirected);
    assert!(result.requires_auth);
    assert_eq!(result.view(), "ProfileView");
    assert_eq!(result.param("profileId"), Some("42".to_string()));

    nav.logout().unwrap();
    assert!(!nav.is_authenticated());
    assert_eq!(
        nav.check("/profile/42").unwrap(),
        Some("/login".to_string())
    );
}

#[wasm_bindgen_test]
fn named_routes_and_revisions() {
    let nav = fresh_navigator();
    let params = vec!["profileId".to_string(), "7".to_string()];
    assert_eq!(nav.resolve_named("profile", params).unwrap(), "/profile/7");
    assert!(nav.resolve_named("nope", Vec::new()).is_err());
    assert!(WasmNavigator::new(Some("v9".into())).is_err());

    let mut scaffold = WasmNavigator::new(Some("scaffold".into())).unwrap();
    let result = scaffold.push("/profile/mario").unwrap();
    assert_eq!(result.name(), Some("UserProfile".to_string()));
}

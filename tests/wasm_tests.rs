//! Browser-side tests for the JavaScript surface.
//!
//! Run with: wasm-pack test --headless --chrome
#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use gridcore::bindings::GridEngine;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn engine() -> GridEngine {
    let schema = js_sys::JSON::parse(
        r#"[{"id": "id", "width": 80, "pinned": true},
            {"id": "qty", "width": 100, "editable": true, "type": "number"}]"#,
    )
    .unwrap();
    let rows = js_sys::JSON::parse(r#"[{"id": "a", "qty": 1}, {"id": "b", "qty": 2}]"#).unwrap();
    let engine = GridEngine::new(schema, rows, JsValue::UNDEFINED).unwrap();
    engine.set_viewport(400.0, 200.0);
    engine
}

#[wasm_bindgen_test]
fn test_key_moves_focus() {
    let engine = engine();
    let outcome = engine.handle_key("ArrowRight", false, false, false).unwrap();
    let kind = js_sys::Reflect::get(&outcome, &"kind".into()).unwrap();
    assert_eq!(kind.as_string().as_deref(), Some("focus"));
    assert!(engine.handle_key("q", false, false, false).unwrap().is_null());
}

#[wasm_bindgen_test]
async fn test_promise_validator_rejects() {
    let engine = engine();
    engine.open_edit(0, 1).unwrap();
    assert!(engine.update_edit_text("-4"));

    let validator = js_sys::Function::new_with_args(
        "v",
        "return Promise.resolve(v >= 0 ? {isValid: true} : {isValid: false, error: 'negative'});",
    );
    let payload = JsFuture::from(engine.commit_edit(Some(validator))).await.unwrap();
    let value = js_sys::Reflect::get(&payload, &"value".into()).unwrap();
    assert_eq!(value.as_f64(), Some(1.0));
}

//! JavaScript surface for a host renderer.
//!
//! The engine is headless: the host feeds it viewport size, scroll offsets and
//! decoded key presses, and paints whatever [`GridEngine::render_frame`]
//! returns. Validators are plain JS functions returning either a verdict object
//! `{ isValid, error? }` or a promise of one.

use futures::future::{FutureExt, LocalBoxFuture};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

use crate::config::GridConfig;
use crate::editor::{AcceptAll, CommitRequest, ValidationOutcome, Validator};
use crate::error::{GridError, Result};
use crate::grid::GridState;
use crate::navigation::{Modifiers, NavAction};
use crate::sort::SortStack;
use crate::types::{
    dataset_from_rows, validate_schema, CellPosition, CellValue, Column, Row, ScrollOffset,
    ViewportSize,
};

fn to_js<T: Serialize + ?Sized>(value: &T) -> std::result::Result<JsValue, JsValue> {
    // Plain objects rather than ES Maps for row records
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T> {
    serde_wasm_bindgen::from_value(value).map_err(|e| GridError::Other(format!("Invalid {what}: {e}")))
}

fn js_error_text(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Validator backed by a JS function.
struct JsValidator(js_sys::Function);

impl Validator for JsValidator {
    fn validate(&self, value: &CellValue) -> LocalBoxFuture<'_, Result<ValidationOutcome>> {
        let func = self.0.clone();
        let arg = to_js(value);
        async move {
            let arg = arg.map_err(|e| GridError::Validator(js_error_text(&e)))?;
            let returned = func
                .call1(&JsValue::NULL, &arg)
                .map_err(|e| GridError::Validator(js_error_text(&e)))?;
            // Promise.resolve accepts both plain verdicts and thenables
            let settled = JsFuture::from(js_sys::Promise::resolve(&returned))
                .await
                .map_err(|e| GridError::Validator(js_error_text(&e)))?;
            serde_wasm_bindgen::from_value(settled)
                .map_err(|e| GridError::Validator(format!("malformed verdict: {e}")))
        }
        .boxed_local()
    }
}

/// Grid engine handle exported to JavaScript
#[wasm_bindgen]
pub struct GridEngine {
    state: Rc<RefCell<GridState>>,
}

#[wasm_bindgen]
impl GridEngine {
    /// Create an engine from a column schema, an array of row objects and an
    /// optional configuration object.
    #[wasm_bindgen(constructor)]
    pub fn new(schema: JsValue, rows: JsValue, config: JsValue) -> std::result::Result<GridEngine, JsValue> {
        console_error_panic_hook::set_once();

        let schema: Vec<Column> = from_js(schema, "schema")?;
        let rows: Vec<Row> = from_js(rows, "rows")?;
        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            from_js(config, "config")?
        };

        let state = GridState::try_new(config, schema, dataset_from_rows(rows))?;
        Ok(GridEngine {
            state: Rc::new(RefCell::new(state)),
        })
    }

    #[wasm_bindgen(js_name = "setSchema")]
    pub fn set_schema(&self, schema: JsValue) -> std::result::Result<(), JsValue> {
        let schema: Vec<Column> = from_js(schema, "schema")?;
        validate_schema(&schema)?;
        self.state.borrow_mut().set_schema(schema);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setRows")]
    pub fn set_rows(&self, rows: JsValue) -> std::result::Result<(), JsValue> {
        let rows: Vec<Row> = from_js(rows, "rows")?;
        self.state.borrow_mut().set_rows(dataset_from_rows(rows));
        Ok(())
    }

    #[wasm_bindgen(js_name = "setViewport")]
    pub fn set_viewport(&self, width: f64, height: f64) {
        self.state
            .borrow_mut()
            .set_viewport(ViewportSize::new(width, height));
    }

    /// Returns the clamped scroll offsets the host should apply.
    #[wasm_bindgen(js_name = "scrollTo")]
    pub fn scroll_to(&self, top: f64, left: f64) -> std::result::Result<JsValue, JsValue> {
        let mut state = self.state.borrow_mut();
        state.scroll_to(ScrollOffset::new(top, left));
        to_js(&state.scroll())
    }

    #[wasm_bindgen(js_name = "visibleWindow")]
    pub fn visible_window(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.state.borrow().visible_window())
    }

    #[wasm_bindgen(js_name = "renderFrame")]
    pub fn render_frame(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.state.borrow().render_frame())
    }

    #[wasm_bindgen(js_name = "cellAtPoint")]
    pub fn cell_at_point(&self, x: f64, y: f64) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.state.borrow().cell_at_point(x, y))
    }

    pub fn focus(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.state.borrow().focus())
    }

    #[wasm_bindgen(js_name = "setFocus")]
    pub fn set_focus(&self, row: usize, col: usize) -> std::result::Result<JsValue, JsValue> {
        let focus = self
            .state
            .borrow_mut()
            .set_focus(CellPosition::new(row, col));
        to_js(&focus)
    }

    /// Apply a `KeyboardEvent.key`; `null` for keys the grid ignores.
    #[wasm_bindgen(js_name = "handleKey")]
    pub fn handle_key(
        &self,
        key: &str,
        shift: bool,
        ctrl: bool,
        meta: bool,
    ) -> std::result::Result<JsValue, JsValue> {
        let Some(action) = NavAction::from_key(key, Modifiers { shift, ctrl, meta }) else {
            return Ok(JsValue::NULL);
        };
        let outcome = self.state.borrow_mut().handle_action(action);
        to_js(&outcome)
    }

    #[wasm_bindgen(js_name = "openEdit")]
    pub fn open_edit(&self, row: usize, col: usize) -> std::result::Result<JsValue, JsValue> {
        let session = self
            .state
            .borrow_mut()
            .open_edit(CellPosition::new(row, col));
        to_js(&session)
    }

    #[wasm_bindgen(js_name = "updateEdit")]
    pub fn update_edit(&self, value: JsValue) -> std::result::Result<bool, JsValue> {
        let value: CellValue = from_js(value, "cell value")?;
        Ok(self.state.borrow_mut().update_edit(value))
    }

    #[wasm_bindgen(js_name = "updateEditText")]
    pub fn update_edit_text(&self, text: &str) -> bool {
        self.state.borrow_mut().update_edit_text(text)
    }

    #[wasm_bindgen(js_name = "editSession")]
    pub fn edit_session(&self) -> std::result::Result<JsValue, JsValue> {
        let state = self.state.borrow();
        let Some(session) = state.edit_session() else {
            return Ok(JsValue::NULL);
        };
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct SessionView<'a> {
            id: u64,
            position: CellPosition,
            column_id: &'a str,
            original_value: &'a CellValue,
            current_value: &'a CellValue,
            status: crate::editor::EditStatus,
            error: Option<&'a str>,
        }
        to_js(&SessionView {
            id: session.id().0,
            position: session.position(),
            column_id: session.column_id(),
            original_value: session.original_value(),
            current_value: session.current_value(),
            status: session.status(),
            error: session.error(),
        })
    }

    /// Commit the active session. Resolves to the commit payload, or `null`
    /// when there was nothing to commit or the verdict arrived for a session
    /// that has since been replaced or cancelled.
    ///
    /// The engine stays usable while the validator runs.
    #[wasm_bindgen(js_name = "commitEdit")]
    pub fn commit_edit(&self, validator: Option<js_sys::Function>) -> js_sys::Promise {
        let state = Rc::clone(&self.state);
        future_to_promise(async move {
            let request = state.borrow_mut().begin_commit();
            let payload = match request {
                None => None,
                Some(CommitRequest::Resolved(payload)) => Some(payload),
                Some(CommitRequest::Validate(pending)) => {
                    let (session, verdict) = match validator {
                        Some(func) => pending.run(&JsValidator(func)).await,
                        None => pending.run(&AcceptAll).await,
                    };
                    state.borrow_mut().finish_commit(session, verdict)
                }
            };
            to_js(&payload)
        })
    }

    #[wasm_bindgen(js_name = "cancelEdit")]
    pub fn cancel_edit(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.state.borrow_mut().cancel_edit())
    }

    /// Header click; `additive` for shift-click.
    #[wasm_bindgen(js_name = "toggleSort")]
    pub fn toggle_sort(&self, column_id: &str, additive: bool) -> std::result::Result<JsValue, JsValue> {
        let mut state = self.state.borrow_mut();
        state.toggle_sort(column_id, additive);
        to_js(state.sort_stack())
    }

    #[wasm_bindgen(js_name = "setSort")]
    pub fn set_sort(&self, descriptors: JsValue) -> std::result::Result<(), JsValue> {
        let stack: SortStack = from_js(descriptors, "sort descriptors")?;
        self.state.borrow_mut().set_sort(stack);
        Ok(())
    }

    /// Source index of each displayed row.
    #[wasm_bindgen(js_name = "rowOrder")]
    pub fn row_order(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(self.state.borrow().row_order())
    }

    /// Current rows in source order, edits included.
    pub fn rows(&self) -> std::result::Result<JsValue, JsValue> {
        let state = self.state.borrow();
        let rows: Vec<&Row> = state.rows().iter().map(AsRef::as_ref).collect();
        to_js(&rows)
    }
}

/// Spreadsheet-style label for a zero-based column index ("A", "Z", "AA").
#[wasm_bindgen(js_name = "columnLabel")]
pub fn column_label(index: usize) -> String {
    crate::cell_ref::column_label(index)
}

//! WASM API — `#[wasm_bindgen]` exports for a JavaScript block-editor host.
//!
//! This module is only compiled when targeting `wasm32`. The host performs the
//! fetch itself and hands the body over; everything else happens here:
//! - `init_playground` / `destroy_playground` — lifecycle
//! - `define_blocks` — definitions + toolbox from a playbook dump
//! - `workspace_configuration` — static grid settings
//! - `get_block_types` — everything registered so far
//! - `relay_change` — forward a workspace change to the host's setter

use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::PlaygroundConfig;
use crate::core::block::BlockDefinition;
use crate::core::play::PlayList;
use crate::core::registry::BlockTypes;
use crate::core::toolbox::ToolboxDescriptor;
use crate::loader::register_play_list;
use crate::relay::{SharedState, WorkspaceRelay, WorkspaceSnapshot};
use crate::view::LOAD_FAILED_MESSAGE;

// ── Global state ────────────────────────────────────────────────────────────

struct WasmPlayground {
    config: PlaygroundConfig,
    registry: BlockTypes,
}

thread_local! {
    static PLAYGROUND: RefCell<Option<WasmPlayground>> = RefCell::new(None);
}

fn with_playground<R>(f: impl FnOnce(&mut WasmPlayground) -> R) -> Result<R, String> {
    PLAYGROUND.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(pg) => Ok(f(pg)),
            None => Err("Playground not initialized. Call init_playground() first.".into()),
        }
    })
}

// ── Response types ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct DefineResponse<'a> {
    blocks: &'a [BlockDefinition],
    toolbox: &'a ToolboxDescriptor,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn json_err(msg: impl Into<String>) -> String {
    serde_json::to_string(&ErrorResponse { error: msg.into() }).unwrap_or_default()
}

/// Publishes snapshots through a JS `setData(blocksJson)` callback.
struct JsSetter<'a>(&'a js_sys::Function);

impl SharedState for JsSetter<'_> {
    fn publish_workspace(&self, snapshot: WorkspaceSnapshot) {
        if let Ok(json) = serde_json::to_string(&snapshot) {
            let _ = self.0.call1(&JsValue::NULL, &JsValue::from_str(&json));
        }
    }
}

// ── Exported functions ──────────────────────────────────────────────────────

/// Initialize with an optional TOML config. Returns `{"error"}` on bad config.
#[wasm_bindgen]
pub fn init_playground(config_toml: Option<String>) -> String {
    console_error_panic_hook::set_once();

    let config = match config_toml.as_deref().map(PlaygroundConfig::from_toml_str) {
        Some(Ok(c)) => c,
        Some(Err(e)) => return json_err(e.to_string()),
        None => PlaygroundConfig::default(),
    };

    PLAYGROUND.with(|cell| {
        *cell.borrow_mut() = Some(WasmPlayground {
            config,
            registry: BlockTypes::new(),
        });
    });
    "{}".into()
}

#[wasm_bindgen]
pub fn destroy_playground() {
    PLAYGROUND.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

/// Register the plays in `response_json` and return `{ blocks, toolbox }`.
///
/// Any failure returns `{ "error": "Failed to load blocks from the API." }`
/// and registers nothing.
#[wasm_bindgen]
pub fn define_blocks(response_json: &str) -> String {
    let list = match PlayList::from_json_slice(response_json.as_bytes()) {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, "playbook response is not JSON");
            return json_err(LOAD_FAILED_MESSAGE);
        }
    };

    match with_playground(|pg| register_play_list(&list, &pg.registry, &pg.config)) {
        Ok(Ok(loaded)) => serde_json::to_string(&DefineResponse {
            blocks: &loaded.definitions,
            toolbox: &loaded.toolbox,
        })
        .unwrap_or_default(),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "block registration failed");
            json_err(LOAD_FAILED_MESSAGE)
        }
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn workspace_configuration() -> String {
    match with_playground(|pg| serde_json::to_string(&pg.config.workspace)) {
        Ok(Ok(json)) => json,
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn get_block_types() -> String {
    match with_playground(|pg| pg.registry.definitions()) {
        Ok(defs) => serde_json::to_string(&defs).unwrap_or_default(),
        Err(e) => json_err(e),
    }
}

/// Forward `event_json` to `set_data` when it carries `blocks.blocks`.
///
/// Returns whether the event was forwarded.
#[wasm_bindgen]
pub fn relay_change(event_json: &str, set_data: &js_sys::Function) -> bool {
    WorkspaceRelay::new(JsSetter(set_data))
        .handle_change_json(event_json)
        .is_ok()
}

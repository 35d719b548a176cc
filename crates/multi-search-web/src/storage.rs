//! `localStorage` backend
//!
//! A missing or blocked `localStorage` reads as empty and refuses writes,
//! which the dashboard treats as in-memory-only operation.

use multi_search_core::{KeyValueStore, Result, StorageError};
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn local_storage() -> Result<web_sys::Storage> {
    web_sys::window()
        .ok_or_else(|| StorageError::unavailable("no window"))?
        .local_storage()
        .map_err(js_error)?
        .ok_or_else(|| StorageError::unavailable("localStorage disabled"))
}

fn js_error(err: JsValue) -> StorageError {
    StorageError::unavailable(format!("{:?}", err))
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        local_storage()?.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        local_storage()?.set_item(key, value).map_err(js_error)
    }
}

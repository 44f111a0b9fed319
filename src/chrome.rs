/// Browser bindings: chrome.storage.local, tab creation and timers
use crate::storage::{StorageBackend, StorageError};
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

// Import JS bridge functions
#[wasm_bindgen(module = "/extension.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(entries: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn openExtensionPage(path: &str) -> Result<(), JsValue>;
}

/// chrome.storage.local, shared by every page of the extension
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChromeStorage;

impl StorageBackend for ChromeStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let value_js = getStorage(key)
            .await
            .map_err(|e| StorageError::Read(format!("{:?}", e)))?;

        if value_js.is_null() || value_js.is_undefined() {
            return Ok(None);
        }

        serde_wasm_bindgen::from_value(value_js)
            .map(Some)
            .map_err(|e| StorageError::Decode(e.to_string()))
    }

    async fn set(&self, entries: Map<String, Value>) -> Result<(), StorageError> {
        // Plain objects rather than JS Maps, which chrome.storage cannot store
        let entries_js = entries
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| StorageError::Encode(e.to_string()))?;

        setStorage(entries_js)
            .await
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// Open a page bundled with the extension in a new, focused tab
pub async fn open_extension_page(path: &str) -> Result<(), String> {
    openExtensionPage(path)
        .await
        .map_err(|e| format!("Failed to open {}: {:?}", path, e))
}

/// Resolve after `delay` via setTimeout
pub async fn sleep(delay: Duration) {
    let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().map(|window| {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
        });
        if !matches!(scheduled, Some(Ok(_))) {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = JsFuture::from(promise).await;
}

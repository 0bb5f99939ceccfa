/// Background script: WebExtension implementations of the store and
/// dispatcher, plus the event handlers the JS glue registers

use crate::dispatcher::Dispatcher;
use crate::envelope::{DeliveryAck, LogEntry};
use crate::error::{DeliveryError, StoreError};
use crate::indicator::Indicator;
use crate::operations::Controller;
use crate::settings::Settings;
use crate::storage::{AllowListStore, stored_flag};
use crate::tab_data::{ActiveInfo, ResponseDetails, TabId, TabInfo};
use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

// Import JS bridge functions
#[wasm_bindgen(module = "/js/background_bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStoredFlag(host: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStoredFlag(host: &str, enabled: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeStoredFlag(host: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getTab(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendLogs(tab_id: i32, logs: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getTitle(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setTitle(tab_id: i32, title: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn setIcon(tab_id: i32, path: &str) -> Result<(), JsValue>;

    fn alertUser(message: &str);
}

/// browser.storage.local, one key per host
pub struct BrowserStorage;

impl AllowListStore for BrowserStorage {
    async fn get(&self, host: &str) -> Result<Option<bool>, StoreError> {
        let value_js = getStoredFlag(host)
            .await
            .map_err(|e| StoreError::new("read", host, format!("{:?}", e)))?;

        if value_js.is_null() || value_js.is_undefined() {
            return Ok(None);
        }

        let value: serde_json::Value = serde_wasm_bindgen::from_value(value_js)
            .map_err(|e| StoreError::new("read", host, format!("Failed to parse value: {:?}", e)))?;

        Ok(stored_flag(&value))
    }

    async fn set(&self, host: &str, enabled: bool) -> Result<(), StoreError> {
        setStoredFlag(host, enabled)
            .await
            .map_err(|e| StoreError::new("write", host, format!("{:?}", e)))
    }

    async fn remove(&self, host: &str) -> Result<(), StoreError> {
        removeStoredFlag(host)
            .await
            .map_err(|e| StoreError::new("remove", host, format!("{:?}", e)))
    }
}

/// tabs.sendMessage and browserAction
pub struct BrowserDispatcher;

impl Dispatcher for BrowserDispatcher {
    async fn deliver(&self, tab_id: TabId, entries: &[LogEntry]) -> Result<(), DeliveryError> {
        let logs_js = to_js(entries)
            .map_err(|e| DeliveryError::new(tab_id, format!("Failed to serialize: {:?}", e)))?;

        let reply = sendLogs(tab_id, logs_js)
            .await
            .map_err(|e| DeliveryError::new(tab_id, format!("{:?}", e)))?;

        match serde_wasm_bindgen::from_value::<DeliveryAck>(reply) {
            Ok(ack) => debug!("Tab {} replied {:?}", tab_id, ack.response),
            Err(_) => debug!("Tab {} sent no acknowledgement", tab_id),
        }
        Ok(())
    }

    async fn set_indicator(&self, tab_id: TabId, indicator: &Indicator) -> Result<(), DeliveryError> {
        setIcon(tab_id, &indicator.icon)
            .await
            .map_err(|e| DeliveryError::new(tab_id, format!("Failed to set icon: {:?}", e)))?;

        let current = getTitle(tab_id)
            .await
            .map_err(|e| DeliveryError::new(tab_id, format!("Failed to get title: {:?}", e)))?
            .as_string()
            .unwrap_or_default();

        setTitle(tab_id, &indicator.title(&current))
            .await
            .map_err(|e| DeliveryError::new(tab_id, format!("Failed to set title: {:?}", e)))
    }

    fn warn_user(&self, message: &str) {
        alertUser(message);
    }
}

type BrowserController = Controller<BrowserStorage, BrowserDispatcher>;

/// Handle object the background glue keeps for the extension's lifetime
///
/// Each handler captures its own `Rc` to the controller, so listeners can be
/// registered as plain closures in JS.
#[wasm_bindgen]
pub struct Background {
    controller: Rc<BrowserController>,
}

#[wasm_bindgen]
impl Background {
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Background {
        let settings = load_settings(settings);
        debug!("Protected pages: {:?}", settings.protected_pages);

        Background {
            controller: Rc::new(Controller::new(BrowserStorage, BrowserDispatcher, settings)),
        }
    }

    pub fn on_icon_clicked(&self, tab: JsValue) {
        let Some(tab) = parse::<TabInfo>(tab, "tab") else {
            return;
        };

        let controller = self.controller.clone();
        spawn_local(async move {
            controller.on_icon_clicked(&tab).await;
        });
    }

    pub fn on_tab_activated(&self, active_info: JsValue) {
        let Some(tab_id) = parse::<ActiveInfo>(active_info, "activeInfo").and_then(|info| info.tab_id) else {
            return;
        };

        let controller = self.controller.clone();
        spawn_local(async move {
            match getTab(tab_id).await {
                Ok(tab_js) => {
                    if let Some(tab) = parse::<TabInfo>(tab_js, "tab") {
                        controller.on_tab_event(&tab).await;
                    }
                }
                Err(e) => warn!("Failed to get tab {}: {:?}", tab_id, e),
            }
        });
    }

    pub fn on_tab_created(&self, tab: JsValue) {
        self.on_tab_event(tab);
    }

    pub fn on_tab_updated(&self, _tab_id: JsValue, _change_info: JsValue, tab: JsValue) {
        self.on_tab_event(tab);
    }

    pub fn on_tab_removed(&self, tab_id: i32) {
        self.controller.on_tab_removed(tab_id);
    }

    pub fn on_response_started(&self, details: JsValue) {
        let Some(details) = parse::<ResponseDetails>(details, "requestDetails") else {
            return;
        };

        if !self.controller.is_active(details.tab_id) {
            return;
        }

        let controller = self.controller.clone();
        spawn_local(async move {
            let delivered = controller.on_response_started(&details).await;
            if delivered > 0 {
                debug!("Relayed {} log entries to tab {}", delivered, details.tab_id);
            }
        });
    }
}

impl Background {
    fn on_tab_event(&self, tab: JsValue) {
        let Some(tab) = parse::<TabInfo>(tab, "tab") else {
            return;
        };

        let controller = self.controller.clone();
        spawn_local(async move {
            controller.on_tab_event(&tab).await;
        });
    }
}

fn load_settings(settings_js: JsValue) -> Settings {
    if settings_js.is_null() || settings_js.is_undefined() {
        return Settings::default();
    }

    serde_wasm_bindgen::from_value(settings_js).unwrap_or_else(|e| {
        warn!("Failed to parse settings, using defaults: {:?}", e);
        Settings::default()
    })
}

fn parse<T: DeserializeOwned>(value: JsValue, what: &str) -> Option<T> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| warn!("Ignoring event with malformed {}: {:?}", what, e))
        .ok()
}

/// Plain JS objects, not `Map`s, so the result survives structured cloning
/// into the content script unchanged
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

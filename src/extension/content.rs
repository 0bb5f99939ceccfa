/// Content script: replays relayed log batches on the page console

use crate::envelope::{DeliveryAck, LogEntry, LogType};
use crate::extension::background::to_js;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use web_sys::console;

const BOLD: &str = "font-weight: bold;";

/// How one entry is written to the console
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCall {
    /// `console[method]("%c" + text, "font-weight: bold;")`
    Styled { method: LogType, text: String },
    /// `console[method](value)`
    Value { method: LogType, value: Value },
    /// `console.groupEnd()`
    GroupEnd,
}

pub fn console_call(entry: &LogEntry) -> ConsoleCall {
    match entry.log_type {
        LogType::Log | LogType::Warn | LogType::Error | LogType::Info => ConsoleCall::Styled {
            method: entry.log_type,
            text: format!("%c{}", display_text(&entry.log_info)),
        },
        LogType::GroupEnd => ConsoleCall::GroupEnd,
        LogType::Group | LogType::GroupCollapsed | LogType::Table => ConsoleCall::Value {
            method: entry.log_type,
            value: entry.log_info.clone(),
        },
    }
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// runtime.onMessage handler; answers `{response: "done"}`
#[wasm_bindgen]
pub fn replay_logs(logs: JsValue) -> Result<JsValue, JsValue> {
    let entries: Vec<LogEntry> = serde_wasm_bindgen::from_value(logs)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse logs: {:?}", e)))?;

    for entry in &entries {
        emit(&console_call(entry))?;
    }

    to_js(&DeliveryAck::done()).map_err(|e| JsValue::from_str(&format!("Failed to serialize: {:?}", e)))
}

fn emit(call: &ConsoleCall) -> Result<(), JsValue> {
    match call {
        ConsoleCall::Styled { method, text } => {
            let text = JsValue::from_str(text);
            let style = JsValue::from_str(BOLD);
            match method {
                LogType::Warn => console::warn_2(&text, &style),
                LogType::Error => console::error_2(&text, &style),
                LogType::Info => console::info_2(&text, &style),
                _ => console::log_2(&text, &style),
            }
        }
        ConsoleCall::Value { method, value } => {
            let value = to_js(value).map_err(|e| JsValue::from_str(&format!("Failed to convert: {:?}", e)))?;
            match method {
                LogType::Group => console::group_1(&value),
                LogType::GroupCollapsed => console::group_collapsed_1(&value),
                LogType::Table => console::table_1(&value),
                _ => console::log_1(&value),
            }
        }
        ConsoleCall::GroupEnd => console::group_end(),
    }
    Ok(())
}

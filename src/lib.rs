/// Header Logger - Browser extension relaying X-ChromeLogger-Data server logs
/// to the page console
/// Built with Rust + WASM

pub mod dispatcher;
pub mod envelope;
pub mod error;
pub mod extension;
pub mod host;
pub mod indicator;
pub mod operations;
pub mod registry;
pub mod settings;
pub mod storage;
pub mod tab_data;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export host normalization for JavaScript access
#[wasm_bindgen]
pub fn get_host(url: &str) -> String {
    host::get_host(url)
}

//! Circlet WASM - WebAssembly bindings for Circlet
//!
//! This crate runs the circlet-core arrange plugin inside a design tool's
//! JavaScript plugin sandbox.
//!
//! # Module Structure
//!
//! - `host` - Adapter from the JS host object to the core scene/UI traits
//! - `plugin` - The `ArrangePlugin` session class
//! - `geometry` - Pure layout and rotation functions for previews
//!
//! # Usage
//!
//! ```typescript
//! import init, { ArrangePlugin } from '@circlet/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const plugin = new ArrangePlugin(host);
//! figma.ui.onmessage = (msg) => plugin.handleMessage(msg);
//! ```

use wasm_bindgen::prelude::*;

mod geometry;
mod host;
mod plugin;

// Re-export public types
pub use geometry::{positions_around, rotation_about};
pub use host::{JsScene, JsUi, PluginHost};
pub use plugin::ArrangePlugin;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        /// Initialize the WASM module (called automatically on load)
        #[wasm_bindgen(start)]
        pub fn init() {
            console_error_panic_hook::set_once();
            init_logger();
        }

        fn init_logger() {
            use wasm_bindgen_console_logger::DEFAULT_LOGGER;
            match log::set_logger(&DEFAULT_LOGGER) {
                Ok(()) => log::set_max_level(log_level()),
                Err(_) => {
                    web_sys::console::warn_1(&JsValue::from_str("circlet: logger already set"))
                }
            }
        }
    } else {
        /// Native builds have no console to log to.
        pub fn init() {}
    }
}

/// Debug logs only in debug builds.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn log_level() -> log::LevelFilter {
    if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

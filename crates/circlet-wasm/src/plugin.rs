//! The plugin entry point exposed to JavaScript.

use crate::host::{JsScene, JsUi, PluginHost};
use circlet_core::{ArrangeConfig, Plugin, RawMessage};
use wasm_bindgen::prelude::*;

/// Parse the optional options object into an [`ArrangeConfig`].
pub(crate) fn parse_config(options: JsValue) -> Result<ArrangeConfig, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(ArrangeConfig::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))
}

/// Parse a panel message.
pub(crate) fn parse_message(message: JsValue) -> Result<RawMessage, JsValue> {
    serde_wasm_bindgen::from_value(message)
        .map_err(|e| JsValue::from_str(&format!("Invalid message: {}", e)))
}

/// One plugin session.
///
/// Constructing it shows the panel; afterwards forward every message the
/// panel posts to [`ArrangePlugin::handle_message`].
///
/// # Example (TypeScript)
///
/// ```typescript
/// import init, { ArrangePlugin } from '@circlet/wasm';
///
/// await init();
/// const plugin = new ArrangePlugin(host, { reportFaults: true });
/// figma.ui.onmessage = (msg) => plugin.handleMessage(msg);
/// ```
#[wasm_bindgen]
pub struct ArrangePlugin {
    inner: Plugin<JsScene, JsUi>,
}

#[wasm_bindgen]
impl ArrangePlugin {
    /// Start a session on `host`, with optional configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(host: PluginHost, options: JsValue) -> Result<ArrangePlugin, JsValue> {
        let config = parse_config(options)?;
        let scene = JsScene::new(host.clone());
        let ui = JsUi::new(host);
        Ok(ArrangePlugin {
            inner: Plugin::start(scene, ui, config),
        })
    }

    /// Handle one message posted by the panel.
    ///
    /// Only malformed messages produce an error; everything else is reported
    /// through the host's notifications.
    #[wasm_bindgen(js_name = handleMessage)]
    pub fn handle_message(&mut self, message: JsValue) -> Result<(), JsValue> {
        let raw = parse_message(message)?;
        self.inner.handle_raw(raw);
        Ok(())
    }

    /// The active configuration as a plain object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.config())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circlet_core::{CenterPolicy, MissingOffsetPolicy};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn object(entries: &[(&str, JsValue)]) -> JsValue {
        let obj = js_sys::Object::new();
        for (key, value) in entries {
            js_sys::Reflect::set(&obj, &JsValue::from_str(key), value).unwrap();
        }
        obj.into()
    }

    #[wasm_bindgen_test]
    fn test_config_defaults_when_absent() {
        assert_eq!(parse_config(JsValue::UNDEFINED).unwrap(), ArrangeConfig::default());
        assert_eq!(parse_config(JsValue::NULL).unwrap(), ArrangeConfig::default());
    }

    #[wasm_bindgen_test]
    fn test_config_partial_object() {
        let options = object(&[
            ("center", JsValue::from_str("selectionBounds")),
            ("missingOffset", JsValue::from_str("report")),
        ]);
        let config = parse_config(options).unwrap();
        assert_eq!(config.center, CenterPolicy::SelectionBounds);
        assert_eq!(config.missing_offset, MissingOffsetPolicy::Report);
        assert!(config.rollback_on_fault);
    }

    #[wasm_bindgen_test]
    fn test_config_invalid() {
        let options = object(&[("center", JsValue::from_str("nowhere"))]);
        assert!(parse_config(options).is_err());
    }

    #[wasm_bindgen_test]
    fn test_message_with_undefined_fields() {
        let msg = object(&[
            ("type", JsValue::from_str("create")),
            ("count", JsValue::from_f64(4.0)),
            ("radius", JsValue::UNDEFINED),
        ]);
        let raw = parse_message(msg).unwrap();
        assert_eq!(raw.kind, "create");
        assert_eq!(raw.count, Some(4.0));
        assert_eq!(raw.radius, None);
        assert_eq!(raw.rad_offset, None);
    }

    #[wasm_bindgen_test]
    fn test_message_rad_offset_name() {
        let msg = object(&[
            ("type", JsValue::from_str("create")),
            ("radOffset", JsValue::from_f64(12.5)),
        ]);
        assert_eq!(parse_message(msg).unwrap().rad_offset, Some(12.5));
    }

    #[wasm_bindgen_test]
    fn test_message_null_offset_is_zero() {
        let msg = object(&[
            ("type", JsValue::from_str("create")),
            ("radOffset", JsValue::NULL),
        ]);
        assert_eq!(parse_message(msg).unwrap().rad_offset, Some(0.0));

        let msg = object(&[
            ("type", JsValue::from_str("create")),
            ("radOffset", JsValue::UNDEFINED),
        ]);
        assert_eq!(parse_message(msg).unwrap().rad_offset, None);
    }

    #[wasm_bindgen_test]
    fn test_message_not_an_object() {
        assert!(parse_message(JsValue::from_f64(3.0)).is_err());
    }
}

//! Adapter from the JavaScript host object to the core collaborator traits.
//!
//! The plugin's JS shim passes one object that wraps the design tool's plugin
//! API. Node handles stay opaque `JsValue`s on the Rust side.
//!
//! # Host object (TypeScript)
//!
//! ```typescript
//! const host = {
//!   selection: () => [...figma.currentPage.selection],
//!   parentOf: (node) => node.parent,
//!   currentPage: () => figma.currentPage,
//!   cloneNode: (node) => node.clone(),
//!   appendChild: (parent, child) => parent.appendChild(child),
//!   boundingBox: (node) => ({ x: node.x, y: node.y, width: node.width,
//!                             height: node.height, rotation: node.rotation }),
//!   setPosition: (node, x, y) => { node.x = x; node.y = y; },
//!   setRelativeTransform: (node, m) => { node.relativeTransform = m; },
//!   group: (nodes, parent) => figma.group(nodes, parent),
//!   remove: (node) => node.remove(),
//!   showUI: () => figma.showUI(__html__),
//!   notify: (message) => figma.notify(message),
//!   closePlugin: (message) => figma.closePlugin(message),
//! };
//! ```

use circlet_core::{BoundingBox, PluginUi, Point2D, SceneError, SceneGraph, Transform};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    /// The JavaScript host object described in the module docs.
    #[derive(Clone, Debug)]
    pub type PluginHost;

    #[wasm_bindgen(method, catch)]
    fn selection(this: &PluginHost) -> Result<js_sys::Array, JsValue>;

    #[wasm_bindgen(method, catch, js_name = parentOf)]
    fn parent_of(this: &PluginHost, node: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = currentPage)]
    fn current_page(this: &PluginHost) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = cloneNode)]
    fn clone_node(this: &PluginHost, node: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = appendChild)]
    fn append_child(this: &PluginHost, parent: &JsValue, child: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = boundingBox)]
    fn bounding_box(this: &PluginHost, node: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = setPosition)]
    fn set_position(this: &PluginHost, node: &JsValue, x: f64, y: f64) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setRelativeTransform)]
    fn set_relative_transform(
        this: &PluginHost,
        node: &JsValue,
        matrix: JsValue,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn group(this: &PluginHost, nodes: &js_sys::Array, parent: &JsValue)
        -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn remove(this: &PluginHost, node: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = showUI)]
    fn show_ui(this: &PluginHost);

    #[wasm_bindgen(method)]
    fn notify(this: &PluginHost, message: &str);

    #[wasm_bindgen(method, js_name = closePlugin)]
    fn close_plugin(this: &PluginHost, message: Option<String>);
}

/// Best-effort text of a thrown JS value.
pub(crate) fn js_error_message(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    format!("{:?}", err)
}

fn host_error(err: JsValue) -> SceneError {
    SceneError::Host(js_error_message(&err))
}

/// `null`/`undefined` become `None`.
fn optional(value: JsValue) -> Option<JsValue> {
    if value.is_null() || value.is_undefined() {
        None
    } else {
        Some(value)
    }
}

/// The host document, seen through [`SceneGraph`].
#[derive(Clone, Debug)]
pub struct JsScene {
    host: PluginHost,
}

impl JsScene {
    pub fn new(host: PluginHost) -> Self {
        Self { host }
    }
}

impl SceneGraph for JsScene {
    type Node = JsValue;

    fn selection(&self) -> Result<Vec<JsValue>, SceneError> {
        Ok(self.host.selection().map_err(host_error)?.iter().collect())
    }

    fn parent(&self, node: &JsValue) -> Result<Option<JsValue>, SceneError> {
        self.host.parent_of(node).map(optional).map_err(host_error)
    }

    fn current_page(&self) -> Result<JsValue, SceneError> {
        self.host.current_page().map_err(host_error)
    }

    fn clone_node(&mut self, node: &JsValue) -> Result<JsValue, SceneError> {
        optional(self.host.clone_node(node).map_err(host_error)?)
            .ok_or_else(|| SceneError::Host("clone returned no node".to_string()))
    }

    fn append_child(&mut self, parent: &JsValue, child: &JsValue) -> Result<(), SceneError> {
        self.host.append_child(parent, child).map_err(host_error)
    }

    fn bounding_box(&self, node: &JsValue) -> Result<BoundingBox, SceneError> {
        let value = self.host.bounding_box(node).map_err(host_error)?;
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| SceneError::Host(format!("invalid bounding box: {}", e)))
    }

    fn set_position(&mut self, node: &JsValue, position: Point2D) -> Result<(), SceneError> {
        self.host
            .set_position(node, position.x, position.y)
            .map_err(host_error)
    }

    fn set_relative_transform(
        &mut self,
        node: &JsValue,
        transform: &Transform,
    ) -> Result<(), SceneError> {
        let matrix = serde_wasm_bindgen::to_value(transform)
            .map_err(|e| SceneError::Host(format!("cannot encode transform: {}", e)))?;
        self.host
            .set_relative_transform(node, matrix)
            .map_err(host_error)
    }

    fn group(&mut self, nodes: &[JsValue], parent: &JsValue) -> Result<JsValue, SceneError> {
        if nodes.is_empty() {
            return Err(SceneError::EmptyGroup);
        }
        let array: js_sys::Array = nodes.iter().collect();
        self.host.group(&array, parent).map_err(host_error)
    }

    fn remove(&mut self, node: &JsValue) -> Result<(), SceneError> {
        self.host.remove(node).map_err(host_error)
    }
}

/// The plugin panel and toasts, seen through [`PluginUi`].
#[derive(Clone, Debug)]
pub struct JsUi {
    host: PluginHost,
}

impl JsUi {
    pub fn new(host: PluginHost) -> Self {
        Self { host }
    }
}

impl PluginUi for JsUi {
    fn show(&mut self) {
        self.host.show_ui();
    }

    fn notify(&mut self, message: &str) {
        self.host.notify(message);
    }

    fn close(&mut self, message: Option<&str>) {
        self.host.close_plugin(message.map(str::to_string));
    }
}

//! One plugin session: panel setup and message dispatch.
//!
//! Messages are handled one at a time on the host's plugin thread. Each
//! create message runs a fresh [`ArrangeOperation`] to completion before the
//! next message is looked at, so no state is shared between invocations.

use crate::arrange::{ArrangeError, ArrangeOperation};
use crate::config::{ArrangeConfig, MissingOffsetPolicy};
use crate::message::{CreateArgs, Message, RawMessage};
use crate::scene::{PluginUi, SceneGraph};
use log::{debug, warn};

pub const SUCCESS_MESSAGE: &str = "successfully created object.";
pub const CANCEL_MESSAGE: &str = "canceled.";

/// How an error is shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Toast notification, the session stays open
    Notify,
    /// End the session with the message as status
    Close,
    /// Log only
    Silent,
}

/// Decide how `err` reaches the user under `config`.
pub fn surface(err: &ArrangeError, config: &ArrangeConfig) -> Surface {
    match err {
        ArrangeError::EmptySelection => Surface::Close,
        ArrangeError::MissingOffset if config.missing_offset == MissingOffsetPolicy::Ignore => {
            Surface::Silent
        }
        ArrangeError::Fault { .. } if !config.report_faults => Surface::Silent,
        _ => Surface::Notify,
    }
}

/// A running plugin session.
pub struct Plugin<S, U> {
    scene: S,
    ui: U,
    config: ArrangeConfig,
}

impl<S: SceneGraph, U: PluginUi> Plugin<S, U> {
    /// Show the panel and start serving messages.
    pub fn start(scene: S, mut ui: U, config: ArrangeConfig) -> Self {
        ui.show();
        debug!("plugin started with {:?}", config);
        Self { scene, ui, config }
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn config(&self) -> &ArrangeConfig {
        &self.config
    }

    /// Handle a message as posted by the panel.
    pub fn handle_raw(&mut self, raw: RawMessage) {
        match Message::try_from(raw) {
            Ok(message) => self.handle(message),
            Err(err) => {
                debug!("unhandled message: {:?}", err);
                self.ui.notify(&err.to_string());
            }
        }
    }

    pub fn handle(&mut self, message: Message) {
        match message {
            Message::Create(args) => self.create(args),
            Message::Cancel => self.ui.close(Some(CANCEL_MESSAGE)),
        }
    }

    fn create(&mut self, args: CreateArgs) {
        let mut operation = ArrangeOperation::new(self.config);
        match operation.run(&mut self.scene, args) {
            Ok(arranged) => {
                debug!("created {} clone(s)", arranged.clones.len());
                self.ui.notify(SUCCESS_MESSAGE);
            }
            Err(err) => self.report(err),
        }
    }

    fn report(&mut self, err: ArrangeError) {
        if !err.is_rejection() {
            warn!("{}", err);
        }
        match surface(&err, &self.config) {
            Surface::Notify => self.ui.notify(&err.to_string()),
            Surface::Close => self.ui.close(Some(&err.to_string())),
            Surface::Silent => debug!("create aborted: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;
    use crate::scene::{MemoryScene, RecordingUi, SceneError, UiEvent};

    fn raw(kind: &str, count: Option<f64>, radius: Option<f64>, offset: Option<f64>) -> RawMessage {
        RawMessage {
            kind: kind.to_string(),
            count,
            radius,
            rad_offset: offset,
        }
    }

    fn plugin_with_selection(config: ArrangeConfig) -> Plugin<MemoryScene, RecordingUi> {
        let mut scene = MemoryScene::new();
        let page = scene.page();
        let a = scene
            .add_shape(page, "A", BoundingBox::new(0.0, 0.0, 10.0, 10.0, 0.0))
            .unwrap();
        let b = scene
            .add_shape(page, "B", BoundingBox::new(20.0, 0.0, 10.0, 10.0, 0.0))
            .unwrap();
        scene.select(&[a, b]);
        Plugin::start(scene, RecordingUi::new(), config)
    }

    #[test]
    fn test_start_shows_panel_once() {
        let plugin = plugin_with_selection(ArrangeConfig::default());
        assert_eq!(plugin.ui().events, vec![UiEvent::Shown]);
    }

    #[test]
    fn test_create_success() {
        let mut plugin = plugin_with_selection(ArrangeConfig::default());
        let nodes_before = plugin.scene().len();

        plugin.handle_raw(raw("create", Some(3.0), Some(40.0), Some(0.0)));

        // Six clones plus one group
        assert_eq!(plugin.scene().len(), nodes_before + 7);
        assert_eq!(plugin.ui().notifications(), vec![SUCCESS_MESSAGE]);
        assert!(plugin.ui().closed().is_none());
    }

    #[test]
    fn test_cancel_closes() {
        let mut plugin = plugin_with_selection(ArrangeConfig::default());
        plugin.handle_raw(raw("cancel", None, None, None));
        assert_eq!(plugin.ui().closed(), Some(&Some(CANCEL_MESSAGE.to_string())));
    }

    #[test]
    fn test_unknown_type_notifies() {
        let mut plugin = plugin_with_selection(ArrangeConfig::default());
        plugin.handle_raw(raw("resize", None, None, None));
        assert_eq!(plugin.ui().notifications(), vec!["no action found."]);
    }

    #[test]
    fn test_validation_errors_notify() {
        let mut plugin = plugin_with_selection(ArrangeConfig::default());
        let nodes_before = plugin.scene().len();

        plugin.handle(Message::Create(CreateArgs {
            count: Some(3.0),
            radius: None,
            angle_offset: Some(0.0),
        }));
        plugin.handle(Message::Create(CreateArgs {
            count: Some(0.0),
            radius: Some(5.0),
            angle_offset: Some(0.0),
        }));

        assert_eq!(
            plugin.ui().notifications(),
            vec!["radius is unset or 0.", "count is unset or 0."]
        );
        assert_eq!(plugin.scene().len(), nodes_before);
    }

    #[test]
    fn test_missing_offset_is_silent_by_default() {
        let mut plugin = plugin_with_selection(ArrangeConfig::default());
        let nodes_before = plugin.scene().len();

        plugin.handle_raw(raw("create", Some(3.0), Some(40.0), None));

        assert_eq!(plugin.ui().events, vec![UiEvent::Shown]);
        assert_eq!(plugin.scene().len(), nodes_before);
    }

    #[test]
    fn test_missing_offset_reported_when_configured() {
        let mut config = ArrangeConfig::default();
        config.missing_offset = MissingOffsetPolicy::Report;
        let mut plugin = plugin_with_selection(config);

        plugin.handle_raw(raw("create", Some(3.0), Some(40.0), None));

        assert_eq!(plugin.ui().notifications(), vec!["angle offset is unset."]);
    }

    #[test]
    fn test_null_offset_creates_with_zero() {
        let mut plugin = plugin_with_selection(ArrangeConfig::default());
        let nodes_before = plugin.scene().len();
        let msg: RawMessage =
            serde_json::from_str(r#"{"type":"create","count":3,"radius":40,"radOffset":null}"#)
                .unwrap();

        plugin.handle_raw(msg);

        assert_eq!(plugin.scene().len(), nodes_before + 7);
        assert_eq!(plugin.ui().notifications(), vec![SUCCESS_MESSAGE]);
    }

    #[test]
    fn test_empty_selection_closes() {
        let mut plugin =
            Plugin::start(MemoryScene::new(), RecordingUi::new(), ArrangeConfig::default());

        plugin.handle_raw(raw("create", Some(3.0), Some(40.0), Some(0.0)));

        assert_eq!(
            plugin.ui().closed(),
            Some(&Some("no object selected.".to_string()))
        );
        assert_eq!(plugin.scene().len(), 1);
    }

    #[test]
    fn test_fault_reported_by_default() {
        let mut plugin = plugin_with_selection(ArrangeConfig::default());
        let nodes_before = plugin.scene().len();
        plugin.scene.fail_clones_after(2);

        plugin.handle_raw(raw("create", Some(3.0), Some(40.0), Some(0.0)));

        let notes = plugin.ui().notifications();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].starts_with("failed to create objects"));
        assert_eq!(plugin.scene().len(), nodes_before);
    }

    #[test]
    fn test_legacy_fault_is_swallowed() {
        let mut plugin = plugin_with_selection(ArrangeConfig::legacy());
        plugin.scene.fail_clones_after(2);

        plugin.handle_raw(raw("create", Some(3.0), Some(40.0), Some(0.0)));

        assert_eq!(plugin.ui().events, vec![UiEvent::Shown]);
    }

    #[test]
    fn test_surface_mapping() {
        let config = ArrangeConfig::default();
        let fault = ArrangeError::Fault {
            source: SceneError::EmptyGroup,
            rolled_back: 0,
        };

        assert_eq!(surface(&ArrangeError::MissingRadius, &config), Surface::Notify);
        assert_eq!(surface(&ArrangeError::EmptySelection, &config), Surface::Close);
        assert_eq!(surface(&ArrangeError::MissingOffset, &config), Surface::Silent);
        assert_eq!(surface(&fault, &config), Surface::Notify);
        assert_eq!(surface(&fault, &ArrangeConfig::legacy()), Surface::Silent);
    }

    #[test]
    fn test_repeated_creates_are_independent() {
        let mut plugin = plugin_with_selection(ArrangeConfig::default());
        let nodes_before = plugin.scene().len();

        plugin.handle_raw(raw("create", Some(2.0), Some(40.0), Some(0.0)));
        plugin.handle_raw(raw("create", Some(2.0), Some(40.0), Some(0.0)));

        // Each run clones 2 objects x 2 steps and adds one group
        assert_eq!(plugin.scene().len(), nodes_before + 10);
        assert_eq!(plugin.ui().notifications().len(), 2);
    }
}

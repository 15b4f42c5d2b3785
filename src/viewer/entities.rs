use bevy::ecs::system::SystemParam;
use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use hexagram_mosaic::view::ViewBox;

use super::ViewerConfig;

/// Marker for the viewer's camera entity.
#[derive(Component, Reflect)]
pub struct ViewerCamera;

/// Requests handled by the viewer, written by input shortcuts and the panel.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerCommand {
    /// Fit the view to the current hexagram.
    ResetView,
    /// Save the fitted hexagram, without the control panel, to a PNG in the
    /// working directory.
    SaveScreenshot,
}

/// View to restore once a pending screenshot has been written.
///
/// While a capture is pending the view is fitted to the hexagram, so the PNG
/// shows the whole star regardless of the current pan and zoom.
#[derive(Resource, Default, Debug)]
pub struct Capture {
    restore: Option<ViewBox>,
}

impl Capture {
    /// Switches `view` to `framing`, remembering the view to go back to. A
    /// request made while another is pending keeps the first saved view.
    pub fn begin(&mut self, view: &mut ViewBox, framing: ViewBox) {
        self.restore.get_or_insert(*view);
        *view = framing;
    }

    /// Puts back the view saved by [`Capture::begin`]. Returns `false` when
    /// no capture was pending.
    pub fn finish(&mut self, view: &mut ViewBox) -> bool {
        match self.restore.take() {
            Some(saved) => {
                *view = saved;
                true
            }
            None => false,
        }
    }

    /// Whether a saved view is waiting to be restored.
    pub fn is_pending(&self) -> bool {
        self.restore.is_some()
    }
}

/// Drag anchor and click timing carried between frames.
#[derive(Default)]
pub struct DragState {
    /// Cursor position at the previous frame of an active drag.
    pub anchor: Option<Vec2>,
    /// Time of the last click that did not complete a double-click.
    pub last_click: Option<f32>,
}

impl DragState {
    /// Records a click at `now` (seconds). Returns `true` when it completes a
    /// double-click, which also consumes the pending click.
    pub fn register_click(&mut self, now: f32, window: f32) -> bool {
        match self.last_click {
            Some(prev) if now - prev <= window => {
                self.last_click = None;
                true
            }
            _ => {
                self.last_click = Some(now);
                false
            }
        }
    }
}

/// Bundled input resources for [`super::systems::navigate`].
#[derive(SystemParam)]
pub struct ViewInput<'w, 's> {
    pub buttons: Res<'w, ButtonInput<MouseButton>>,
    pub wheel: MessageReader<'w, 's, MouseWheel>,
    pub windows: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub egui: Query<'w, 's, &'static mut bevy_egui::EguiContext>,
    pub time: Res<'w, Time>,
    pub cfg: Res<'w, ViewerConfig>,
}

impl ViewInput<'_, '_> {
    /// Whether egui is using the pointer (hovering or dragging a widget).
    pub fn egui_wants_pointer(&mut self) -> bool {
        self.egui.iter_mut().any(|mut ctx| {
            let ctx = ctx.get_mut();
            ctx.wants_pointer_input() || ctx.is_pointer_over_area()
        })
    }
}

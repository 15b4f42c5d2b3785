use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::MouseScrollUnit;
use bevy::prelude::*;
use bevy::render::view::screenshot::{Screenshot, save_to_disk};
use bevy::window::PrimaryWindow;

use hexagram_mosaic::view::ViewBox;

use super::ViewerConfig;
use super::entities::{Capture, DragState, ViewInput, ViewerCamera, ViewerCommand};
use crate::mosaic::RenderModel;

/// Spawns the orthographic camera looking straight down at the drawing plane.
///
/// The default 3D orthographic projection scales by window size, so a scale of
/// `k` shows `k` plane units per logical pixel. Up is `-Z`, so plane `+y`
/// (world `+Z`) runs down the screen.
pub fn spawn_camera(mut commands: Commands, cfg: Res<ViewerConfig>) {
    commands.spawn((
        Name::new("ViewerCamera"),
        Camera3d::default(),
        Tonemapping::None,
        Projection::from(OrthographicProjection::default_3d()),
        Transform::from_xyz(0.0, cfg.camera_height, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z),
        ViewerCamera,
    ));
}

/// Fits the initial view to the configured hexagram.
pub fn fit_view(model: Res<RenderModel>, mut view: ResMut<ViewBox>) {
    *view = fitted(&model);
}

fn fitted(model: &RenderModel) -> ViewBox {
    ViewBox::fitted(model.config.star_layers, model.config.hex_size)
}

/// Whether a screenshot is waiting to be captured. Used as a run condition to
/// keep UI chrome out of the exported image.
pub fn capturing(shots: Query<(), With<Screenshot>>) -> bool {
    !shots.is_empty()
}

/// Restores the pre-capture view once every screenshot has been written.
pub fn finish_capture(
    shots: Query<(), With<Screenshot>>,
    mut capture: ResMut<Capture>,
    mut view: ResMut<ViewBox>,
) {
    if shots.is_empty() && capture.is_pending() && capture.finish(&mut view) {
        debug!("view restored after capture");
    }
}

/// Left-drag pan, wheel zoom about the cursor, double-click reset.
pub fn navigate(
    mut input: ViewInput,
    mut view: ResMut<ViewBox>,
    mut commands: MessageWriter<ViewerCommand>,
    mut drag: Local<DragState>,
) {
    let egui_busy = input.egui_wants_pointer();
    let Ok(window) = input.windows.single() else {
        return;
    };
    let viewport = Vec2::new(window.width(), window.height());
    let cursor = window.cursor_position();

    let lines: f32 = input
        .wheel
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / 40.0,
        })
        .sum();
    if lines != 0.0
        && !egui_busy
        && let Some(cursor) = cursor
    {
        view.zoom_at(cursor, viewport, ViewBox::wheel_factor(lines));
    }

    if input.buttons.just_pressed(MouseButton::Left) && !egui_busy {
        drag.anchor = cursor;
        let now = input.time.elapsed_secs();
        if drag.register_click(now, input.cfg.double_click_secs) {
            commands.write(ViewerCommand::ResetView);
        }
    }
    if input.buttons.just_released(MouseButton::Left) {
        drag.anchor = None;
    }

    if let (Some(prev), Some(current)) = (drag.anchor, cursor)
        && input.buttons.pressed(MouseButton::Left)
        && prev != current
    {
        view.pan(current - prev, viewport);
        drag.anchor = Some(current);
    }
}

/// `R` resets the view, `P` saves a screenshot.
pub fn shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    mut commands: MessageWriter<ViewerCommand>,
) {
    let typing = egui_ctx
        .iter_mut()
        .any(|mut ctx| ctx.get_mut().wants_keyboard_input());
    if typing {
        return;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        commands.write(ViewerCommand::ResetView);
    }
    if keys.just_pressed(KeyCode::KeyP) {
        commands.write(ViewerCommand::SaveScreenshot);
    }
}

/// Applies queued [`ViewerCommand`]s.
pub fn handle_commands(
    mut commands: Commands,
    mut requests: MessageReader<ViewerCommand>,
    mut view: ResMut<ViewBox>,
    mut capture: ResMut<Capture>,
    model: Res<RenderModel>,
) {
    for request in requests.read() {
        match request {
            ViewerCommand::ResetView => {
                *view = fitted(&model);
                debug!("view reset to {:?}", *view);
            }
            ViewerCommand::SaveScreenshot => {
                let path = model.config.screenshot_file_name();
                info!("saving screenshot to {path}");
                capture.begin(&mut view, fitted(&model));
                commands
                    .spawn(Screenshot::primary_window())
                    .observe(save_to_disk(path));
            }
        }
    }
}

/// Moves and scales the camera so it shows exactly the [`ViewBox`].
pub fn sync_camera(
    view: Res<ViewBox>,
    cfg: Res<ViewerConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut camera: Query<(&mut Transform, &mut Projection), With<ViewerCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((mut transform, mut projection)) = camera.single_mut() else {
        return;
    };

    let center = view.center();
    let translation = Vec3::new(center.x, cfg.camera_height, center.y);
    if transform.translation != translation {
        transform.translation = translation;
    }

    let scale = view.units_per_pixel(Vec2::new(window.width(), window.height()));
    let stale = matches!(&*projection, Projection::Orthographic(ortho) if ortho.scale != scale);
    if stale && let Projection::Orthographic(ortho) = &mut *projection {
        ortho.scale = scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexagram_mosaic::HexagramConfig;

    fn capture_app() -> App {
        let mut app = App::new();
        app.insert_resource(RenderModel::build(&HexagramConfig::default()))
            .init_resource::<Capture>()
            .init_resource::<ViewBox>()
            .add_systems(Update, finish_capture);
        app
    }

    fn pan(app: &mut App) -> ViewBox {
        let mut view = app.world_mut().resource_mut::<ViewBox>();
        view.pan(Vec2::new(200.0, 50.0), Vec2::new(800.0, 600.0));
        *view
    }

    fn begin_capture(app: &mut App) {
        let framing = fitted(app.world().resource::<RenderModel>());
        app.world_mut()
            .resource_scope(|world, mut capture: Mut<Capture>| {
                capture.begin(&mut world.resource_mut::<ViewBox>(), framing);
            });
    }

    // ── finish_capture ──────────────────────────────────────────────

    #[test]
    fn view_stays_framed_while_screenshot_pending() {
        let mut app = capture_app();
        pan(&mut app);
        begin_capture(&mut app);
        app.world_mut().spawn(Screenshot::primary_window());

        app.update();

        let framing = fitted(app.world().resource::<RenderModel>());
        assert_eq!(*app.world().resource::<ViewBox>(), framing);
        assert!(app.world().resource::<Capture>().is_pending());
    }

    #[test]
    fn view_restored_after_screenshot_written() {
        let mut app = capture_app();
        let panned = pan(&mut app);
        begin_capture(&mut app);
        let shot = app.world_mut().spawn(Screenshot::primary_window()).id();
        app.update();

        assert!(app.world_mut().despawn(shot));
        app.update();

        assert_eq!(*app.world().resource::<ViewBox>(), panned);
        assert!(!app.world().resource::<Capture>().is_pending());
    }

    // ── capturing ───────────────────────────────────────────────────

    #[test]
    fn capturing_tracks_pending_screenshots() {
        let mut app = App::new();
        let condition = app.world_mut().register_system(capturing);
        assert_eq!(app.world_mut().run_system(condition).ok(), Some(false));

        app.world_mut().spawn(Screenshot::primary_window());
        assert_eq!(app.world_mut().run_system(condition).ok(), Some(true));
    }
}

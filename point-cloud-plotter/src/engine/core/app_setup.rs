use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;

use crate::engine::camera::viewport_camera::{
    ViewportSettings, ViewportState, apply_orbit_transform, orbit_controls,
    sync_viewport_to_window,
};
use crate::engine::core::app_state::{
    FrameSet, FrameStats, OverlayState, RenderLoopState, log_render_loop_started,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::systems::fps_tracking::{
    PerformanceCounter, fps_notification_system, refresh_performance_counter,
};
use crate::engine::systems::input_bridge::{
    InputEvent, PlotFeedback, SceneRebuild, dispatch_input_events, keyboard_input_bridge,
    rebuild_plot,
};
use crate::engine::systems::overlay::publish_overlay_state;
use crate::engine::systems::render_loop::submit_frame;
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::loading::native_payload::{
    PayloadPath, plot_dropped_files, plot_payload_from_args,
};
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::overlay::{
    apply_overlay_visibility, create_native_overlays, update_input_overlay_message,
};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(PlotterPlugin);

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.insert_resource(PayloadPath::from_args())
            .add_systems(Startup, (create_native_overlays, plot_payload_from_args))
            .add_systems(Update, plot_dropped_files.in_set(FrameSet::Collect))
            .add_systems(
                Update,
                (
                    apply_overlay_visibility,
                    update_input_overlay_message,
                    fps_text_update_system,
                )
                    .in_set(FrameSet::Publish),
            );
    }

    app
}

/// Platform-independent plotter: input bridge, scene rebuild and the
/// render loop. Expects windowing, input, assets and states to be provided
/// by the surrounding plugins.
pub struct PlotterPlugin;

impl Plugin for PlotterPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<RenderLoopState>()
            .init_resource::<ViewportSettings>()
            .init_resource::<ViewportState>()
            .init_resource::<OverlayState>()
            .init_resource::<PlotFeedback>()
            .init_resource::<PerformanceCounter>()
            .init_resource::<FrameStats>()
            .add_event::<InputEvent>()
            .add_event::<SceneRebuild>()
            .add_plugins(WebRpcPlugin);

        app.configure_sets(
            Update,
            (
                FrameSet::Collect,
                FrameSet::Dispatch,
                FrameSet::Rebuild,
                FrameSet::Controls,
                FrameSet::Overlay,
                FrameSet::Draw,
                FrameSet::Publish,
                FrameSet::Flush,
            )
                .chain(),
        )
        .configure_sets(
            Update,
            (FrameSet::Controls, FrameSet::Overlay, FrameSet::Draw)
                .run_if(in_state(RenderLoopState::Running)),
        );

        app.add_systems(Update, keyboard_input_bridge.in_set(FrameSet::Collect))
            .add_systems(Update, dispatch_input_events.in_set(FrameSet::Dispatch))
            .add_systems(
                Update,
                (sync_viewport_to_window, rebuild_plot)
                    .chain()
                    .in_set(FrameSet::Rebuild),
            )
            // Render loop: controls, overlay counter, draw. Fixed order, every frame.
            .add_systems(Update, orbit_controls.in_set(FrameSet::Controls))
            .add_systems(
                Update,
                (refresh_performance_counter, fps_notification_system)
                    .chain()
                    .in_set(FrameSet::Overlay),
            )
            .add_systems(
                Update,
                (apply_orbit_transform, submit_frame)
                    .chain()
                    .in_set(FrameSet::Draw),
            )
            .add_systems(
                Update,
                (log_render_loop_started, publish_overlay_state).in_set(FrameSet::Publish),
            );
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

#[cfg(test)]
pub(crate) mod test_support {
    use bevy::input::gestures::PinchGesture;
    use bevy::input::mouse::{MouseMotion, MouseWheel};
    use bevy::state::app::StatesPlugin;
    use bevy::window::{FileDragAndDrop, WindowResized};

    use super::*;

    /// Headless app running the plotter without a window or renderer. Input
    /// resources are registered bare so tests control key state directly.
    pub fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .add_event::<MouseMotion>()
            .add_event::<MouseWheel>()
            .add_event::<PinchGesture>()
            .add_event::<WindowResized>()
            .add_event::<FileDragAndDrop>()
            .add_plugins(PlotterPlugin);
        app
    }

    pub fn plot(app: &mut App, payload: &str) {
        app.world_mut().send_event(InputEvent::plot(payload));
        app.update();
    }

    /// Press and release `key` around one frame.
    pub fn tap(app: &mut App, key: KeyCode) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
        app.update();

        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.release(key);
        keyboard.clear();
    }
}

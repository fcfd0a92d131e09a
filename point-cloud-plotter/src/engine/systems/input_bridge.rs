use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use serde_json::json;

use crate::engine::camera::viewport_camera::{
    ViewportSettings, ViewportState, current_viewport_size, spawn_viewport,
};
use crate::engine::core::app_state::{OverlayState, RenderLoopState};
use crate::engine::loading::point_data::{PointRecord, parse_point_payload};
use crate::engine::scene::PlotEntity;
use crate::engine::scene::palette::label_range_warnings;
use crate::engine::scene::point_markers::build_scene;
use crate::rpc::web_rpc::{RpcError, WebRpcInterface};

/// Everything the user can ask of the plotter, from any input source.
#[derive(Event, Debug, Clone)]
pub enum InputEvent {
    /// Plot the given text; `reply_to` is the RPC request id, if any.
    Plot {
        payload: String,
        reply_to: Option<serde_json::Value>,
    },
    ToggleInputOverlay,
    TogglePerformanceOverlay,
    /// Reserved key, intentionally does nothing yet.
    CameraNudge,
}

impl InputEvent {
    pub fn plot(payload: impl Into<String>) -> Self {
        Self::Plot {
            payload: payload.into(),
            reply_to: None,
        }
    }
}

/// A parsed payload ready to replace the current scene.
#[derive(Event, Debug, Clone)]
pub struct SceneRebuild {
    pub records: Vec<PointRecord>,
}

/// Outcome of the most recent plot attempt, shown on the input overlay.
#[derive(Resource, Debug, Default)]
pub struct PlotFeedback {
    pub last_error: Option<String>,
    pub markers: usize,
}

pub fn keyboard_input_bridge(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input_events: EventWriter<InputEvent>,
) {
    if keyboard.just_pressed(KeyCode::KeyO) {
        input_events.write(InputEvent::ToggleInputOverlay);
    }

    if keyboard.just_pressed(KeyCode::KeyP) {
        input_events.write(InputEvent::TogglePerformanceOverlay);
    }

    if keyboard.just_pressed(KeyCode::KeyZ) {
        input_events.write(InputEvent::CameraNudge);
    }
}

/// Apply this frame's input in arrival order. A rejected payload is reported
/// and changes nothing.
pub fn dispatch_input_events(
    mut input_events: EventReader<InputEvent>,
    mut overlay: ResMut<OverlayState>,
    mut feedback: ResMut<PlotFeedback>,
    mut rebuilds: EventWriter<SceneRebuild>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in input_events.read() {
        match event {
            InputEvent::Plot { payload, reply_to } => match parse_point_payload(payload) {
                Ok(records) => {
                    let warnings = label_range_warnings(&records);
                    for warning in &warnings {
                        warn!("{}", warning);
                    }
                    info!("Plotting {} points", records.len());

                    overlay.input_visible = false;
                    feedback.last_error = None;
                    feedback.markers = records.len();

                    if let Some(id) = reply_to {
                        rpc_interface.respond(
                            id.clone(),
                            Ok(json!({
                                "success": true,
                                "markers": records.len(),
                                "warnings": warnings
                                    .iter()
                                    .map(ToString::to_string)
                                    .collect::<Vec<_>>(),
                            })),
                        );
                    }
                    rebuilds.write(SceneRebuild { records });
                }
                Err(err) => {
                    error!("Plot rejected: {}", err);
                    let message = err.to_string();

                    rpc_interface.send_notification("plot_failed", json!({ "message": message }));
                    if let Some(id) = reply_to {
                        rpc_interface.respond(id.clone(), Err(RpcError::invalid_params(&message)));
                    }
                    feedback.last_error = Some(message);
                }
            },
            InputEvent::ToggleInputOverlay => {
                let visible = overlay.toggle_input();
                info!("Input overlay {}", if visible { "shown" } else { "hidden" });
            }
            InputEvent::TogglePerformanceOverlay => {
                let visible = overlay.toggle_performance();
                info!("Performance overlay {}", if visible { "shown" } else { "hidden" });
            }
            InputEvent::CameraNudge => {
                debug!("Camera nudge key pressed (reserved)");
            }
        }
    }
}

/// Replace the previous plot wholesale: scene, camera and controls. Only the
/// last rebuild of a frame is built.
pub fn rebuild_plot(
    mut commands: Commands,
    mut rebuilds: EventReader<SceneRebuild>,
    previous: Query<Entity, With<PlotEntity>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<ViewportSettings>,
    mut viewport: ResMut<ViewportState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    state: Res<State<RenderLoopState>>,
    mut next_state: ResMut<NextState<RenderLoopState>>,
) {
    let Some(rebuild) = rebuilds.read().last() else {
        return;
    };

    for entity in &previous {
        commands.entity(entity).despawn();
    }

    current_viewport_size(&windows, &mut viewport);
    let camera = spawn_viewport(&mut commands, &settings, &viewport);
    let markers = build_scene(
        &mut commands,
        &mut meshes,
        &mut materials,
        &rebuild.records,
        camera,
    );
    info!("Scene rebuilt with {} markers", markers);

    if *state.get() == RenderLoopState::Idle {
        info!("→ Transitioning to Running state");
        next_state.set(RenderLoopState::Running);
    }
}

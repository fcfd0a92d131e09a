use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use constants::render_settings::FPS_NOTIFY_INTERVAL_SECS;

use crate::engine::core::app_state::{FpsText, OverlayState};
use crate::rpc::web_rpc::WebRpcInterface;

/// Latest smoothed frame rate, refreshed once per render loop cycle.
#[derive(Resource, Debug, Default)]
pub struct PerformanceCounter {
    pub fps: Option<f64>,
}

/// Render loop step 2.
pub fn refresh_performance_counter(
    diagnostics: Option<Res<DiagnosticsStore>>,
    mut counter: ResMut<PerformanceCounter>,
) {
    counter.fps = diagnostics.and_then(|diagnostics| {
        diagnostics
            .get(&FrameTimeDiagnosticsPlugin::FPS)
            .and_then(|fps| fps.smoothed())
    });
}

pub fn fps_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    counter: Res<PerformanceCounter>,
    overlay: Res<OverlayState>,
    mut last_send_time: Local<f32>,
    time: Res<Time>,
) {
    if !overlay.performance_visible {
        return;
    }

    let current_time = time.elapsed_secs();

    if current_time - *last_send_time >= FPS_NOTIFY_INTERVAL_SECS {
        if let Some(value) = counter.fps {
            rpc_interface.send_notification(
                "fps_update",
                serde_json::json!({
                    "fps": value as f32
                }),
            );
            *last_send_time = current_time;
        }
    }
}

pub fn fps_text_update_system(
    counter: Res<PerformanceCounter>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    let Some(value) = counter.fps else {
        return;
    };

    for mut text in &mut query {
        text.0 = format!("FPS: {value:.1}");
    }
}

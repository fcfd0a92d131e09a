use bevy::prelude::*;
use serde_json::json;

use super::input_bridge::PlotFeedback;
use crate::engine::core::app_state::{
    FpsText, InputOverlayMessage, InputOverlayPanel, OverlayState,
};
use crate::rpc::web_rpc::WebRpcInterface;

const INPUT_HELP: &str = "Pass a JSON payload of [x, y, z, label] tuples as the first argument, \
or drop a payload file onto this window.\nO: toggle this panel    P: toggle FPS";

/// Tell the page about overlay changes; the browser owns its own panels.
pub fn publish_overlay_state(
    overlay: Res<OverlayState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut published: Local<Option<OverlayState>>,
) {
    let previous = published.replace(*overlay);

    if previous.map(|p| p.input_visible) != Some(overlay.input_visible) {
        rpc_interface.send_notification(
            "input_overlay_changed",
            json!({ "visible": overlay.input_visible }),
        );
    }

    if previous.map(|p| p.performance_visible) != Some(overlay.performance_visible) {
        rpc_interface.send_notification(
            "performance_overlay_changed",
            json!({ "visible": overlay.performance_visible }),
        );
    }
}

fn visibility(visible: bool) -> Visibility {
    if visible {
        Visibility::Visible
    } else {
        Visibility::Hidden
    }
}

/// Mirror `OverlayState` onto the native overlay widgets.
pub fn apply_overlay_visibility(
    overlay: Res<OverlayState>,
    mut input_panels: Query<&mut Visibility, (With<InputOverlayPanel>, Without<FpsText>)>,
    mut fps_texts: Query<&mut Visibility, (With<FpsText>, Without<InputOverlayPanel>)>,
) {
    if !overlay.is_changed() {
        return;
    }

    for mut panel in &mut input_panels {
        *panel = visibility(overlay.input_visible);
    }
    for mut text in &mut fps_texts {
        *text = visibility(overlay.performance_visible);
    }
}

pub fn update_input_overlay_message(
    feedback: Res<PlotFeedback>,
    mut messages: Query<&mut Text, With<InputOverlayMessage>>,
) {
    if !feedback.is_changed() {
        return;
    }

    let message = match &feedback.last_error {
        Some(err) => format!("{INPUT_HELP}\n\n{err}"),
        None => INPUT_HELP.to_string(),
    };
    for mut text in &mut messages {
        text.0.clone_from(&message);
    }
}

/// Native stand-ins for the page's input panel and stats widget.
pub fn create_native_overlays(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        top: Val::Px(12.0),
                        left: Val::Px(12.0),
                        padding: UiRect::all(Val::Px(12.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.75)),
                    Visibility::Visible,
                    InputOverlayPanel,
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new(INPUT_HELP),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        InputOverlayMessage,
                    ));
                });

            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                Visibility::Hidden,
                FpsText,
            ));
        });
}

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::input::gestures::PinchGesture;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy::window::{PrimaryWindow, WindowResized};
use constants::render_settings::{
    CLEAR_COLOUR, DEFAULT_CAMERA_POSITION, DEFAULT_CAMERA_TARGET, DEFAULT_VIEWPORT_SIZE,
    FAR_PLANE, NEAR_PLANE, VIEW_ANGLE_DEGREES,
};

use crate::engine::scene::PlotEntity;

/// Keeps the camera from flipping over the poles.
const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;
/// Dolly factor per wheel line, as in a three.js style orbit control.
const ZOOM_BASE: f32 = 0.95;
const PIXELS_PER_LINE: f32 = 20.0;
const PINCH_TO_LINES: f32 = 10.0;

/// Camera and projection parameters used whenever a viewport is created.
#[derive(Resource, Debug, Clone)]
pub struct ViewportSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub clear_color: Color,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        let [r, g, b] = CLEAR_COLOUR;
        Self {
            fov_degrees: VIEW_ANGLE_DEGREES,
            near: NEAR_PLANE,
            far: FAR_PLANE,
            camera_position: Vec3::from_array(DEFAULT_CAMERA_POSITION),
            camera_target: Vec3::from_array(DEFAULT_CAMERA_TARGET),
            clear_color: Color::srgb_u8(r, g, b),
        }
    }
}

impl ViewportSettings {
    pub fn perspective(&self, aspect_ratio: f32) -> PerspectiveProjection {
        PerspectiveProjection {
            fov: self.fov_degrees.to_radians(),
            aspect_ratio,
            near: self.near,
            far: self.far,
        }
    }
}

/// Last known size of the drawing surface in logical pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportState {
    fn default() -> Self {
        let [width, height] = DEFAULT_VIEWPORT_SIZE;
        Self { width, height }
    }
}

impl ViewportState {
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Returns false for degenerate sizes, which are ignored.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if width <= 0.0 || height <= 0.0 {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }
}

#[derive(Component)]
pub struct PlotCamera;

/// Orbit state around `target`, in spherical coordinates.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub radius: f32,
    /// Angle about +Y, zero looking down -Z.
    pub yaw: f32,
    /// Elevation above the target's horizontal plane.
    pub pitch: f32,
    pub rotate_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl OrbitControls {
    pub fn looking_from(position: Vec3, target: Vec3, min_radius: f32, max_radius: f32) -> Self {
        let offset = position - target;
        let radius = offset.length().clamp(min_radius, max_radius);
        Self {
            target,
            radius,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / radius).clamp(-1.0, 1.0).asin(),
            rotate_speed: 1.0,
            min_radius,
            max_radius,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + self.radius * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn camera_transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }

    /// Drag by `delta` pixels; a full viewport height of drag is one turn.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        let radians_per_pixel = TAU / viewport_height.max(1.0) * self.rotate_speed;
        self.yaw -= delta.x * radians_per_pixel;
        self.pitch = (self.pitch + delta.y * radians_per_pixel).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Move the target in the view plane so the point under the cursor
    /// follows the drag.
    pub fn pan(&mut self, delta: Vec2, viewport_height: f32, fov: f32) {
        let world_per_pixel = 2.0 * self.radius * (fov * 0.5).tan() / viewport_height.max(1.0);
        let rotation = self.camera_transform().rotation;
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        self.target += (up * delta.y - right * delta.x) * world_per_pixel;
    }

    /// Positive `lines` move toward the target.
    pub fn zoom(&mut self, lines: f32) {
        self.radius = (self.radius * ZOOM_BASE.powf(lines)).clamp(self.min_radius, self.max_radius);
    }
}

/// Spawn a fresh plot camera bound to orbit controls. Any previous camera is
/// expected to have been despawned with the rest of the plot.
pub fn spawn_viewport(
    commands: &mut Commands,
    settings: &ViewportSettings,
    viewport: &ViewportState,
) -> Entity {
    let controls = OrbitControls::looking_from(
        settings.camera_position,
        settings.camera_target,
        settings.near * 10.0,
        settings.far * 0.5,
    );

    commands
        .spawn((
            Camera3d::default(),
            Camera {
                clear_color: ClearColorConfig::Custom(settings.clear_color),
                ..default()
            },
            Projection::Perspective(settings.perspective(viewport.aspect_ratio())),
            controls.camera_transform(),
            controls,
            PlotCamera,
            PlotEntity,
        ))
        .id()
}

/// Read the primary window's size, if there is one, before a viewport is built.
pub fn current_viewport_size(
    windows: &Query<&Window, With<PrimaryWindow>>,
    viewport: &mut ViewportState,
) {
    if let Ok(window) = windows.single() {
        viewport.resize(window.width(), window.height());
    }
}

/// Keep the aspect ratio and recorded surface size in step with the window.
pub fn sync_viewport_to_window(
    mut resized: EventReader<WindowResized>,
    mut viewport: ResMut<ViewportState>,
    mut projections: Query<&mut Projection, With<PlotCamera>>,
) {
    let Some(latest) = resized.read().last() else {
        return;
    };

    if !viewport.resize(latest.width, latest.height) {
        return;
    }

    let aspect_ratio = viewport.aspect_ratio();
    for mut projection in &mut projections {
        if let Projection::Perspective(perspective) = &mut *projection {
            perspective.aspect_ratio = aspect_ratio;
        }
    }
}

/// Render loop step 1: fold this frame's pointer input into the orbit state.
pub fn orbit_controls(
    mut cameras: Query<(&mut OrbitControls, &Projection), With<PlotCamera>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    mut pinch_events: EventReader<PinchGesture>,
    viewport: Res<ViewportState>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    let mut scroll_lines = 0.0;
    for ev in scroll_events.read() {
        scroll_lines += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / PIXELS_PER_LINE,
        };
    }
    scroll_lines += pinch_events.read().map(|p| p.0 * PINCH_TO_LINES).sum::<f32>();

    let Ok((mut controls, projection)) = cameras.single_mut() else {
        return;
    };

    if mouse_delta != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Left) {
            controls.rotate(mouse_delta, viewport.height);
        } else if mouse_button.pressed(MouseButton::Right) {
            let fov = match projection {
                Projection::Perspective(perspective) => perspective.fov,
                _ => VIEW_ANGLE_DEGREES.to_radians(),
            };
            controls.pan(mouse_delta, viewport.height, fov);
        }
    }

    if scroll_lines.abs() > f32::EPSILON {
        controls.zoom(scroll_lines);
    }
}

/// Render loop step 3: place the camera where the controls say it is.
pub fn apply_orbit_transform(
    mut cameras: Query<
        (&mut Transform, &OrbitControls),
        (With<PlotCamera>, Changed<OrbitControls>),
    >,
) {
    for (mut transform, controls) in &mut cameras {
        *transform = controls.camera_transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_controls() -> OrbitControls {
        let settings = ViewportSettings::default();
        OrbitControls::looking_from(
            settings.camera_position,
            settings.camera_target,
            1.0,
            10_000.0,
        )
    }

    #[test]
    fn default_camera_sits_in_front_of_the_target() {
        let controls = default_controls();

        assert_eq!(controls.target, Vec3::new(0.0, 100.0, 0.0));
        assert!((controls.radius - 500.0).abs() < 1e-3);
        assert!(controls.eye().distance(Vec3::new(0.0, 100.0, 500.0)) < 1e-2);

        let forward = controls.camera_transform().forward();
        assert!(forward.dot(Vec3::NEG_Z) > 0.999);
    }

    #[test]
    fn rotating_keeps_distance_to_target() {
        let mut controls = default_controls();
        controls.rotate(Vec2::new(120.0, -45.0), 720.0);

        assert!((controls.eye().distance(controls.target) - 500.0).abs() < 1e-2);
        assert!(controls.yaw < 0.0);
        assert!(controls.pitch < 0.0);
    }

    #[test]
    fn pitch_stops_short_of_the_pole() {
        let mut controls = default_controls();
        controls.rotate(Vec2::new(0.0, 10_000.0), 720.0);

        assert_eq!(controls.pitch, MAX_PITCH);
        assert!(controls.camera_transform().translation.is_finite());
    }

    #[test]
    fn zoom_moves_toward_target_and_clamps() {
        let mut controls = default_controls();
        controls.zoom(1.0);
        assert!((controls.radius - 475.0).abs() < 1e-3);

        controls.zoom(1_000.0);
        assert_eq!(controls.radius, 1.0);
        controls.zoom(-1_000.0);
        assert_eq!(controls.radius, 10_000.0);
    }

    #[test]
    fn pan_moves_target_and_eye_together() {
        let mut controls = default_controls();
        let offset_before = controls.eye() - controls.target;

        controls.pan(Vec2::new(30.0, 0.0), 720.0, 45f32.to_radians());

        assert!(controls.target.x < 0.0);
        assert!((controls.eye() - controls.target).distance(offset_before) < 1e-3);
    }

    #[test]
    fn degenerate_sizes_are_ignored() {
        let mut viewport = ViewportState::default();
        assert!(!viewport.resize(800.0, 0.0));
        assert_eq!(viewport, ViewportState::default());

        assert!(viewport.resize(800.0, 600.0));
        assert_eq!(viewport.aspect_ratio(), 800.0 / 600.0);
    }

    #[test]
    fn perspective_uses_configured_fov_and_planes() {
        let settings = ViewportSettings::default();
        let perspective = settings.perspective(2.0);

        assert_eq!(perspective.fov, 45f32.to_radians());
        assert_eq!(perspective.aspect_ratio, 2.0);
        assert_eq!(perspective.near, NEAR_PLANE);
        assert_eq!(perspective.far, FAR_PLANE);
    }
}

/// Vertical field of view in degrees.
pub const VIEW_ANGLE_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 20_000.0;

pub const DEFAULT_CAMERA_POSITION: [f32; 3] = [0.0, 100.0, 500.0];
pub const DEFAULT_CAMERA_TARGET: [f32; 3] = [0.0, 100.0, 0.0];

/// Viewport size assumed until a window reports its own.
pub const DEFAULT_VIEWPORT_SIZE: [f32; 2] = [1280.0, 720.0];

pub const CLEAR_COLOUR: [u8; 3] = [0xff, 0xff, 0xff];

pub const FOG_COLOUR: [u8; 3] = [0x99, 0x99, 0xff];
pub const FOG_DENSITY: f32 = 0.000_25;

pub const MARKER_RADIUS: f32 = 5.0;
pub const MARKER_SEGMENTS: u32 = 32;

/// Half side length of the square reference loop on the ground.
pub const REFERENCE_PLANE_HALF_EXTENT: f32 = 100.0;
pub const REFERENCE_PLANE_COLOUR: [u8; 3] = [0x00, 0x00, 0x00];

/// Seconds between FPS notifications while the performance panel is shown.
pub const FPS_NOTIFY_INTERVAL_SECS: f32 = 0.5;

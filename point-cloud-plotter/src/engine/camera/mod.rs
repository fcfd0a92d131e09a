//! Viewport camera with orbit controls and resize tracking.
//!
//! Owns the camera, its perspective projection and the pointer bindings
//! that rotate, pan and dolly it around a fixed target.

pub mod viewport_camera;

//! Turning textual payloads into point records.

/// JSON payload parsing into `PointRecord`s.
pub mod point_data;

/// Native payload sources: command line file and window file drops.
#[cfg(not(target_arch = "wasm32"))]
pub mod native_payload;

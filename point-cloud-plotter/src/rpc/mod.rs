//! JSON-RPC 2.0 communication layer between the plotter and its host page.
//!
//! The page posts requests and notifications with `postMessage`; the engine
//! answers requests with matching ids and pushes notifications back.
//!
//! ## Message Flow
//!
//! ```text
//! index.html (textarea, panels)  <──postMessage──>  Bevy (canvas)
//!        │                                              │
//!        ├─ plot { payload } (with ID) ───────────────> │
//!        │                                              ├─ Parse, rebuild scene
//!        │ <──────────────── Response (markers/error) ─┤
//!        │                                              │
//!        │ <───── input_overlay_changed / fps_update ──┤
//! ```
//!
//! ## Methods
//!
//! - `plot`: `{ "payload": "[[x, y, z, label], ...]" }`, answered with
//!   `{ success, markers, warnings }` or error `-32602` for invalid point data
//! - `toggle_input_overlay`, `toggle_performance_overlay`
//! - `get_fps`: current smoothed frame rate
//! - `get_palette`: palette colours in label order
//!
//! ## Notifications
//!
//! - `input_overlay_changed`, `performance_overlay_changed`: `{ visible }`
//! - `fps_update`: `{ fps }` while the performance overlay is visible
//! - `plot_failed`: `{ message }`
//! - `render_context_failed`: `{ message }`, sent once if WebGPU is missing
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params (including invalid point data)

/// JSON-RPC 2.0 bidirectional communication system for the host page.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;

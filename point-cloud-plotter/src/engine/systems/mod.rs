//! Per-frame systems driving the plotter.
//!
//! Input dispatch, the render loop cycle, performance tracking and overlay
//! visibility.

/// FPS tracking for the performance overlay.
///
/// Sends frame rate updates to the page via RPC and updates the native text overlay.
pub mod fps_tracking;

/// Keyboard and payload input funnelled into one event stream, plus the
/// plot rebuild it triggers.
pub mod input_bridge;

/// Overlay panel visibility, native overlay widgets and page notifications.
pub mod overlay;

/// Frame submission for the running render loop.
pub mod render_loop;

//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, render loop state
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the plotter plugin and platform-specific input sources.
pub mod app_setup;

/// Render loop state machine, frame ordering and overlay state.
pub mod app_state;

/// Platform-specific window configuration and render context probing.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;

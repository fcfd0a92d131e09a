//! Fixed configuration shared by the plotter: palette, render settings and
//! the data-to-render coordinate remap.

pub mod class;
pub mod coordinate_system;
pub mod render_settings;

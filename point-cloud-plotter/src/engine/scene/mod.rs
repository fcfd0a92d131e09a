//! Scene construction for a plot.
//!
//! Provides the label palette, the ground reference loop, and the marker
//! builder that replaces the whole plotted scene on every plot.

/// Class label to colour mapping.
pub mod palette;

/// Disc markers, fog and wholesale scene replacement.
pub mod point_markers;

/// Static square line loop marking the ground plane.
pub mod reference_plane;

use bevy::prelude::*;

/// Tags everything a plot creates, camera included, so the next plot can
/// remove the previous generation in one sweep.
#[derive(Component)]
pub struct PlotEntity;

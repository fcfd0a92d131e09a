use bevy::prelude::*;

use crate::engine::core::app_state::FrameStats;

/// Render loop step 3. Bevy's render sub-app draws the extracted scene right
/// after `Update`; this records that a frame was submitted for it.
pub fn submit_frame(mut stats: ResMut<FrameStats>) {
    stats.frames_drawn += 1;
}

use bevy::prelude::*;

/// Render loop lifecycle. There is no way back to `Idle` once a plot succeeds.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum RenderLoopState {
    #[default]
    Idle,
    Running,
}

/// Ordered stages of a frame in `Update`.
///
/// Input is collected and dispatched first so that a re-plot replaces the
/// scene and viewport before the render loop touches them.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Keyboard, RPC and file-drop input become `InputEvent`s.
    Collect,
    /// `InputEvent`s are applied in arrival order.
    Dispatch,
    /// Scene and viewport are replaced after a successful plot.
    Rebuild,
    /// Render loop step 1: advance orbit control state.
    Controls,
    /// Render loop step 2: refresh the performance counter.
    Overlay,
    /// Render loop step 3: submit the frame.
    Draw,
    /// Overlay state is published to widgets and the outgoing queue.
    Publish,
    /// Queued RPC messages are sent to the page.
    Flush,
}

/// Visibility of the two overlay panels. Only key presses and RPC toggles
/// mutate it, plus a successful plot hiding the input panel.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayState {
    pub input_visible: bool,
    pub performance_visible: bool,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            input_visible: true,
            performance_visible: false,
        }
    }
}

impl OverlayState {
    pub fn toggle_input(&mut self) -> bool {
        self.input_visible = !self.input_visible;
        self.input_visible
    }

    pub fn toggle_performance(&mut self) -> bool {
        self.performance_visible = !self.performance_visible;
        self.performance_visible
    }
}

/// Number of render-loop cycles submitted since the first plot.
#[derive(Resource, Debug, Default)]
pub struct FrameStats {
    pub frames_drawn: u64,
}

#[derive(Component)]
pub struct FpsText;

/// Native input panel (the browser page owns its own).
#[derive(Component)]
pub struct InputOverlayPanel;

#[derive(Component)]
pub struct InputOverlayMessage;

pub fn log_render_loop_started(state: Res<State<RenderLoopState>>) {
    if state.is_changed() && *state.get() == RenderLoopState::Running {
        info!("→ Scene ready, render loop running");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlays_start_with_input_shown_and_stats_hidden() {
        let overlay = OverlayState::default();
        assert!(overlay.input_visible);
        assert!(!overlay.performance_visible);
    }

    #[test]
    fn double_toggle_restores_visibility() {
        let mut overlay = OverlayState::default();
        let original = overlay;

        assert!(!overlay.toggle_input());
        assert!(overlay.toggle_input());
        overlay.toggle_performance();
        overlay.toggle_performance();

        assert_eq!(overlay, original);
    }
}

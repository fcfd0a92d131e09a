use std::path::Path;

use bevy::prelude::*;
use bevy::window::FileDragAndDrop;

use crate::engine::systems::input_bridge::InputEvent;
use crate::error::PlotError;

/// Payload file named on the command line, if any.
#[derive(Resource, Debug, Default)]
pub struct PayloadPath(pub Option<String>);

impl PayloadPath {
    pub fn from_args() -> Self {
        Self(std::env::args().nth(1))
    }
}

pub fn read_payload_file(path: &Path) -> Result<String, PlotError> {
    std::fs::read_to_string(path).map_err(|source| PlotError::PayloadUnreadable {
        path: path.display().to_string(),
        source,
    })
}

/// Startup system: plot the command line payload once, as if the plot
/// button had been pressed.
pub fn plot_payload_from_args(
    payload_path: Res<PayloadPath>,
    mut input_events: EventWriter<InputEvent>,
) {
    let Some(path) = payload_path.0.as_deref() else {
        info!("No payload file given; drop a JSON point file onto the window to plot");
        return;
    };

    match read_payload_file(Path::new(path)) {
        Ok(payload) => {
            info!("Loading point payload from: {}", path);
            input_events.write(InputEvent::plot(payload));
        }
        Err(err) => error!("{}", err),
    }
}

/// Dropping a file onto the window re-plots with its contents.
pub fn plot_dropped_files(
    mut drops: EventReader<FileDragAndDrop>,
    mut input_events: EventWriter<InputEvent>,
) {
    for drop in drops.read() {
        let FileDragAndDrop::DroppedFile { path_buf, .. } = drop else {
            continue;
        };

        match read_payload_file(path_buf) {
            Ok(payload) => {
                info!("Plotting dropped file: {}", path_buf.display());
                input_events.write(InputEvent::plot(payload));
            }
            Err(err) => error!("{}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_payload_text_from_disk() {
        let path = std::env::temp_dir().join("point-cloud-plotter-payload-test.json");
        std::fs::write(&path, "[[0,0,0,1]]").unwrap();

        assert_eq!(read_payload_file(&path).unwrap(), "[[0,0,0,1]]");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let path = std::env::temp_dir().join("point-cloud-plotter-does-not-exist.json");
        let err = read_payload_file(&path).unwrap_err();

        assert!(matches!(err, PlotError::PayloadUnreadable { .. }));
        assert!(err.to_string().contains("point-cloud-plotter-does-not-exist.json"));
    }
}

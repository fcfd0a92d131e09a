use thiserror::Error;

/// Failures surfaced to the user while turning input into a plot.
#[derive(Debug, Error)]
pub enum PlotError {
    /// The payload is not a JSON sequence of `[x, y, z, label]` tuples.
    #[error("invalid point data: {0}")]
    InvalidPointData(#[from] serde_json::Error),

    #[error("invalid point data: point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("could not read point payload {path}: {source}")]
    PayloadUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("rendering context unavailable: {0}")]
    RenderContextUnavailable(String),
}

/// A label with no palette entry. Non-fatal: the marker is still drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("point {index} has label {label} outside the palette, drawn as unclassified")]
pub struct LabelRangeWarning {
    /// Position of the point in the payload.
    pub index: usize,
    pub label: i64,
}

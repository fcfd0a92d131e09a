use serde::Deserialize;

use crate::error::PlotError;

/// One labelled sample, in data coordinates (z-up).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "(f32, f32, f32, i64)")]
pub struct PointRecord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// 1-based class label.
    pub label: i64,
}

impl From<(f32, f32, f32, i64)> for PointRecord {
    fn from((x, y, z, label): (f32, f32, f32, i64)) -> Self {
        Self { x, y, z, label }
    }
}

impl PointRecord {
    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Parse `[[x, y, z, label], ...]`. Fails on the first malformed tuple so no
/// partial point set ever reaches the scene.
pub fn parse_point_payload(payload: &str) -> Result<Vec<PointRecord>, PlotError> {
    let records: Vec<PointRecord> = serde_json::from_str(payload)?;

    if let Some(index) = records.iter().position(|record| !record.is_finite()) {
        return Err(PlotError::NonFiniteCoordinate { index });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tuples_in_order() {
        let records = parse_point_payload("[[0,0,0,1],[10,5,-10,2]]").unwrap();

        assert_eq!(
            records,
            vec![
                PointRecord { x: 0.0, y: 0.0, z: 0.0, label: 1 },
                PointRecord { x: 10.0, y: 5.0, z: -10.0, label: 2 },
            ]
        );
    }

    #[test]
    fn accepts_fractional_coordinates_and_whitespace() {
        let records = parse_point_payload(" [ [1.5, -2.25, 3e1, 4] ]\n").unwrap();
        assert_eq!(records[0], PointRecord { x: 1.5, y: -2.25, z: 30.0, label: 4 });
    }

    #[test]
    fn empty_array_is_an_empty_plot() {
        assert!(parse_point_payload("[]").unwrap().is_empty());
    }

    #[test]
    fn out_of_palette_labels_still_parse() {
        let records = parse_point_payload("[[1,1,1,7],[0,0,0,0]]").unwrap();
        assert_eq!(records[0].label, 7);
        assert_eq!(records[1].label, 0);
    }

    #[test]
    fn rejects_payloads_that_are_not_four_tuples() {
        for payload in [
            "not json at all",
            "{\"x\": 1}",
            "[[1,2,3]]",
            "[[1,2,3,4,5]]",
            "[[1,2,\"three\",4]]",
            "[[1,2,3,1.5]]",
            "[1,2,3,4]",
            "[[1,2,3,4],",
        ] {
            let err = parse_point_payload(payload).unwrap_err();
            assert!(
                matches!(err, PlotError::InvalidPointData(_)),
                "{payload:?} gave {err:?}"
            );
            assert!(err.to_string().starts_with("invalid point data"));
        }
    }

    #[test]
    fn rejects_coordinates_that_overflow_f32() {
        let err = parse_point_payload("[[0,0,0,1],[1e300,0,0,1]]").unwrap_err();
        assert!(matches!(err, PlotError::NonFiniteCoordinate { index: 1 }));
    }
}

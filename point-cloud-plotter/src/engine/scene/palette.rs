use bevy::prelude::*;
use constants::class::{CLASS_PALETTE, UNCLASSIFIED_COLOUR, palette_index};

use crate::engine::loading::point_data::PointRecord;
use crate::error::LabelRangeWarning;

pub const PALETTE_SIZE: usize = CLASS_PALETTE.len();

fn srgb([r, g, b]: [u8; 3]) -> Color {
    Color::srgb_u8(r, g, b)
}

/// Palette colour for a 1-based label; `None` when the label has no entry.
pub fn color_for(label: i64) -> Option<Color> {
    palette_index(label).map(|index| srgb(CLASS_PALETTE[index]))
}

/// Colour a marker is drawn with; the scene builder creates its materials
/// from this. Out-of-range labels fall back to the unclassified grey instead
/// of an undefined colour.
pub fn marker_color(label: i64) -> Color {
    color_for(label).unwrap_or_else(unclassified_color)
}

pub fn unclassified_color() -> Color {
    srgb(UNCLASSIFIED_COLOUR)
}

/// Every record whose label would otherwise render without a colour.
pub fn label_range_warnings(records: &[PointRecord]) -> Vec<LabelRangeWarning> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| palette_index(record.label).is_none())
        .map(|(index, record)| LabelRangeWarning {
            index,
            label: record.label,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_index_palette_from_one() {
        assert_eq!(color_for(1), Some(Color::srgb_u8(0xdb, 0x2d, 0x20)));
        assert_eq!(color_for(2), Some(Color::srgb_u8(0x01, 0xa0, 0xe4)));
        assert_eq!(color_for(6), Some(Color::srgb_u8(0xb5, 0xe4, 0xf4)));
    }

    #[test]
    fn in_range_lookups_are_stable() {
        for label in 1..=PALETTE_SIZE as i64 {
            let first = color_for(label);
            assert!(first.is_some());
            assert_eq!(first, color_for(label));
            assert_eq!(marker_color(label), first.unwrap());
        }
    }

    #[test]
    fn out_of_range_label_passes_through_as_none() {
        assert_eq!(color_for(7), None);
        assert_eq!(color_for(0), None);
        assert_eq!(color_for(-1), None);
    }

    #[test]
    fn out_of_range_marker_is_drawn_unclassified_and_flagged() {
        assert_eq!(marker_color(7), unclassified_color());

        let at_origin = |label| PointRecord {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            label,
        };
        let records = [at_origin(7), at_origin(3), at_origin(0)];
        assert_eq!(
            label_range_warnings(&records),
            vec![
                LabelRangeWarning { index: 0, label: 7 },
                LabelRangeWarning { index: 2, label: 0 },
            ]
        );
    }
}

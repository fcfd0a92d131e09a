/// Marker colours indexed by `label - 1`, as sRGB bytes.
pub const CLASS_PALETTE: [[u8; 3]; 6] = [
    [0xdb, 0x2d, 0x20], // red
    [0x01, 0xa0, 0xe4], // blue
    [0x01, 0xa2, 0x52], // green
    [0xa1, 0x6a, 0x94], // purple
    [0x22, 0x22, 0x22], // near black
    [0xb5, 0xe4, 0xf4], // pale cyan
];

/// Colour used for markers whose label has no palette entry.
pub const UNCLASSIFIED_COLOUR: [u8; 3] = [0x88, 0x88, 0x88];

/// Palette index for a 1-based class label, if the label has an entry.
pub fn palette_index(label: i64) -> Option<usize> {
    let index = usize::try_from(label.checked_sub(1)?).ok()?;
    (index < CLASS_PALETTE.len()).then_some(index)
}

/// `#rrggbb` form of a label's palette colour, for page-side legends.
pub fn class_hex(label: i64) -> Option<String> {
    let [r, g, b] = CLASS_PALETTE[palette_index(label)?];
    Some(format!("#{r:02x}{g:02x}{b:02x}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_map_to_zero_based_palette_slots() {
        assert_eq!(palette_index(1), Some(0));
        assert_eq!(palette_index(6), Some(5));
        assert_eq!(palette_index(0), None);
        assert_eq!(palette_index(7), None);
        assert_eq!(palette_index(-3), None);
        assert_eq!(palette_index(i64::MIN), None);
    }

    #[test]
    fn hex_is_derived_from_palette_bytes() {
        assert_eq!(class_hex(1).as_deref(), Some("#db2d20"));
        assert_eq!(class_hex(5).as_deref(), Some("#222222"));
        assert_eq!(class_hex(6).as_deref(), Some("#b5e4f4"));
        assert_eq!(class_hex(9), None);
    }
}

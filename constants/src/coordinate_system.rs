/// Vertical offset added to the data's z so the plotted volume sits above the
/// reference plane.
pub const VERTICAL_BIAS: f32 = 50.0;

/// Coordinate transformation matrix (row-major: [x_new, y_new, z_new])
/// Data is authored z-up, the viewport is y-up: X→X, Z→Y, Y→Z.
pub const COORDINATE_TRANSFORM: [[f32; 3]; 3] = [
    [1.0, 0.0, 0.0], // X = X
    [0.0, 0.0, 1.0], // Y = Z
    [0.0, 1.0, 0.0], // Z = Y
];

/// Map data coordinates into render space, including the vertical bias.
pub fn transform_coordinates(x: f32, y: f32, z: f32) -> [f32; 3] {
    let input = [x, y, z];
    let mut output = [0.0; 3];

    for i in 0..3 {
        for j in 0..3 {
            output[i] += COORDINATE_TRANSFORM[i][j] * input[j];
        }
    }
    output[1] += VERTICAL_BIAS;

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_z_becomes_render_height() {
        assert_eq!(transform_coordinates(0.0, 0.0, 0.0), [0.0, VERTICAL_BIAS, 0.0]);
        assert_eq!(
            transform_coordinates(10.0, 5.0, -10.0),
            [10.0, -10.0 + VERTICAL_BIAS, 5.0]
        );
    }
}

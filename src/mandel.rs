//! The escape-time kernel and its color map.
use image::Rgb;
use num_complex::Complex;

/// Iteration cap of the escape-time loop.
pub const MAX_ITERATIONS: u32 = 256;

/// Color of the tile-boundary overlay.
pub const GRID_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Number of iterations before `z = z^2 + c` escapes the radius-2
/// bound, capped at [`MAX_ITERATIONS`]. Total over all inputs: points
/// that never escape simply reach the cap.
pub fn escape_time(c: Complex<f64>) -> u32 {
    let mut z = c;
    let mut i = 0;
    while i != MAX_ITERATIONS && z.norm_sqr() < 4.0 {
        z = z * z + c;
        i += 1;
    }
    i
}

/// Map an iteration count to a pixel color.
///
/// The red channel is `10 * k` truncated to a byte, so counts above 25
/// wrap instead of saturating; the resulting banding is part of the
/// picture. Points at the iteration cap are black.
pub fn color(k: u32) -> Rgb<u8> {
    if k < MAX_ITERATIONS {
        Rgb([(10 * k) as u8, 0, 80])
    } else {
        Rgb([0, 0, 0])
    }
}

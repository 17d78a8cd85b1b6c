//! Mapping between image pixels and points of the complex plane.
use num_complex::Complex;

use crate::tiles::Domain;

/// Maps pixel coordinates onto a rectangle of the complex plane.
///
/// The rectangle is given by its top-left and bottom-right corners;
/// the two per-axis deltas are computed once at construction. The
/// imaginary delta is negative when the imaginary axis points up,
/// which keeps row 0 on the top edge of the rectangle.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    origin: Complex<f64>,
    delta_re: f64,
    delta_im: f64,
}

impl PlaneMapper {
    pub fn new(domain: Domain, top_left: Complex<f64>, bottom_right: Complex<f64>) -> PlaneMapper {
        let span = bottom_right - top_left;
        PlaneMapper {
            origin: top_left,
            delta_re: span.re / domain.width as f64,
            delta_im: span.im / domain.height as f64,
        }
    }

    /// The complex point sampled by the pixel at `(col, row)`.
    pub fn point(&self, col: usize, row: usize) -> Complex<f64> {
        Complex::new(
            self.origin.re + col as f64 * self.delta_re,
            self.origin.im + row as f64 * self.delta_im,
        )
    }
}

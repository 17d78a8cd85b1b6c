//! The shared pixel buffer and its tile-scoped views.
//!
//! One canvas is shared by every task of a sweep iteration. Safety
//! does not come from locks: the tiler hands each task a disjoint
//! rectangle, a task can only write through the [`TileView`] for its
//! own tile, and disjoint views touch disjoint pixels. The per-pixel
//! `UnsafeCell` plus that ownership discipline is the whole
//! synchronization story.
use std::cell::UnsafeCell;

use image::{Rgb, RgbImage};

use crate::tiles::{Domain, Tile};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// A width x height RGB pixel buffer.
pub struct Canvas {
    width: usize,
    height: usize,
    data: Vec<UnsafeCell<Rgb<u8>>>,
}

// Concurrent access goes through tile views over pairwise disjoint
// tiles, so no pixel cell is ever written from two threads.
unsafe impl Sync for Canvas {}

impl Canvas {
    /// A black canvas the size of `domain`.
    pub fn new(domain: Domain) -> Canvas {
        Canvas {
            width: domain.width,
            height: domain.height,
            data: (0..domain.len()).map(|_| UnsafeCell::new(BLACK)).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// A writer restricted to `tile`. The tile must lie inside the
    /// canvas; views handed out concurrently must cover disjoint tiles.
    pub fn view(&self, tile: Tile) -> TileView<'_> {
        debug_assert!(tile.rows.end <= self.height && tile.cols.end <= self.width);
        TileView { canvas: self, tile }
    }

    /// Read one pixel. Exclusive access makes this race-free.
    pub fn pixel(&mut self, col: usize, row: usize) -> Rgb<u8> {
        *self.data[row * self.width + col].get_mut()
    }

    /// Consume the canvas into an encodable image.
    pub fn into_image(self) -> RgbImage {
        let width = self.width;
        let mut image = RgbImage::new(self.width as u32, self.height as u32);
        for (i, cell) in self.data.into_iter().enumerate() {
            image.put_pixel((i % width) as u32, (i / width) as u32, cell.into_inner());
        }
        image
    }
}

/// Write access to the pixels of a single tile.
pub struct TileView<'a> {
    canvas: &'a Canvas,
    tile: Tile,
}

impl TileView<'_> {
    /// Write the pixel at `(col, row)`, which must lie inside the view's tile.
    pub fn set(&mut self, col: usize, row: usize, color: Rgb<u8>) {
        debug_assert!(self.tile.cols.contains(&col) && self.tile.rows.contains(&row));
        let cell = &self.canvas.data[row * self.canvas.width + col];
        unsafe { *cell.get() = color };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::tiles;

    #[test]
    fn starts_black() {
        let mut canvas = Canvas::new(Domain::new(4, 4));
        assert_eq!(canvas.pixel(3, 3), BLACK);
    }

    #[test]
    fn view_writes_land_in_the_right_place() {
        let mut canvas = Canvas::new(Domain::new(8, 8));
        let tile = Tile {
            rows: 2..4,
            cols: 4..8,
        };
        let mut view = canvas.view(tile);
        view.set(5, 3, Rgb([1, 2, 3]));
        assert_eq!(canvas.pixel(5, 3), Rgb([1, 2, 3]));
        assert_eq!(canvas.pixel(3, 5), BLACK);
    }

    #[test]
    fn into_image_preserves_layout() {
        let canvas = Canvas::new(Domain::new(3, 2));
        let mut view = canvas.view(Tile {
            rows: 1..2,
            cols: 2..3,
        });
        view.set(2, 1, Rgb([9, 9, 9]));
        let image = canvas.into_image();
        assert_eq!(image.get_pixel(2, 1), &Rgb([9, 9, 9]));
        assert_eq!(image.get_pixel(0, 0), &BLACK);
    }

    #[test]
    fn disjoint_views_cover_every_pixel_once() {
        let domain = Domain::new(10, 6);
        let mut canvas = Canvas::new(domain);
        for tile in tiles(domain, 4) {
            let mut view = canvas.view(tile.clone());
            for row in tile.rows.clone() {
                for col in tile.cols.clone() {
                    view.set(col, row, Rgb([255, 255, 255]));
                }
            }
        }
        for row in 0..domain.height {
            for col in 0..domain.width {
                assert_eq!(canvas.pixel(col, row), Rgb([255, 255, 255]));
            }
        }
    }
}

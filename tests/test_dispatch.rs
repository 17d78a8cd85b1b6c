use grainbench::prelude::*;
use num_complex::Complex;

fn plane_for(domain: Domain) -> PlaneMapper {
    PlaneMapper::new(domain, Complex::new(-2.2, 1.5), Complex::new(0.8, -1.5))
}

#[test]
fn test_counter_matches_tile_count() {
    let domain = Domain::new(64, 64);
    let plane = plane_for(domain);
    let counter = TaskCounter::new();

    for workers in [1, 2, 4, 8] {
        let mut pool = ThreadPool::with_capacity(workers);
        for grain in [1, 5, 17, 64, 100] {
            counter.reset();
            let tile_set = tiles(domain, grain);
            let frame = Canvas::new(domain);
            let overlay = Canvas::new(domain);
            render_tiles(&mut pool, &frame, &overlay, &plane, &tile_set, &counter);
            assert_eq!(
                counter.value(),
                tile_set.len(),
                "workers {} grain {}",
                workers,
                grain
            );
        }
    }
}

fn rendered_frame(domain: Domain, grain: usize, workers: usize) -> (Vec<u8>, Vec<u8>) {
    let plane = plane_for(domain);
    let counter = TaskCounter::new();
    let mut pool = ThreadPool::with_capacity(workers);
    let frame = Canvas::new(domain);
    let overlay = Canvas::new(domain);
    render_tiles(
        &mut pool,
        &frame,
        &overlay,
        &plane,
        &tiles(domain, grain),
        &counter,
    );
    (
        frame.into_image().into_raw(),
        overlay.into_image().into_raw(),
    )
}

/// Each pixel is owned by exactly one tile, so concurrent dispatch is
/// deterministic: repeated runs of one configuration are bit-identical.
#[test]
fn test_disjoint_writes_are_deterministic() {
    let domain = Domain::new(80, 60);
    let (frame_a, overlay_a) = rendered_frame(domain, 7, 4);
    let (frame_b, overlay_b) = rendered_frame(domain, 7, 4);
    assert_eq!(frame_a, frame_b);
    assert_eq!(overlay_a, overlay_b);

    // The frame does not depend on the pool size either.
    let (frame_c, _) = rendered_frame(domain, 7, 1);
    assert_eq!(frame_a, frame_c);
}

/// The overlay carries the frame's pixels plus the tile boundaries.
#[test]
fn test_overlay_marks_tile_edges() {
    let domain = Domain::new(16, 16);
    let plane = plane_for(domain);
    let counter = TaskCounter::new();
    let mut pool = ThreadPool::with_capacity(2);
    let frame = Canvas::new(domain);
    let mut overlay = Canvas::new(domain);
    render_tiles(
        &mut pool,
        &frame,
        &overlay,
        &plane,
        &tiles(domain, 8),
        &counter,
    );

    // Top-left corner of each of the four 8x8 tiles is a grid pixel.
    for (col, row) in [(0, 0), (8, 0), (0, 8), (8, 8)] {
        assert_eq!(overlay.pixel(col, row), image::Rgb([255, 0, 0]));
    }
}

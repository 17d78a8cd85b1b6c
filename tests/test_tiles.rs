use grainbench::prelude::*;
use rand::Rng;

/// Every pixel of the domain must be covered by exactly one tile.
fn assert_exact_partition(domain: Domain, grain: usize) {
    let mut owners = vec![0u8; domain.len()];
    for tile in tiles(domain, grain) {
        for row in tile.rows.clone() {
            for col in tile.cols.clone() {
                owners[row * domain.width + col] += 1;
            }
        }
    }
    assert!(
        owners.iter().all(|&n| n == 1),
        "partition of {:?} with grain {} has gaps or overlaps",
        domain,
        grain
    );
}

#[test]
fn test_exact_cover() {
    assert_exact_partition(Domain::new(800, 800), 5);
    assert_exact_partition(Domain::new(800, 800), 799);
    assert_exact_partition(Domain::new(800, 800), 800);
    assert_exact_partition(Domain::new(640, 480), 33);
}

#[test]
fn test_exact_cover_random_domains() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let domain = Domain::new(rng.gen_range(1..200), rng.gen_range(1..200));
        let grain = rng.gen_range(1..250);
        assert_exact_partition(domain, grain);
        assert_eq!(tiles(domain, grain).len(), tile_count(domain, grain));
    }
}

#[test]
fn test_count_formula() {
    let domain = Domain::new(800, 800);
    for grain in [5, 7, 100, 399, 400, 401, 799, 800, 1000] {
        let rows = (domain.height + grain - 1) / grain;
        let cols = (domain.width + grain - 1) / grain;
        assert_eq!(tile_count(domain, grain), rows * cols);
        assert_eq!(tiles(domain, grain).len(), rows * cols);
    }
}

#[test]
fn test_count_is_non_increasing_in_grain() {
    let domain = Domain::new(800, 800);
    let mut previous = usize::MAX;
    for grain in 5..800 {
        let count = tile_count(domain, grain);
        assert!(
            count <= previous,
            "tile count grew from {} to {} at grain {}",
            previous,
            count,
            grain
        );
        previous = count;
    }
}

#[test]
fn test_sweep_endpoints() {
    let domain = Domain::new(800, 800);
    assert_eq!(tiles(domain, 800).len(), 1);
    assert_eq!(tiles(domain, 400).len(), 4);

    // Grain 799 truncates a 1-pixel strip along each far edge.
    let tile_set = tiles(domain, 799);
    assert_eq!(tile_set.len(), 4);
    assert_eq!(tile_set[1].cols.len(), 1);
    assert_eq!(tile_set[2].rows.len(), 1);
    assert_eq!(tile_set[3].cols.len(), 1);
    assert_eq!(tile_set[3].rows.len(), 1);
}

use criterion::{AxisScale, BenchmarkId, Criterion, PlotConfiguration, SamplingMode};

use grainbench::prelude::*;
use num_complex::Complex;

pub fn grain_dispatch(criterion: &mut Criterion) {
    // Sets up criterion.
    let plot_cfg = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    let mut group = criterion.benchmark_group("Tile dispatch time");
    group
        .sampling_mode(SamplingMode::Auto)
        .plot_config(plot_cfg)
        .sample_size(10);

    let domain = Domain::new(800, 800);
    let plane = PlaneMapper::new(domain, Complex::new(-2.2, 1.5), Complex::new(0.8, -1.5));
    let counter = TaskCounter::new();
    let mut pool = ThreadPool::new();

    for grain in [5, 25, 100, 400, 800] {
        let tile_set = tiles(domain, grain);

        group.bench_function(BenchmarkId::new("render_tiles", grain), |b| {
            b.iter(|| {
                counter.reset();
                let frame = Canvas::new(domain);
                let overlay = Canvas::new(domain);
                render_tiles(&mut pool, &frame, &overlay, &plane, &tile_set, &counter);
            })
        });
    }
}

criterion::criterion_group!(benches, grain_dispatch);

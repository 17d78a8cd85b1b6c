use std::error::Error;

use log::info;
use num_complex::Complex;

use grainbench::prelude::*;
use grainbench::report;

const DISPLAY_WIDTH: usize = 800;
const DISPLAY_HEIGHT: usize = 800;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let configuration = Configuration::new_default();
    let mut pool = ThreadPool::with_configuration(&configuration);
    info!("Sweeping with {} workers", pool.num_workers());

    let domain = Domain::new(DISPLAY_WIDTH, DISPLAY_HEIGHT);
    let top_left = Complex::new(-2.2, 1.5);
    let bottom_right = Complex::new(0.8, -1.5);
    let plane = PlaneMapper::new(domain, top_left, bottom_right);

    let sweep = Sweep::new(domain, plane, 5..800);
    let mut recorder = Recorder::new(".");

    let output = sweep.run(&mut pool, &mut recorder, |record| {
        println!(
            "G {}, {} invocations, {} s",
            record.grain, record.tasks, record.seconds
        );
    })?;

    report::write_csv("results.csv", &output.records)?;
    recorder.save_final(output.frame, "mandelbrot_par.png")?;
    recorder.assemble("mandelbrot_animation.gif");
    recorder.cleanup();

    Ok(())
}

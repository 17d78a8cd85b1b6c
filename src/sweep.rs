//! The grain-size sweep: dispatch, measure, record.
//!
//! The driver owns the loop over grain sizes. For each `G` it resets
//! the task counter, asks the tiler for the tile set, dispatches one
//! job per tile under the timing harness, and appends one record. The
//! pool is shared across all iterations; iteration `N` fully completes
//! and is recorded before `N + 1` begins.
use std::ops::Range;

use log::trace;

use crate::canvas::Canvas;
use crate::counter::TaskCounter;
use crate::mandel;
use crate::plane::PlaneMapper;
use crate::thread_pool::ThreadPool;
use crate::tiles::{tiles, Domain, Tile};
use crate::timing;
use crate::viz::{Recorder, RecorderError};

/// One measurement: grain size, tasks created, elapsed seconds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SweepRecord {
    pub grain: usize,
    pub tasks: usize,
    pub seconds: f64,
}

/// Everything a finished sweep leaves behind: the measurement records
/// in ascending grain order and the completed frame.
pub struct SweepOutput {
    pub records: Vec<SweepRecord>,
    pub frame: Canvas,
}

/// Dispatch one job per tile and block until all of them complete.
///
/// Jobs may run in any order on any worker; the scope is the fork-join
/// barrier. Each job increments the counter once, renders its tile
/// into both canvases through tile-scoped views, and marks the tile's
/// top and left edges in the overlay. Tiles are pairwise disjoint, so
/// no pixel is written by more than one job.
pub fn render_tiles(
    pool: &mut ThreadPool,
    frame: &Canvas,
    overlay: &Canvas,
    plane: &PlaneMapper,
    tile_set: &[Tile],
    counter: &TaskCounter,
) {
    pool.scope(|s| {
        for tile in tile_set {
            let mut view = frame.view(tile.clone());
            let mut overlay_view = overlay.view(tile.clone());
            s.execute(move || {
                counter.bump();
                for row in tile.rows.clone() {
                    for col in tile.cols.clone() {
                        let k = mandel::escape_time(plane.point(col, row));
                        let color = mandel::color(k);
                        view.set(col, row, color);
                        overlay_view.set(col, row, color);
                    }
                }
                for row in tile.rows.clone() {
                    overlay_view.set(tile.cols.start, row, mandel::GRID_COLOR);
                }
                for col in tile.cols.clone() {
                    overlay_view.set(col, tile.rows.start, mandel::GRID_COLOR);
                }
            });
        }
    });
}

/// The sweep driver.
pub struct Sweep {
    domain: Domain,
    plane: PlaneMapper,
    grains: Range<usize>,
    counter: TaskCounter,
}

impl Sweep {
    pub fn new(domain: Domain, plane: PlaneMapper, grains: Range<usize>) -> Sweep {
        Sweep {
            domain,
            plane,
            grains,
            counter: TaskCounter::new(),
        }
    }

    /// Run the sweep over ascending grain sizes.
    ///
    /// Per iteration: reset the counter, tile the domain, dispatch
    /// under the harness, read the counter, and record. When the task
    /// count differs from the previous iteration's, the overlay is
    /// handed to the recorder. `on_record` sees every record as soon
    /// as it is measured. Any recording failure aborts the whole
    /// sweep; there is no retry and no partial-result recovery.
    pub fn run<F>(
        &self,
        pool: &mut ThreadPool,
        recorder: &mut Recorder,
        mut on_record: F,
    ) -> Result<SweepOutput, RecorderError>
    where
        F: FnMut(&SweepRecord),
    {
        let frame = Canvas::new(self.domain);
        let mut records = Vec::with_capacity(self.grains.len());
        let mut previous_tasks = 0;

        for grain in self.grains.clone() {
            self.counter.reset();
            let tile_set = tiles(self.domain, grain);
            let overlay = Canvas::new(self.domain);

            let elapsed = timing::time(|| {
                render_tiles(pool, &frame, &overlay, &self.plane, &tile_set, &self.counter)
            });

            let tasks = self.counter.value();
            trace!("G {}: {} tiles in {} s", grain, tasks, elapsed.as_secs_f64());

            if tasks != previous_tasks {
                recorder.record(grain, overlay)?;
                previous_tasks = tasks;
            }

            let record = SweepRecord {
                grain,
                tasks,
                seconds: elapsed.as_secs_f64(),
            };
            on_record(&record);
            records.push(record);
        }

        Ok(SweepOutput { records, frame })
    }
}

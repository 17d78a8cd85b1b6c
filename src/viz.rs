//! Visualization artifacts: grid snapshots, the final frame, and the
//! animation assembled from the snapshots.
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{error, info, warn};

use crate::canvas::Canvas;

#[derive(Debug)]
pub struct RecorderError {
    details: String,
}

impl RecorderError {
    fn new(msg: &str) -> RecorderError {
        RecorderError {
            details: msg.to_string(),
        }
    }
}

impl fmt::Display for RecorderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.details)
    }
}

impl Error for RecorderError {}

/// Saves one grid snapshot per task-count change and assembles them
/// into an animation once the sweep is done.
pub struct Recorder {
    dir: PathBuf,
    frames: Vec<PathBuf>,
}

impl Recorder {
    /// A recorder writing its artifacts under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Recorder {
        Recorder {
            dir: dir.into(),
            frames: Vec::new(),
        }
    }

    /// Paths of the snapshots saved so far, in sweep order.
    pub fn frames(&self) -> &[PathBuf] {
        &self.frames
    }

    /// Encode the overlay as `mandelbrot_<grain>.png` and remember the
    /// path for the animation.
    pub fn record(&mut self, grain: usize, overlay: Canvas) -> Result<(), RecorderError> {
        let path = self.dir.join(format!("mandelbrot_{}.png", grain));
        overlay
            .into_image()
            .save(&path)
            .map_err(|e| RecorderError::new(&format!("cannot save {}: {}", path.display(), e)))?;
        self.frames.push(path);
        Ok(())
    }

    /// Save the completed frame, without overlay, under `name`.
    pub fn save_final(&self, frame: Canvas, name: &str) -> Result<(), RecorderError> {
        let path = self.dir.join(name);
        frame
            .into_image()
            .save(&path)
            .map_err(|e| RecorderError::new(&format!("cannot save {}: {}", path.display(), e)))
    }

    /// Assemble the saved snapshots into `output` with one `convert`
    /// invocation. The exit status only drives a log message: a failed
    /// assembly does not abort the run.
    pub fn assemble(&self, output: &str) {
        if self.frames.is_empty() {
            warn!("No snapshots recorded, skipping animation assembly");
            return;
        }

        let target = self.dir.join(output);
        let mut command = Command::new("convert");
        command.args(["-delay", "50", "-loop", "0"]);
        for frame in &self.frames {
            command.arg(frame);
        }
        command.arg(&target);

        match command.status() {
            Ok(status) if status.success() => {
                info!("Animation created: {}", target.display());
            }
            Ok(status) => {
                error!("Animation assembly exited with {}", status);
            }
            Err(e) => {
                error!("Could not run convert: {}", e);
            }
        }
    }

    /// Delete the intermediate snapshots. Per-file failures are logged
    /// and skipped.
    pub fn cleanup(&mut self) {
        for frame in self.frames.drain(..) {
            remove_frame(&frame);
        }
    }
}

fn remove_frame(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!("Could not remove {}: {}", path.display(), e);
    }
}

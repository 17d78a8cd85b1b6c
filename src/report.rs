//! The flat tabular metrics record.
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::sweep::SweepRecord;

/// Write the sweep records as CSV: header `G,Time(s)`, then one
/// `grain,seconds` line per record, in sweep order.
pub fn write_csv(path: impl AsRef<Path>, records: &[SweepRecord]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    writeln!(out, "G,Time(s)")?;
    for record in records {
        writeln!(out, "{},{}", record.grain, record.seconds)?;
    }
    out.flush()
}

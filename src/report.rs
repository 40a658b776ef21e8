use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{Snapshot, SnapshotSink};

/// Writes one human-readable line per body for every snapshot.
pub struct ConsoleReport<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SnapshotSink for ConsoleReport<W> {
    type Error = io::Error;

    fn observe(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        for body in snapshot.bodies() {
            writeln!(self.out, "{body}")?;
        }
        self.out.flush()
    }
}

/// Writes the body positions as CSV, one row per step.
///
/// The header `t,x0,y0,x1,y1,...` is written before the first row.
pub struct CsvWriter<W: Write> {
    out: W,
    header_written: bool,
}

impl CsvWriter<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            header_written: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SnapshotSink for CsvWriter<W> {
    type Error = io::Error;

    fn observe(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        if !self.header_written {
            write!(self.out, "t")?;
            for i in 0..snapshot.len() {
                write!(self.out, ",x{i},y{i}")?;
            }
            writeln!(self.out)?;
            self.header_written = true;
        }

        write!(self.out, "{}", snapshot.step())?;
        for pos in snapshot.positions() {
            write!(self.out, ",{},{}", pos.x, pos.y)?;
        }
        writeln!(self.out)?;

        Ok(())
    }
}

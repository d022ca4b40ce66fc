// src/export.rs
// writes generated points out for plotting tools, either from a stored
// sequence or one point at a time while the walk runs

use std::io::{BufWriter, Write};

use crate::generator::PointSequence;
use crate::geometry::Point2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

/// Incremental writer; the header goes out on creation, the trailer on `finish`.
pub struct PointWriter<W: Write> {
    writer: BufWriter<W>,
    format: Format,
    written: usize,
}

impl<W: Write> PointWriter<W> {
    pub fn new(writer: W, format: Format) -> std::io::Result<Self> {
        let mut writer = BufWriter::new(writer);
        match format {
            Format::Csv => writeln!(writer, "x,y")?,
            Format::Json => write!(writer, "[")?,
        }
        Ok(Self { writer, format, written: 0 })
    }

    pub fn write_point(&mut self, p: &Point2) -> std::io::Result<()> {
        match self.format {
            Format::Csv => writeln!(self.writer, "{},{}", p.x, p.y)?,
            Format::Json => {
                if self.written > 0 {
                    write!(self.writer, ",")?;
                }
                serde_json::to_writer(&mut self.writer, p)?;
            }
        }
        self.written += 1;
        Ok(())
    }

    /// Closes the document and returns how many points were written.
    pub fn finish(mut self) -> std::io::Result<usize> {
        if self.format == Format::Json {
            writeln!(self.writer, "]")?;
        }
        self.writer.flush()?;
        Ok(self.written)
    }
}

fn write_all<W: Write>(sequence: &PointSequence, writer: W, format: Format) -> std::io::Result<()> {
    let mut out = PointWriter::new(writer, format)?;
    for p in sequence {
        out.write_point(p)?;
    }
    out.finish().map(|_| ())
}

pub fn write_csv<W: Write>(sequence: &PointSequence, writer: W) -> std::io::Result<()> {
    write_all(sequence, writer, Format::Csv)
}

pub fn write_json<W: Write>(sequence: &PointSequence, writer: W) -> std::io::Result<()> {
    write_all(sequence, writer, Format::Json)
}

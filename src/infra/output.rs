use crate::domain::models::{FileRecord, RecordBody};
use anyhow::Context;
use crossterm::{
    ExecutableCommand,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::debug;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const RECORD_SEPARATOR: &[u8] = b"\n\n";

/// Frames records as `--- <path> ---` headers followed by the body.
pub struct RecordWriter<W: Write> {
    inner: W,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_record(&mut self, record: &FileRecord) -> io::Result<()> {
        debug!("Writing record for {}", record.rel_path);
        writeln!(self.inner, "--- {} ---", record.rel_path)?;
        match &record.body {
            RecordBody::Text(contents) => self.inner.write_all(contents.as_bytes())?,
            RecordBody::Unreadable(message) => writeln!(self.inner, "[{}]", message)?,
        }
        self.inner.write_all(RECORD_SEPARATOR)
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

pub fn create_output_file(path: &Path) -> anyhow::Result<BufWriter<File>> {
    debug!("Creating output file: {}", path.display());
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

pub fn print_completion(output_path: &Path) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(Color::Green))?;
    writeln!(
        stdout,
        "All contents have been aggregated into {}",
        output_path.display()
    )?;
    stdout.execute(ResetColor)?;
    Ok(())
}

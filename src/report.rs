use crate::model::RecipeFields;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Plain text report with one numbered block per scraped recipe
pub struct ReportWriter<W: Write> {
    out: W,
}

impl ReportWriter<BufWriter<File>> {
    /// Creates (or truncates) the report file at `path`
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W) -> Self {
        ReportWriter { out }
    }

    /// Appends the block for recipe number `sequence`
    pub fn write_recipe(&mut self, sequence: usize, fields: &RecipeFields) -> io::Result<()> {
        writeln!(self.out, "Recipe {sequence}:")?;
        for (field, value) in fields.iter() {
            writeln!(self.out, "{}: {}", field.label(), value)?;
        }
        writeln!(self.out)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

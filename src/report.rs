use std::{
    fmt::Display,
    fs::File,
    io::{self, Write},
    path::Path,
};

/// Append-only log of a session's results, one line per event.
#[derive(Debug)]
pub struct Report<W: Write = File> {
    out: W,
}

impl Report<File> {
    /// Creates (or truncates) the report file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes `line` followed by a newline and flushes it right away.
    pub fn record<D: Display>(&mut self, line: D) -> io::Result<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

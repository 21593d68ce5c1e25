use std::io::Write;
use std::path::Path;

const BANNER: &str =
    "==============================================================================";

/// Writes the human-readable progress report.
///
/// Lines are written as processing happens, never collected until the end.
pub struct Report<W: Write> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Banner and heading printed before a file is read.
    pub fn file_started(&mut self, path: &Path) -> std::io::Result<()> {
        writeln!(self.out, "{BANNER}")?;
        writeln!(self.out, "Processing file: {}", path.display())?;
        self.out.flush()
    }

    /// One line per substituted match.
    pub fn replaced(&mut self, original: &str, replacement: &str) -> std::io::Result<()> {
        writeln!(self.out, " - replaced '{original}' with '{replacement}'")
    }

    pub fn file_succeeded(&mut self) -> std::io::Result<()> {
        writeln!(self.out, " - successfully processed.")?;
        self.out.flush()
    }

    /// Closing banner, printed even when no files were processed.
    pub fn finished(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "{BANNER}")?;
        writeln!(self.out, "Search and replace completed.")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

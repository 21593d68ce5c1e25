use std::fs;
use std::io;
use std::path::Path;

/// The file operations the replace engine needs.
///
/// The engine only ever reads a whole file as text and overwrites it, so
/// that is all an implementation has to provide.
pub trait FileSystem {
    /// Reads the entire file at `path` as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Overwrites the file at `path` with `contents`, creating it if needed.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// `FileSystem` backed by `std::fs`.
///
/// Writes go through the existing file in place, so permissions of an
/// existing target are kept. The write is not atomic.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryFileSystem;

use std::fs;
use std::io;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

/// Destination for rendered declarations.
#[cfg_attr(test, automock)]
pub trait DeclarationSink {
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Writes declarations straight to the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSink;

impl DeclarationSink for FileSink {
    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}

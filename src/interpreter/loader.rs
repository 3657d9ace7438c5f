use std::{fs, io};

/// Resolves `include` paths to source text.
///
/// The interpreter only ever asks a loader one question: given the path
/// string from an `include` statement, produce the source text or fail.
/// The CLI uses [`FsLoader`]; tests substitute in-memory implementations.
pub trait SourceLoader {
    /// Loads the source text behind `path`.
    ///
    /// # Errors
    /// Returns an `io::Error` when the path cannot be read.
    fn load(&self, path: &str) -> io::Result<String>;
}

/// The default loader: reads files relative to the process working
/// directory.
#[derive(Debug, Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load(&self, path: &str) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

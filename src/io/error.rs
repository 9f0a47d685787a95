use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the OBJ loading pipeline.
///
/// Malformed face *indices* are deliberately not represented here: they
/// resolve to absent corners and parsing continues. Only coordinate floats
/// are fatal.
#[derive(Debug, Error)]
pub enum ObjError {
    /// The file could not be opened or stat'ed.
    #[error("cannot open '{}': {source}", path.display())]
    FileAccess { path: PathBuf, source: io::Error },

    /// The file was opened but could not be memory-mapped.
    #[error("cannot map '{}': {source}", path.display())]
    Mapping { path: PathBuf, source: io::Error },

    /// A vertex, normal or texture-coordinate component is not a valid
    /// decimal float. Aborts the whole parse.
    #[error("malformed number '{token}' on line {line}")]
    MalformedNumber { token: String, line: usize },
}

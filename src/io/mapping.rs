use crate::io::error::ObjError;
use log::debug;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// A read-only memory mapping of an OBJ file.
///
/// The mapping is released when this value is dropped, on every exit path.
/// Nothing parsed out of [`bytes`](MappedFile::bytes) may borrow from it
/// past that point; the parser copies everything it keeps.
#[derive(Debug)]
pub struct MappedFile {
    // None for zero-length files, which cannot be mapped.
    map: Option<Mmap>,
}

impl MappedFile {
    /// Opens and maps the file at `path`.
    ///
    /// A zero-length file is a valid (empty) model, not an error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ObjError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ObjError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let len = file
            .metadata()
            .map_err(|source| ObjError::FileAccess {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        let map = if len == 0 {
            None
        } else {
            // SAFETY: read-only mapping of a file we just opened. We accept
            // the usual mmap caveat that truncating the file from outside
            // while it is mapped is undefined.
            let map = unsafe { Mmap::map(&file) }.map_err(|source| ObjError::Mapping {
                path: path.to_path_buf(),
                source,
            })?;
            Some(map)
        };

        debug!("Mapped '{}' ({} bytes)", path.display(), len);
        Ok(Self { map })
    }

    /// The raw byte view of the whole file. Empty for zero-length files.
    pub fn bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or(&[])
    }
}

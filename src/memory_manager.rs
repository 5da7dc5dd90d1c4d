use crate::error::{Error, Result};
use memmap::Mmap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A read-only buffer to hide how the bytes of an input file are held.
pub enum InputBuffer {
    /// A memory buffer.
    Mem(Vec<u8>),
    /// A read-only memory mapped file.
    Mmap(Mmap),
}

impl InputBuffer {
    /// Maps the file at `path` into memory.
    ///
    /// Zero-length files cannot be mapped on every platform, so they are
    /// held as an empty memory buffer instead.
    pub fn new_mmap<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = open(path)?;
        let len = file.metadata().map_err(|e| read_error(path, e))?.len();
        if len == 0 {
            return Ok(InputBuffer::Mem(vec![]));
        }
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| read_error(path, e))?;
        Ok(InputBuffer::Mmap(mmap))
    }

    /// Reads the whole file at `path` into memory.
    pub fn new_mem<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = open(path)?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer).map_err(|e| read_error(path, e))?;
        Ok(InputBuffer::Mem(buffer))
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            InputBuffer::Mem(vec) => vec.as_slice(),
            InputBuffer::Mmap(mmap) => &mmap[..],
        }
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| Error::Open {
        path: path.display().to_string(),
        source,
    })
}

fn read_error(path: &Path, source: std::io::Error) -> Error {
    Error::Read {
        path: path.display().to_string(),
        source,
    }
}

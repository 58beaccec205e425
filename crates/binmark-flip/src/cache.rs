//! Persistence for the flippability table.
//!
//! The table is a pure function of the pattern bits, so it can be computed
//! once and reused forever. Storage is injected so tests and concurrent
//! runs never race on a shared well-known path.

use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::score::NEIGHBORHOOD;

/// Storage for a computed flippability table: the scores in pattern-code
/// order, nothing else.
pub trait TableCache {
    /// Read back a previously stored table; `None` when nothing is cached.
    fn load(&self) -> io::Result<Option<Vec<f32>>>;

    /// Persist `scores` for future runs.
    fn store(&self, scores: &[f32]) -> io::Result<()>;
}

/// File-backed cache holding little-endian IEEE-754 `f32` values in
/// enumeration order.
#[derive(Debug, Clone)]
pub struct FileTableCache {
    path: PathBuf,
}

impl FileTableCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileTableCache { path: path.into() }
    }

    /// Conventional cache file below `dir`, keyed by the neighborhood size
    /// so a future window generalization cannot alias stale tables.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("flip-table-{n}x{n}.dat", n = NEIGHBORHOOD)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableCache for FileTableCache {
    fn load(&self) -> io::Result<Option<Vec<f32>>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };
        // A trailing partial value is dropped here and caught by the
        // caller's entry-count check.
        let entries = data.len() / 4;
        let mut scores = vec![0.0f32; entries];
        Cursor::new(&data[..entries * 4]).read_f32_into::<LittleEndian>(&mut scores)?;
        Ok(Some(scores))
    }

    fn store(&self, scores: &[f32]) -> io::Result<()> {
        let mut buf = Vec::with_capacity(scores.len() * 4);
        for &score in scores {
            buf.write_f32::<LittleEndian>(score)?;
        }
        fs::write(&self.path, buf)
    }
}

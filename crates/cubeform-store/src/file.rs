//! Directory-backed grid store.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use cubeform_core::LatticeId;
use cubeform_lattice::Grid;
use tracing::trace;

use crate::codec::{decode_grid, encode_grid};
use crate::error::StoreError;
use crate::store::GridStore;

/// One `<id>.grid` file per lattice inside a directory.
///
/// Files are written to a temporary name and renamed into place, so a
/// crash mid-save never leaves a truncated grid under a final name.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The store's root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `id`'s grid.
    pub fn path_for(&self, id: LatticeId) -> PathBuf {
        self.dir.join(format!("{id}.grid"))
    }
}

impl GridStore for FileStore {
    fn save(&mut self, id: LatticeId, grid: &Grid) -> Result<(), StoreError> {
        let path = self.path_for(id);
        if path.exists() {
            return Ok(());
        }
        let tmp = self.dir.join(format!("{id}.grid.tmp"));
        {
            let mut w = BufWriter::new(File::create(&tmp)?);
            encode_grid(&mut w, grid)?;
            w.flush()?;
        }
        fs::rename(&tmp, &path)?;
        trace!(lattice = %id, path = %path.display(), "grid saved");
        Ok(())
    }

    fn load(&self, id: LatticeId) -> Result<Grid, StoreError> {
        let file = match File::open(self.path_for(id)) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound { id })
            }
            Err(e) => return Err(e.into()),
        };
        decode_grid(&mut BufReader::new(file))
    }

    fn contains(&self, id: LatticeId) -> bool {
        self.path_for(id).exists()
    }
}

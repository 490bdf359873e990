use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::filename::thread_filename;

/// Separator between thread blocks in the written file: one blank line.
pub const BLOCK_SEPARATOR: &str = "\n\n";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    // Writability probe; the temp file is removed on drop.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Rename replaces any existing file in one step; the target is never absent.
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Writes extracted thread blocks into the raw directory.
#[derive(Debug, Clone)]
pub struct ThreadWriter {
    writer: AtomicFileWriter,
}

impl ThreadWriter {
    pub fn new(raw_dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(raw_dir),
        }
    }

    pub fn raw_dir(&self) -> &Path {
        self.writer.dir()
    }

    /// Joins `blocks` with a blank line and writes them as UTF-8 to
    /// `<raw_dir>/<author_handle>_<item_id>_thread.txt`, returning the
    /// absolute path.
    pub fn write_thread(
        &self,
        author_handle: &str,
        item_id: &str,
        blocks: &[String],
    ) -> Result<PathBuf, PersistError> {
        let filename = thread_filename(author_handle, item_id);
        let written = self.writer.write(&filename, &join_blocks(blocks))?;
        let absolute = std::path::absolute(&written)?;
        engine_info!("Thread saved: {} blocks -> {}", blocks.len(), absolute.display());
        Ok(absolute)
    }
}

pub fn join_blocks(blocks: &[String]) -> String {
    blocks.join(BLOCK_SEPARATOR)
}

//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt a budget document on
//! failure. A missing file reads as the default value; a file that exists
//! but does not parse is an error and is never silently replaced.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::PlannerError;

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> PlannerError {
    PlannerError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Read a JSON document; a file that does not exist yields `T::default()`
pub fn read_json<T, P>(path: P) -> Result<T, PlannerError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no file yet, using default");
            return Ok(T::default());
        }
        Err(e) => return Err(storage_error("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))
}

/// Temp file next to `path`, unique per process
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

/// Write a JSON document atomically
///
/// Data goes to a temp file in the same directory, is synced, then renamed
/// over the target. Readers see either the old or the new document.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), PlannerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_error("create directory", parent, e))?;
    }

    let temp_path = temp_path_for(path);
    let result = write_synced(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| storage_error("replace", path, e))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result?;

    tracing::debug!(path = %path.display(), "wrote file");
    Ok(())
}

fn write_synced<T: Serialize>(path: &Path, data: &T) -> Result<(), PlannerError> {
    let file = File::create(path).map_err(|e| storage_error("create", path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_error("serialize into", path, e))?;
    writer.flush().map_err(|e| storage_error("flush", path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_error("sync", path, e))
}

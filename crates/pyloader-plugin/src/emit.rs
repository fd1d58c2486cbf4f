//! Writing generated files next to their source.
//!
//! Each file is first written to a uniquely named temporary file in the
//! target directory and then renamed into place. [`write_files`] stages a
//! whole set before renaming any of them, so a transform leaves either all
//! of its outputs or none.

use pyloader_core::{Error, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Returns `<id><suffix>`, e.g. `src/math.py` + `.d.ts` → `src/math.py.d.ts`.
#[must_use]
pub fn sibling_path(id: &str, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{id}{suffix}"))
}

/// Contents written to a temporary file, waiting to be renamed into place.
///
/// Dropping a staged file without committing removes the temporary file.
#[derive(Debug)]
pub struct StagedFile {
    temp: NamedTempFile,
    path: PathBuf,
}

impl StagedFile {
    /// Target path of this file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renames the temporary file over the target path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] naming the target if the rename fails. The
    /// temporary file is removed in that case.
    pub fn commit(self) -> Result<PathBuf> {
        let Self { temp, path } = self;
        match temp.persist(&path) {
            Ok(_) => Ok(path),
            Err(err) => Err(Error::Io {
                path,
                source: err.error,
            }),
        }
    }
}

/// Writes `contents` to a temporary file next to `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if `path` is a directory or the temporary file
/// cannot be created or written.
pub fn stage(path: &Path, contents: &str) -> Result<StagedFile> {
    if path.is_dir() {
        return Err(Error::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::IsADirectory, "target is a directory"),
        });
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let prefix = path
        .file_name()
        .map_or_else(|| ".pyloader.".to_string(), |name| format!(".{}.", name.to_string_lossy()));

    let mut temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(io_error(path))?;
    temp.write_all(contents.as_bytes())
        .map_err(io_error(temp.path()))?;
    temp.as_file().sync_all().map_err(io_error(temp.path()))?;

    Ok(StagedFile {
        temp,
        path: path.to_path_buf(),
    })
}

/// Writes `contents` to `path` through a temporary file and a rename.
///
/// Readers never observe a half-written file.
///
/// # Errors
///
/// Returns [`Error::Io`] naming the path that failed.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    stage(path, contents)?.commit()?;
    tracing::debug!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

/// Writes every `(path, contents)` pair, or none of them.
///
/// All files are staged before the first rename. If a rename fails, files
/// already renamed by this call are removed again.
///
/// # Errors
///
/// Returns [`Error::Io`] naming the first path that failed.
pub fn write_files(files: &[(PathBuf, &str)]) -> Result<()> {
    let staged = files
        .iter()
        .map(|(path, contents)| stage(path, contents))
        .collect::<Result<Vec<_>>>()?;

    let mut committed = Vec::with_capacity(staged.len());
    for file in staged {
        match file.commit() {
            Ok(path) => committed.push(path),
            Err(err) => {
                for path in &committed {
                    if let Err(e) = fs::remove_file(path) {
                        tracing::warn!("Failed to remove {}: {}", path.display(), e);
                    }
                }
                return Err(err);
            }
        }
    }

    for (path, contents) in files {
        tracing::debug!("Wrote {} ({} bytes)", path.display(), contents.len());
    }
    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> Error + use<> {
    let path = path.to_path_buf();
    move |source| Error::Io { path, source }
}

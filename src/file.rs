// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use tempfile::NamedTempFile;

use crate::error::StoreError;

/// Create `dir` (and parents) unless it already is a directory.
pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    if dir.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    fs::create_dir_all(dir)
}

/// Directory a file lives in; "." for bare file names.
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// Replace `path` in one step: `write` fills a temp file next to it, which is then
/// renamed over the target. On any error the previous file is left untouched and
/// the temp file is removed.
pub fn replace_atomic<F>(path: &Path, write: F) -> Result<(), StoreError>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<(), StoreError>,
{
    let io_err = |source| StoreError::Io { path: path.to_path_buf(), source };

    let dir = parent_dir(path);
    ensure_directory(dir).map_err(io_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        write(&mut out)?;
        out.flush().map_err(io_err)?;
    }
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path)
        .map_err(|source| StoreError::Persist { path: path.to_path_buf(), source })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out.csv");

        replace_atomic(&target, |w| {
            w.write_all(b"a,b\n").map_err(|source| StoreError::Io { path: target.clone(), source })
        })
        .unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "a,b\n");

        replace_atomic(&target, |w| {
            w.write_all(b"c\n").map_err(|source| StoreError::Io { path: target.clone(), source })
        })
        .unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "c\n");

        let names: Vec<_> = fs::read_dir(target.parent().unwrap()).unwrap().collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn failed_write_keeps_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.csv");
        fs::write(&target, "old\n").unwrap();

        let err = replace_atomic(&target, |w| {
            let _ = w.write_all(b"half");
            Err(StoreError::MissingColumn { path: target.clone(), column: s!("x") })
        });
        assert!(err.is_err());
        assert_eq!(fs::read_to_string(&target).unwrap(), "old\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn parent_of_bare_name() {
        assert_eq!(parent_dir(Path::new("x.csv")), Path::new("."));
        assert_eq!(parent_dir(Path::new("d/x.csv")), Path::new("d"));
    }
}

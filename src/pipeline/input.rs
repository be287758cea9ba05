//! Input validation: make sure the user-supplied PDF path is a readable,
//! regular file before anything is created on disk.
//!
//! The same check backs the CLI's argument parser, so a bad path is rejected
//! before a command body (and its output directory) ever runs.

use crate::error::ViajesError;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validate that `path` exists, is a regular file, and can be opened.
pub fn validate_pdf_path(path: impl AsRef<Path>) -> Result<PathBuf, ViajesError> {
    let path = path.as_ref().to_path_buf();

    let meta = match std::fs::metadata(&path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ViajesError::PermissionDenied { path });
        }
        Err(_) => return Err(ViajesError::FileNotFound { path }),
    };

    if !meta.is_file() {
        return Err(ViajesError::NotAFile { path });
    }

    // Check read permission by attempting to open
    match std::fs::File::open(&path) {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ViajesError::PermissionDenied { path });
        }
        Err(_) => return Err(ViajesError::FileNotFound { path }),
    }

    debug!("Validated input PDF: {}", path.display());
    Ok(path)
}

/// File name without extension, as raw OS bytes. Used to name the output
/// file so non-UTF-8 names survive unchanged.
pub fn file_stem_os(path: &Path) -> OsString {
    path.file_stem()
        .filter(|s| !s.is_empty())
        .unwrap_or(OsStr::new("document"))
        .to_os_string()
}

/// File name without extension, for the Markdown title line.
pub fn file_stem(path: &Path) -> String {
    file_stem_os(path).to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("trip.pdf");
        std::fs::write(&pdf, b"%PDF-1.4").unwrap();
        assert_eq!(validate_pdf_path(&pdf).unwrap(), pdf);
    }

    #[test]
    fn rejects_missing_file() {
        let err = validate_pdf_path("/definitely/not/a/real/file.pdf").unwrap_err();
        assert!(matches!(err, ViajesError::FileNotFound { .. }), "{err}");
    }

    #[test]
    fn rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_pdf_path(dir.path()).unwrap_err();
        assert!(matches!(err, ViajesError::NotAFile { .. }), "{err}");
    }

    #[test]
    fn stem_drops_extension_and_directories() {
        assert_eq!(file_stem(Path::new("/tmp/docs/trip.pdf")), "trip");
        assert_eq!(file_stem(Path::new("report.v2.pdf")), "report.v2");
        assert_eq!(file_stem(Path::new("noext")), "noext");
    }

    #[cfg(unix)]
    #[test]
    fn os_stem_keeps_non_utf8_bytes() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};
        let path = Path::new(OsStr::from_bytes(b"/tmp/trip\xff.pdf"));
        assert_eq!(file_stem_os(path).into_vec(), b"trip\xff".to_vec());
        assert_eq!(file_stem(path), "trip\u{FFFD}");
    }
}

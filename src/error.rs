use std::path::PathBuf;
use thiserror::Error;

/// Why GPS coordinates could not be read from a JPEG file.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The file has no EXIF container, or the container has no GPS sub-IFD.
    #[error("no GPS data")]
    NoGpsData,

    /// The segment stream, EXIF container or GPS values could not be decoded.
    #[error("malformed metadata: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by a scan.
///
/// [`ScanError::DirectoryNotFound`] is always returned as-is. The other
/// variants describe per-file conditions: they only abort a scan in strict
/// mode and are logged and skipped otherwise.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("path is not a valid JPEG file: {}", path.display())]
    NotJpeg { path: PathBuf },

    #[error("failed to extract GPS data from {}: {source}", path.display())]
    ExtractionFailure {
        path: PathBuf,
        #[source]
        source: ExtractionError,
    },

    #[error("failed to read directory entry under {}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl ScanError {
    /// The file or directory the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::DirectoryNotFound(path)
            | Self::NotJpeg { path }
            | Self::ExtractionFailure { path, .. }
            | Self::Traversal { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

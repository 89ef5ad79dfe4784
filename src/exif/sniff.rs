use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Start-of-image marker followed by the first byte of the next marker.
/// Every JPEG variant (JFIF, EXIF, raw baseline) begins with these bytes.
pub const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Check a header buffer for the JPEG signature.
pub fn has_jpeg_signature(header: &[u8]) -> bool {
    header.starts_with(&JPEG_SIGNATURE)
}

/// Read the first bytes of `path` and report whether they carry the JPEG
/// signature. Only the header is read; the extension is never consulted.
pub fn sniff_jpeg(path: &Path) -> io::Result<bool> {
    let mut header = Vec::with_capacity(JPEG_SIGNATURE.len());
    File::open(path)?
        .take(JPEG_SIGNATURE.len() as u64)
        .read_to_end(&mut header)?;
    Ok(has_jpeg_signature(&header))
}

/// Infallible form of [`sniff_jpeg`]: missing, unreadable or short files and
/// directories are simply not JPEG.
pub fn is_jpeg(path: &Path) -> bool {
    sniff_jpeg(path).unwrap_or(false)
}

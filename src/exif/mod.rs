//! JPEG detection and EXIF GPS reading.
//!
//! - [`is_jpeg`] — decide from file content whether a path holds a JPEG
//! - [`CoordinateExtractor`] — read the GPS position from a JPEG's EXIF block
//!
//! Detection never looks at file extensions: a JPEG saved as `IMG_0001` or
//! `notes.txt` is found, and a text file named `photo.jpg` is rejected.

mod reader;
mod sniff;

pub use reader::{CoordinateExtractor, Coordinates};
pub use sniff::{JPEG_SIGNATURE, has_jpeg_signature, is_jpeg, sniff_jpeg};

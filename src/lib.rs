//! # gps-exif-extractor
//!
//! Recursively scan a directory for JPEG images — recognised by their content,
//! not their file extension — and extract the GPS coordinates embedded in
//! their EXIF metadata.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gps_exif_extractor::config::ScanRequest;
//! use gps_exif_extractor::pipeline::Scanner;
//!
//! fn main() -> anyhow::Result<()> {
//!     // Any `log::Log` implementation can receive the diagnostics.
//!     let scanner = Scanner::new(log::logger());
//!
//!     let request = ScanRequest::new("./photos").strict(false);
//!     for result in scanner.scan_all(&request)? {
//!         println!(
//!             "{}: {:.6}, {:.6}",
//!             result.path.display(),
//!             result.coordinates.latitude,
//!             result.coordinates.longitude,
//!         );
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Strict Mode
//!
//! By default files that are not JPEG, or are JPEG without readable GPS data,
//! are logged at info level and left out of the results. With
//! [`ScanRequest::strict`](config::ScanRequest::strict) the first such file
//! aborts the scan with a [`ScanError`] naming the file, and no partial
//! results are returned. A missing root directory is an error in both modes.
//!
//! ## Lower-Level Usage
//!
//! ```rust,no_run
//! use gps_exif_extractor::exif::{is_jpeg, CoordinateExtractor};
//! use gps_exif_extractor::logging::Diagnostics;
//! use std::path::Path;
//!
//! let path = Path::new("IMG_0042");
//! if is_jpeg(path) {
//!     let extractor = CoordinateExtractor::new(Diagnostics::new(log::logger(), true));
//!     match extractor.extract(path) {
//!         Ok(c) => println!("{}, {}", c.latitude, c.longitude),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Configuration file and the per-scan [`ScanRequest`](config::ScanRequest)
//! - [`error`] — Typed scan and extraction errors
//! - [`exif`] — JPEG content sniffing and EXIF GPS reading
//! - [`logging`] — The injected diagnostics sink
//! - [`pipeline`] — Directory walking, strict/non-strict policy, ordering

pub mod config;
pub mod error;
pub mod exif;
pub mod logging;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ExtractionError, ScanError};
pub use exif::Coordinates;
pub use pipeline::{ExtractionResult, Scanner};

use log::Log;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ScanRequest;
use crate::error::{ExtractionError, Result, ScanError};
use crate::exif::{self, CoordinateExtractor, Coordinates};
use crate::logging::Diagnostics;

/// GPS coordinates found in one JPEG file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    pub path: PathBuf,
    pub coordinates: Coordinates,
}

/// Why a candidate file was passed over before extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    NotJpeg,
}

/// What happened to a single candidate file.
#[derive(Debug)]
enum ExtractionOutcome {
    Success(Coordinates),
    Skipped(SkipReason),
    Failed(ExtractionError),
}

/// Walks a directory tree and collects the GPS position of every JPEG in it.
///
/// Files are recognised by content, so misnamed and extensionless JPEGs are
/// found. Diagnostics go to the [`Log`] sink given at construction.
///
/// # Example
///
/// ```rust,no_run
/// use gps_exif_extractor::config::ScanRequest;
/// use gps_exif_extractor::pipeline::Scanner;
///
/// let scanner = Scanner::new(log::logger());
/// let results = scanner.scan_all(&ScanRequest::new("./photos")).unwrap();
/// for r in &results {
///     println!("{}: {}, {}", r.path.display(), r.coordinates.latitude, r.coordinates.longitude);
/// }
/// ```
pub struct Scanner<'a> {
    sink: &'a dyn Log,
}

impl<'a> Scanner<'a> {
    pub fn new(sink: &'a dyn Log) -> Self {
        Self { sink }
    }

    /// Scan `request.root_directory()` recursively.
    ///
    /// Returns every successful extraction sorted by path bytes, each path at
    /// most once. A missing root is always an error. Files that are not JPEG
    /// or carry no readable GPS data are logged and skipped, unless the
    /// request is strict, in which case the first one aborts the scan and
    /// nothing else is returned.
    ///
    /// Symbolic links are resolved one level: a link to a file is scanned
    /// under the link's own path, a link to a directory is never descended.
    /// Link cycles therefore cannot recurse.
    pub fn scan_all(&self, request: &ScanRequest) -> Result<Vec<ExtractionResult>> {
        let diagnostics = Diagnostics::new(self.sink, request.is_verbose());
        let root = request.root_directory();

        if !root.is_dir() {
            diagnostics.error(format_args!(
                "Specified directory does not exist: {}",
                root.display()
            ));
            return Err(ScanError::DirectoryNotFound(root.to_path_buf()));
        }

        diagnostics.debug(format_args!(
            "Scanning {} (strict: {}, jobs: {})",
            root.display(),
            request.is_strict(),
            request.worker_count()
        ));

        let outcome = collect_candidates(root, request.is_strict(), diagnostics)
            .and_then(|candidates| self.process_all(&candidates, request, diagnostics));

        let mut results = match outcome {
            Ok(results) => results,
            Err(err) => {
                diagnostics.error(format_args!("{err}"));
                return Err(err);
            }
        };

        sort_by_path(&mut results);
        results.dedup_by(|a, b| a.path == b.path);

        diagnostics.debug(format_args!(
            "Found coordinates in {} file(s) under {}",
            results.len(),
            root.display()
        ));
        Ok(results)
    }

    /// Run the JPEG gate and extraction on a single file, under the same
    /// skip/abort policy [`scan_all`](Self::scan_all) applies.
    ///
    /// Returns `Ok(None)` when the file was skipped in non-strict mode.
    pub fn extract_file(&self, path: &Path, strict: bool) -> Result<Option<Coordinates>> {
        let diagnostics = Diagnostics::new(self.sink, false);
        extract_one(path, strict, diagnostics)
    }

    fn process_all(
        &self,
        candidates: &[PathBuf],
        request: &ScanRequest,
        diagnostics: Diagnostics<'_>,
    ) -> Result<Vec<ExtractionResult>> {
        let strict = request.is_strict();
        let process = |path: &PathBuf| -> Result<Option<ExtractionResult>> {
            Ok(extract_one(path, strict, diagnostics)?.map(|coordinates| ExtractionResult {
                path: path.clone(),
                coordinates,
            }))
        };

        if request.worker_count() == 1 {
            let mut results = Vec::new();
            for path in candidates {
                results.extend(process(path)?);
            }
            return Ok(results);
        }

        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(request.worker_count())
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                diagnostics.warn(format_args!(
                    "Failed to start worker pool, scanning sequentially: {e}"
                ));
                return self.process_all(candidates, &request.clone().jobs(1), diagnostics);
            }
        };

        // Collecting into a Result stops handing out work after the first
        // error. Which error wins among concurrent failures is unspecified.
        let results: Vec<Option<ExtractionResult>> =
            pool.install(|| candidates.par_iter().map(process).collect::<Result<_>>())?;
        Ok(results.into_iter().flatten().collect())
    }
}

/// Sort by the raw encoded bytes of each path, i.e. plain codepoint order for
/// UTF-8 names. `Path`'s own ordering compares component-wise, which would
/// put `a/b` before `a-b`.
pub fn sort_by_path(results: &mut [ExtractionResult]) {
    results.sort_by(|a, b| {
        a.path
            .as_os_str()
            .as_encoded_bytes()
            .cmp(b.path.as_os_str().as_encoded_bytes())
    });
}

/// Gate, extract, then settle the outcome under the strict policy.
fn extract_one(
    path: &Path,
    strict: bool,
    diagnostics: Diagnostics<'_>,
) -> Result<Option<Coordinates>> {
    let outcome = classify(path, diagnostics);
    settle(path, outcome, strict, diagnostics)
}

fn classify(path: &Path, diagnostics: Diagnostics<'_>) -> ExtractionOutcome {
    match exif::sniff_jpeg(path) {
        Ok(true) => {}
        Ok(false) => return ExtractionOutcome::Skipped(SkipReason::NotJpeg),
        Err(e) => {
            diagnostics.debug(format_args!("Could not read {}: {e}", path.display()));
            return ExtractionOutcome::Skipped(SkipReason::NotJpeg);
        }
    }

    match CoordinateExtractor::new(diagnostics).extract(path) {
        Ok(coordinates) => ExtractionOutcome::Success(coordinates),
        Err(e) => ExtractionOutcome::Failed(e),
    }
}

/// The single place where strict mode is decided: every non-success outcome
/// becomes a [`ScanError`] and is either returned or logged and dropped.
fn settle(
    path: &Path,
    outcome: ExtractionOutcome,
    strict: bool,
    diagnostics: Diagnostics<'_>,
) -> Result<Option<Coordinates>> {
    let rejection = match outcome {
        ExtractionOutcome::Success(coordinates) => return Ok(Some(coordinates)),
        ExtractionOutcome::Skipped(SkipReason::NotJpeg) => ScanError::NotJpeg {
            path: path.to_path_buf(),
        },
        ExtractionOutcome::Failed(source) => ScanError::ExtractionFailure {
            path: path.to_path_buf(),
            source,
        },
    };
    reject(rejection, strict, diagnostics).map(|()| None)
}

fn reject(error: ScanError, strict: bool, diagnostics: Diagnostics<'_>) -> Result<()> {
    if strict {
        return Err(error);
    }
    diagnostics.info(format_args!("Skipping: {error}"));
    Ok(())
}

/// Enumerate every file under `root` that should be sniffed.
fn collect_candidates(
    root: &Path,
    strict: bool,
    diagnostics: Diagnostics<'_>,
) -> Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                let path = source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                reject(ScanError::Traversal { path, source }, strict, diagnostics)?;
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_file() {
            candidates.push(entry.into_path());
        } else if file_type.is_symlink() {
            // Resolve one level only. Directory links are never walked.
            match std::fs::metadata(entry.path()) {
                Ok(meta) if meta.is_dir() => diagnostics.debug(format_args!(
                    "Not following directory link {}",
                    entry.path().display()
                )),
                _ => candidates.push(entry.into_path()),
            }
        }
    }

    diagnostics.debug(format_args!(
        "Found {} candidate file(s) under {}",
        candidates.len(),
        root.display()
    ));
    Ok(candidates)
}

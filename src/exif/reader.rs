use exif::{Exif, In, Rational, Tag, Value};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use crate::error::ExtractionError;
use crate::logging::Diagnostics;

/// A position in signed decimal degrees: positive north and east, negative
/// south and west.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Reads GPS coordinates out of JPEG files.
///
/// The extractor trusts its caller to have sniffed the file as JPEG already
/// (see [`is_jpeg`](super::is_jpeg)).
#[derive(Debug, Clone, Copy)]
pub struct CoordinateExtractor<'a> {
    diagnostics: Diagnostics<'a>,
}

impl<'a> CoordinateExtractor<'a> {
    pub fn new(diagnostics: Diagnostics<'a>) -> Self {
        Self { diagnostics }
    }

    /// Extract the GPS position embedded in the EXIF block of `path`.
    pub fn extract(&self, path: &Path) -> Result<Coordinates, ExtractionError> {
        self.diagnostics
            .debug(format_args!("Extracting GPS data from {}", path.display()));

        let mut reader = BufReader::new(File::open(path)?);
        let exif = exif::Reader::new()
            .read_from_container(&mut reader)
            .map_err(metadata_error)?;

        let coordinates = gps_coordinates(&exif)?;
        self.diagnostics.debug(format_args!(
            "Found {}, {} in {}",
            coordinates.latitude,
            coordinates.longitude,
            path.display()
        ));
        Ok(coordinates)
    }
}

/// A JPEG without an EXIF container has no GPS block. Running out of bytes
/// mid-segment is a corrupt file, not an I/O failure.
fn metadata_error(err: exif::Error) -> ExtractionError {
    match err {
        exif::Error::NotFound(_) => ExtractionError::NoGpsData,
        exif::Error::Io(e) if e.kind() != ErrorKind::UnexpectedEof => ExtractionError::Io(e),
        other => ExtractionError::Malformed(other.to_string()),
    }
}

fn gps_coordinates(exif: &Exif) -> Result<Coordinates, ExtractionError> {
    let latitude = exif.get_field(Tag::GPSLatitude, In::PRIMARY);
    let longitude = exif.get_field(Tag::GPSLongitude, In::PRIMARY);
    if latitude.is_none() && longitude.is_none() {
        return Err(ExtractionError::NoGpsData);
    }

    Ok(Coordinates {
        latitude: axis_value(exif, Axis::Latitude)?,
        longitude: axis_value(exif, Axis::Longitude)?,
    })
}

fn axis_value(exif: &Exif, axis: Axis) -> Result<f64, ExtractionError> {
    let (value_tag, ref_tag) = match axis {
        Axis::Latitude => (Tag::GPSLatitude, Tag::GPSLatitudeRef),
        Axis::Longitude => (Tag::GPSLongitude, Tag::GPSLongitudeRef),
    };

    let dms = match exif.get_field(value_tag, In::PRIMARY).map(|f| &f.value) {
        Some(Value::Rational(parts)) if parts.len() >= 3 => [parts[0], parts[1], parts[2]],
        Some(_) => {
            return Err(ExtractionError::Malformed(format!(
                "GPS {axis:?} is not three rationals"
            )));
        }
        None => {
            return Err(ExtractionError::Malformed(format!("GPS {axis:?} is missing")));
        }
    };

    let reference = match exif.get_field(ref_tag, In::PRIMARY).map(|f| &f.value) {
        Some(Value::Ascii(strings)) => strings
            .first()
            .and_then(|s| s.first())
            .map(|&b| char::from(b)),
        _ => None,
    }
    .ok_or_else(|| ExtractionError::Malformed(format!("GPS {axis:?} reference is missing")))?;

    dms_to_decimal(&dms, reference, axis)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn limit(self) -> f64 {
        match self {
            Self::Latitude => 90.0,
            Self::Longitude => 180.0,
        }
    }

    /// Sign implied by a GPS reference letter, or `None` if the letter does
    /// not belong to this axis.
    fn sign(self, reference: char) -> Option<f64> {
        match (self, reference.to_ascii_uppercase()) {
            (Self::Latitude, 'N') | (Self::Longitude, 'E') => Some(1.0),
            (Self::Latitude, 'S') | (Self::Longitude, 'W') => Some(-1.0),
            _ => None,
        }
    }
}

fn rational_to_f64(value: &Rational, part: &str) -> Result<f64, ExtractionError> {
    if value.denom == 0 {
        return Err(ExtractionError::Malformed(format!(
            "GPS {part} has a zero denominator"
        )));
    }
    Ok(f64::from(value.num) / f64::from(value.denom))
}

/// Convert a degrees/minutes/seconds triple plus reference letter to signed
/// decimal degrees.
fn dms_to_decimal(
    dms: &[Rational; 3],
    reference: char,
    axis: Axis,
) -> Result<f64, ExtractionError> {
    let sign = axis.sign(reference).ok_or_else(|| {
        ExtractionError::Malformed(format!("invalid GPS {axis:?} reference {reference:?}"))
    })?;

    let degrees = rational_to_f64(&dms[0], "degrees")?;
    let minutes = rational_to_f64(&dms[1], "minutes")?;
    let seconds = rational_to_f64(&dms[2], "seconds")?;

    let coord = degrees + minutes / 60.0 + seconds / 3600.0;
    if !coord.is_finite() || coord > axis.limit() {
        return Err(ExtractionError::Malformed(format!(
            "GPS {axis:?} {coord} is out of range"
        )));
    }

    Ok(sign * coord)
}

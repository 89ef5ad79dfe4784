//! Fixtures shared by the unit tests: a capturing log sink and a byte-level
//! builder for small JPEG files carrying an EXIF APP1 segment.

use log::{Level, Log, Metadata, Record};
use std::sync::Mutex;

struct Captured {
    level: Level,
    target: String,
    module_path: Option<String>,
    message: String,
}

#[derive(Default)]
pub struct CapturingLog {
    records: Mutex<Vec<Captured>>,
}

impl CapturingLog {
    /// Usable in a `static` so it can be installed as the global logger.
    pub const fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| (r.level, r.message.clone()))
            .collect()
    }

    pub fn targets(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.target.clone())
            .collect()
    }

    pub fn module_paths(&self) -> Vec<Option<String>> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.module_path.clone())
            .collect()
    }

    pub fn count(&self, level: Level) -> usize {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.level == level)
            .count()
    }
}

impl Log for CapturingLog {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records.lock().unwrap().push(Captured {
            level: record.level(),
            target: record.target().to_string(),
            module_path: record.module_path().map(str::to_string),
            message: record.args().to_string(),
        });
    }

    fn flush(&self) {}
}

// TIFF field types
const BYTE: u16 = 1;
const ASCII: u16 = 2;
const SHORT: u16 = 3;
const LONG: u16 = 4;
const RATIONAL: u16 = 5;

const TAG_ORIENTATION: u16 = 0x0112;
const TAG_GPS_IFD: u16 = 0x8825;

/// One degrees/minutes/seconds triple as stored in a GPS rational array.
#[derive(Debug, Clone, Copy)]
pub struct Dms {
    pub degrees: (u32, u32),
    pub minutes: (u32, u32),
    pub seconds: (u32, u32),
}

impl Dms {
    /// Split an absolute decimal value the way cameras usually store it:
    /// whole degrees and minutes, seconds with four decimal places.
    pub fn from_decimal(value: f64) -> Self {
        let value = value.abs();
        let degrees = value.floor();
        let minutes = ((value - degrees) * 60.0).floor();
        let seconds = ((value - degrees - minutes / 60.0) * 3600.0 * 10000.0).round();
        Self {
            degrees: (degrees as u32, 1),
            minutes: (minutes as u32, 1),
            seconds: (seconds as u32, 10000),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GpsFixture {
    pub latitude_ref: u8,
    pub latitude: Dms,
    pub longitude_ref: u8,
    pub longitude: Dms,
}

impl GpsFixture {
    pub fn from_decimal(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude_ref: if latitude >= 0.0 { b'N' } else { b'S' },
            latitude: Dms::from_decimal(latitude),
            longitude_ref: if longitude >= 0.0 { b'E' } else { b'W' },
            longitude: Dms::from_decimal(longitude),
        }
    }
}

struct Field {
    tag: u16,
    kind: u16,
    count: u32,
    data: Vec<u8>,
}

fn rationals(values: &[(u32, u32)]) -> Vec<u8> {
    values
        .iter()
        .flat_map(|(num, den)| num.to_le_bytes().into_iter().chain(den.to_le_bytes()))
        .collect()
}

fn dms_field(tag: u16, dms: &Dms) -> Field {
    Field {
        tag,
        kind: RATIONAL,
        count: 3,
        data: rationals(&[dms.degrees, dms.minutes, dms.seconds]),
    }
}

/// Append an IFD at the current end of `out`. Values longer than four bytes
/// go in a data area right after the IFD. Returns the patch position of each
/// field's value slot so callers can fix up sub-IFD pointers.
fn write_ifd(out: &mut Vec<u8>, mut fields: Vec<Field>) -> Vec<usize> {
    fields.sort_by_key(|f| f.tag);
    let ifd_start = out.len();
    let data_start = ifd_start + 2 + fields.len() * 12 + 4;
    let mut data_area = Vec::new();
    let mut slots = Vec::new();

    out.extend_from_slice(&(fields.len() as u16).to_le_bytes());
    for field in &fields {
        out.extend_from_slice(&field.tag.to_le_bytes());
        out.extend_from_slice(&field.kind.to_le_bytes());
        out.extend_from_slice(&field.count.to_le_bytes());
        slots.push(out.len());
        if field.data.len() <= 4 {
            let mut inline = field.data.clone();
            inline.resize(4, 0);
            out.extend_from_slice(&inline);
        } else {
            let offset = (data_start + data_area.len()) as u32;
            out.extend_from_slice(&offset.to_le_bytes());
            data_area.extend_from_slice(&field.data);
        }
    }
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&data_area);
    slots
}

/// A little-endian TIFF structure with IFD0 and, optionally, a GPS sub-IFD.
pub fn tiff(gps: Option<&GpsFixture>) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"II");
    out.extend_from_slice(&42u16.to_le_bytes());
    out.extend_from_slice(&8u32.to_le_bytes());

    let mut ifd0 = vec![Field {
        tag: TAG_ORIENTATION,
        kind: SHORT,
        count: 1,
        data: 1u16.to_le_bytes().to_vec(),
    }];
    if gps.is_some() {
        ifd0.push(Field {
            tag: TAG_GPS_IFD,
            kind: LONG,
            count: 1,
            data: 0u32.to_le_bytes().to_vec(),
        });
    }
    let slots = write_ifd(&mut out, ifd0);

    if let Some(gps) = gps {
        let gps_ifd_offset = out.len() as u32;
        let slot = slots[1];
        out[slot..slot + 4].copy_from_slice(&gps_ifd_offset.to_le_bytes());

        write_ifd(
            &mut out,
            vec![
                Field {
                    tag: 0x0000,
                    kind: BYTE,
                    count: 4,
                    data: vec![2, 3, 0, 0],
                },
                Field {
                    tag: 0x0001,
                    kind: ASCII,
                    count: 2,
                    data: vec![gps.latitude_ref, 0],
                },
                dms_field(0x0002, &gps.latitude),
                Field {
                    tag: 0x0003,
                    kind: ASCII,
                    count: 2,
                    data: vec![gps.longitude_ref, 0],
                },
                dms_field(0x0004, &gps.longitude),
                Field {
                    tag: 0x0005,
                    kind: BYTE,
                    count: 1,
                    data: vec![0],
                },
                Field {
                    tag: 0x0006,
                    kind: RATIONAL,
                    count: 1,
                    data: rationals(&[(35, 1)]),
                },
            ],
        );
    }
    out
}

fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, marker];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

fn jfif_segment() -> Vec<u8> {
    segment(
        0xE0,
        &[b'J', b'F', b'I', b'F', 0, 1, 1, 0, 0, 1, 0, 1, 0, 0],
    )
}

/// SOI, JFIF APP0, the given APP1 payload (if any), a tiny scan, EOI.
pub fn jpeg_with_app1(app1_payload: Option<&[u8]>) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    out.extend(jfif_segment());
    if let Some(payload) = app1_payload {
        out.extend(segment(0xE1, payload));
    }
    out.extend(segment(0xDA, &[1, 1, 0, 0, 0x3F, 0]));
    out.extend_from_slice(&[0x00, 0x00, 0xFF, 0xD9]);
    out
}

pub fn exif_payload(tiff: &[u8]) -> Vec<u8> {
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(tiff);
    payload
}

/// A JPEG whose EXIF block carries the given coordinates.
pub fn jpeg_with_gps(latitude: f64, longitude: f64) -> Vec<u8> {
    let gps = GpsFixture::from_decimal(latitude, longitude);
    jpeg_with_app1(Some(&exif_payload(&tiff(Some(&gps)))))
}

/// A JPEG with an EXIF block but no GPS sub-IFD.
pub fn jpeg_without_gps() -> Vec<u8> {
    jpeg_with_app1(Some(&exif_payload(&tiff(None))))
}

/// A JPEG with no APP1 segment at all.
pub fn jpeg_without_exif() -> Vec<u8> {
    jpeg_with_app1(None)
}

pub const EIFFEL_TOWER: (f64, f64) = (48.8584, 2.2945);

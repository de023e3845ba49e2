use crate::metadata::MetadataReader;
use anyhow::Context;
use exif::{Exif, In, Rational, Reader, Tag, Value};
use geoshiftcore::GeoSample;
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads GPS position tags from the EXIF block of an image file.
pub struct ExifGpsReader;

impl MetadataReader for ExifGpsReader {
    fn read(&self, path: &Path) -> anyhow::Result<GeoSample> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let mut buffered = BufReader::new(file);
        match Reader::new().read_from_container(&mut buffered) {
            Ok(exif) => Ok(gps_sample(&exif)),
            Err(err) => {
                debug!("no EXIF in {}: {}", path.display(), err);
                Ok(GeoSample::default())
            }
        }
    }
}

fn gps_sample(exif: &Exif) -> GeoSample {
    GeoSample {
        latitude: signed_coordinate(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, b'S'),
        longitude: signed_coordinate(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, b'W'),
        altitude: altitude(exif),
    }
}

fn signed_coordinate(exif: &Exif, value_tag: Tag, ref_tag: Tag, negative_ref: u8) -> Option<f64> {
    let field = exif.get_field(value_tag, In::PRIMARY)?;
    let degrees = match &field.value {
        Value::Rational(parts) => dms_to_degrees(parts)?,
        _ => return None,
    };
    let reference = exif
        .get_field(ref_tag, In::PRIMARY)
        .and_then(|field| ascii_initial(&field.value));
    Some(apply_reference(degrees, reference, negative_ref))
}

fn altitude(exif: &Exif) -> Option<f64> {
    let field = exif.get_field(Tag::GPSAltitude, In::PRIMARY)?;
    let meters = match &field.value {
        Value::Rational(parts) => rational(parts.first()?)?,
        _ => return None,
    };
    // GPSAltitudeRef 1 means below sea level.
    let below_sea_level = exif
        .get_field(Tag::GPSAltitudeRef, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        == Some(1);
    Some(if below_sea_level { -meters } else { meters })
}

fn ascii_initial(value: &Value) -> Option<u8> {
    match value {
        Value::Ascii(strings) => strings.first()?.first().copied(),
        _ => None,
    }
}

fn rational(value: &Rational) -> Option<f64> {
    if value.denom == 0 {
        None
    } else {
        Some(value.to_f64())
    }
}

/// Degrees, minutes and seconds; trailing components may be missing.
fn dms_to_degrees(parts: &[Rational]) -> Option<f64> {
    if parts.is_empty() {
        return None;
    }
    let mut degrees = 0.0;
    let mut divisor = 1.0;
    for part in parts.iter().take(3) {
        degrees += rational(part)? / divisor;
        divisor *= 60.0;
    }
    Some(degrees)
}

fn apply_reference(value: f64, reference: Option<u8>, negative_ref: u8) -> f64 {
    match reference {
        Some(r) if r.to_ascii_uppercase() == negative_ref => -value,
        _ => value,
    }
}

use crate::catalog::{file_name, list_files};
use crate::metadata::MetadataStripper;
use anyhow::Context;
use exif::{Exif, In, Reader, Tag};
use log::{debug, info};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Created inside the scanned directory; holds the dump and the clean copies.
pub const STRIPPED_DIRECTORY: &str = "stripped-data";
pub const DUMP_FILE: &str = "EXIF.csv";
pub const CLEAN_PREFIX: &str = "clean_";

const BLANK: &str = " ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifField {
    pub tag: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripSummary {
    pub files: usize,
    pub fields: usize,
    pub dump_path: PathBuf,
    pub output_directory: PathBuf,
}

/// Every primary-image EXIF field of `path` except the maker note. A file
/// without an EXIF block has no fields.
pub fn read_fields(path: &Path) -> anyhow::Result<Vec<ExifField>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut buffered = BufReader::new(file);
    match Reader::new().read_from_container(&mut buffered) {
        Ok(exif) => Ok(primary_fields(&exif)),
        Err(err) => {
            debug!("no EXIF in {}: {}", path.display(), err);
            Ok(Vec::new())
        }
    }
}

fn primary_fields(exif: &Exif) -> Vec<ExifField> {
    exif.fields()
        .filter(|field| field.ifd_num == In::PRIMARY && field.tag != Tag::MakerNote)
        .map(|field| ExifField {
            tag: field.tag.to_string(),
            value: field.display_value().with_unit(exif).to_string(),
        })
        .collect()
}

/// One `(file, tag, value)` row per field, the file name only on its first
/// row, and a blank row closing each file. Files without fields still get a
/// row naming them.
pub fn write_dump<W: io::Write>(
    sink: W,
    entries: &[(String, Vec<ExifField>)],
) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    for (name, fields) in entries {
        if fields.is_empty() {
            writer.write_record([name.as_str(), "", ""])?;
        }
        for (index, field) in fields.iter().enumerate() {
            let label = if index == 0 { name.as_str() } else { BLANK };
            writer.write_record([label, field.tag.as_str(), field.value.as_str()])?;
        }
        writer.write_record([BLANK, BLANK, BLANK])?;
    }
    writer.flush()?;
    Ok(())
}

/// Dumps the EXIF of every file in `directory` to `stripped-data/EXIF.csv`
/// and saves a metadata-free `clean_<name>` copy next to it. The dump is
/// rewritten on every call.
pub fn strip_directory(
    directory: &Path,
    stripper: &dyn MetadataStripper,
) -> anyhow::Result<StripSummary> {
    let paths = list_files(directory)?;
    let output_directory = directory.join(STRIPPED_DIRECTORY);
    fs::create_dir_all(&output_directory)
        .with_context(|| format!("creating {}", output_directory.display()))?;

    let mut entries = Vec::with_capacity(paths.len());
    for path in &paths {
        let name = file_name(path);
        let fields = read_fields(path)
            .with_context(|| format!("reading metadata of {}", path.display()))?;

        let target = output_directory.join(format!("{CLEAN_PREFIX}{name}"));
        if target.exists() {
            fs::remove_file(&target)
                .with_context(|| format!("replacing {}", target.display()))?;
        }
        stripper.strip_all(path, &target)?;
        info!("Processed file {}", name);
        entries.push((name, fields));
    }

    let dump_path = output_directory.join(DUMP_FILE);
    let dump = File::create(&dump_path)
        .with_context(|| format!("creating {}", dump_path.display()))?;
    write_dump(dump, &entries).with_context(|| format!("writing {}", dump_path.display()))?;

    Ok(StripSummary {
        files: entries.len(),
        fields: entries.iter().map(|(_, fields)| fields.len()).sum(),
        dump_path,
        output_directory,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::testing::CopyingStripper;

    /// Big-endian TIFF with one IFD0 entry per `(tag, type, count, value)`
    /// and an optional Exif sub-IFD, wrapped in a minimal JPEG.
    fn jpeg(ifd0: &[(u16, u16, u32, [u8; 4])], exif_ifd: &[(u16, u16, u32, [u8; 4])]) -> Vec<u8> {
        let mut primary = ifd0.to_vec();
        let ifd0_len = 2 + 12 * (primary.len() + usize::from(!exif_ifd.is_empty())) + 4;
        if !exif_ifd.is_empty() {
            let offset = (8 + ifd0_len) as u32;
            primary.push((0x8769, 4, 1, offset.to_be_bytes()));
        }

        let mut tiff = b"MM\x00\x2a\x00\x00\x00\x08".to_vec();
        for ifd in [primary.as_slice(), exif_ifd] {
            if ifd.is_empty() {
                continue;
            }
            tiff.extend_from_slice(&(ifd.len() as u16).to_be_bytes());
            for (tag, kind, count, value) in ifd {
                tiff.extend_from_slice(&tag.to_be_bytes());
                tiff.extend_from_slice(&kind.to_be_bytes());
                tiff.extend_from_slice(&count.to_be_bytes());
                tiff.extend_from_slice(value);
            }
            tiff.extend_from_slice(&0u32.to_be_bytes());
        }

        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE1];
        bytes.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
        bytes.extend_from_slice(b"Exif\x00\x00");
        bytes.extend_from_slice(&tiff);
        bytes.extend_from_slice(&[0xFF, 0xD9]);
        bytes
    }

    const MAKE: (u16, u16, u32, [u8; 4]) = (0x010F, 2, 4, *b"Abc\x00");
    const MAKER_NOTE: (u16, u16, u32, [u8; 4]) = (0x927C, 7, 4, *b"XYZW");

    fn rows(path: &Path) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap()
            .records()
            .map(|record| record.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn maker_note_is_left_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        fs::write(&path, jpeg(&[MAKE], &[MAKER_NOTE])).unwrap();

        let fields = read_fields(&path).unwrap();
        assert!(fields.iter().any(|field| field.tag == "Make" && field.value.contains("Abc")));
        assert!(fields.iter().all(|field| field.tag != "MakerNote"));
    }

    #[test]
    fn file_without_exif_has_no_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"plain text").unwrap();
        assert!(read_fields(&path).unwrap().is_empty());
    }

    #[test]
    fn dump_labels_first_row_and_separates_files() {
        let entries = vec![
            (
                "a.jpg".to_string(),
                vec![
                    ExifField {
                        tag: "Make".into(),
                        value: "Acme, Inc".into(),
                    },
                    ExifField {
                        tag: "Model".into(),
                        value: "X1".into(),
                    },
                ],
            ),
            ("b.png".to_string(), Vec::new()),
        ];
        let mut buffer = Vec::new();
        write_dump(&mut buffer, &entries).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "a.jpg,Make,\"Acme, Inc\"\n \
             ,Model,X1\n \
             , , \n\
             b.png,,\n \
             , , \n"
        );
    }

    #[test]
    fn strip_directory_dumps_and_copies_every_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("photo.jpg"), jpeg(&[MAKE], &[])).unwrap();
        fs::write(dir.path().join("notes.txt"), b"plain text").unwrap();
        let stripper = CopyingStripper::default();

        let summary = strip_directory(dir.path(), &stripper).unwrap();

        let output = dir.path().join(STRIPPED_DIRECTORY);
        assert_eq!(summary.files, 2);
        assert_eq!(summary.fields, 1);
        assert_eq!(summary.dump_path, output.join(DUMP_FILE));
        assert_eq!(
            *stripper.targets.borrow(),
            vec![output.join("clean_notes.txt"), output.join("clean_photo.jpg")]
        );
        assert!(output.join("clean_photo.jpg").is_file());

        let rows = rows(&summary.dump_path);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], vec!["notes.txt", "", ""]);
        assert_eq!(rows[1], vec![" ", " ", " "]);
        assert_eq!(rows[2][0], "photo.jpg");
        assert_eq!(rows[2][1], "Make");
        assert!(rows[2][2].contains("Abc"));
        assert_eq!(rows[3], vec![" ", " ", " "]);
    }

    #[test]
    fn rerun_rewrites_the_dump_and_replaces_copies() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("photo.jpg"), jpeg(&[MAKE], &[])).unwrap();

        strip_directory(dir.path(), &CopyingStripper::default()).unwrap();
        let summary = strip_directory(dir.path(), &CopyingStripper::default()).unwrap();

        assert_eq!(summary.files, 1);
        assert_eq!(rows(&summary.dump_path).len(), 2);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = strip_directory(&dir.path().join("absent"), &CopyingStripper::default());
        assert!(result.is_err());
        assert!(!dir.path().join("absent").exists());
    }
}

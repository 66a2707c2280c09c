use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use exif::{In, Reader, Tag, Value};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExifFields {
    pub values: BTreeMap<String, String>,
    pub captured_at: Option<NaiveDateTime>,
}

pub fn read_exif_fields(path: &Path) -> Result<ExifFields> {
    let file = File::open(path)
        .with_context(|| format!("cannot open file for EXIF decoding: {}", path.display()))?;
    let mut buf = BufReader::new(file);
    let exif = Reader::new()
        .read_from_container(&mut buf)
        .with_context(|| format!("failed to decode EXIF data: {}", path.display()))?;

    let mut values = BTreeMap::new();
    for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
        let rendered = field.display_value().to_string();
        let value = rendered.trim_matches('"');
        if value.is_empty() {
            continue;
        }
        values
            .entry(field.tag.to_string())
            .or_insert_with(|| value.to_string());
    }

    let captured_at = [Tag::DateTimeOriginal, Tag::DateTime]
        .into_iter()
        .find_map(|tag| capture_time(&exif, tag));

    Ok(ExifFields {
        values,
        captured_at,
    })
}

fn capture_time(exif: &exif::Exif, tag: Tag) -> Option<NaiveDateTime> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let Value::Ascii(ref lines) = field.value else {
        return None;
    };
    let parsed = exif::DateTime::from_ascii(lines.first()?).ok()?;
    NaiveDate::from_ymd_opt(
        i32::from(parsed.year),
        u32::from(parsed.month),
        u32::from(parsed.day),
    )?
    .and_hms_opt(
        u32::from(parsed.hour),
        u32::from(parsed.minute),
        u32::from(parsed.second),
    )
}

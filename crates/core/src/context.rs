use crate::exif_reader::ExifFields;
use crate::fixer::FilenameFixer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const KEY_EXTENSION: &str = "Extension";
pub const KEY_FILE_NAME: &str = "FileName";
pub const KEY_FILE_NAME_CLEAN: &str = "FileNameClean";
pub const KEY_DATE: &str = "Date";
pub const KEY_TIME: &str = "Time";
pub const KEY_DATE_TIME: &str = "DateTime";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageContext {
    values: BTreeMap<String, String>,
}

impl ImageContext {
    pub fn from_file_name(file_name: &str, fixer: &FilenameFixer) -> Self {
        let (stem, extension) = split_extension(file_name);
        let mut context = Self::default();
        context.insert(KEY_EXTENSION, extension.to_lowercase());
        context.insert(KEY_FILE_NAME, stem);
        context.insert(KEY_FILE_NAME_CLEAN, fixer.fix(stem));
        context
    }

    /// Without a usable capture time `DateTime` falls back to the raw EXIF
    /// string with `:` swapped for `-`.
    pub fn merge_exif(&mut self, exif: &ExifFields) {
        for (key, value) in &exif.values {
            self.insert(key, value);
        }

        match exif.captured_at {
            Some(captured) => {
                self.insert(KEY_DATE, captured.format("%Y-%m-%d").to_string());
                self.insert(KEY_TIME, captured.format("%H-%M-%S").to_string());
                self.insert(
                    KEY_DATE_TIME,
                    captured.format("%Y-%m-%dT%H-%M-%S").to_string(),
                );
            }
            None => {
                let raw = self.get(KEY_DATE_TIME).unwrap_or_default().replace(':', "-");
                self.insert(KEY_DATE_TIME, raw);
            }
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// `.hidden` is all extension.
fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(pos) => file_name.split_at(pos),
        None => (file_name, ""),
    }
}

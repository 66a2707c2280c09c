use log::error;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn collect_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                error!(
                    "cannot read {}: {err}",
                    err.path().unwrap_or(root).display()
                );
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }
        out.push(entry.into_path());
    }
    out
}

use crate::context::ImageContext;
use crate::exif_reader::read_exif_fields;
use crate::fixer::FilenameFixer;
use crate::sanitize::sanitize_filename;
use crate::template::{parse_template, render_template, TemplatePart};
use crate::walk::collect_files;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RenameOptions {
    pub target: PathBuf,
    pub template: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameCandidate {
    pub original_path: PathBuf,
    pub target_path: PathBuf,
    pub rendered_name: String,
    pub changed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RenameStats {
    pub scanned_files: usize,
    pub planned: usize,
    pub unchanged: usize,
    pub skipped_no_exif: usize,
    pub skipped_template: usize,
    pub skipped_non_utf8: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamePlan {
    pub target_root: PathBuf,
    pub template: String,
    pub candidates: Vec<RenameCandidate>,
    pub stats: RenameStats,
}

enum Rendered {
    Name(String),
    NonUtf8Name,
    NoExif,
    TemplateFailed,
}

pub fn generate_rename_plan(options: &RenameOptions) -> Result<RenamePlan> {
    if !options.target.is_dir() {
        anyhow::bail!("target directory does not exist: {}", options.target.display());
    }

    let parts = parse_template(&options.template)?;
    let fixer = FilenameFixer::new();
    let files = collect_files(&options.target);
    let mut stats = RenameStats {
        scanned_files: files.len(),
        ..RenameStats::default()
    };

    // EXIF decoding dominates; collision resolution below stays sequential so
    // the outcome does not depend on scheduling.
    let rendered: Vec<Rendered> = files
        .par_iter()
        .map(|path| render_name(path, &parts, &fixer))
        .collect();

    let mut candidates = Vec::with_capacity(files.len());
    let mut planned_paths = HashSet::<PathBuf>::new();

    for (path, rendered) in files.into_iter().zip(rendered) {
        let name = match rendered {
            Rendered::Name(name) => name,
            Rendered::NonUtf8Name => {
                stats.skipped_non_utf8 += 1;
                continue;
            }
            Rendered::NoExif => {
                stats.skipped_no_exif += 1;
                continue;
            }
            Rendered::TemplateFailed => {
                stats.skipped_template += 1;
                continue;
            }
        };

        let target = resolve_collision(&path, &name, &mut planned_paths)?;
        let changed = target != path;
        if changed {
            info!("rename {} -> {}", path.display(), target.display());
        } else {
            debug!("no change necessary: {}", path.display());
            stats.unchanged += 1;
        }

        stats.planned += 1;
        candidates.push(RenameCandidate {
            original_path: path,
            target_path: target,
            rendered_name: name,
            changed,
        });
    }

    Ok(RenamePlan {
        target_root: options.target.clone(),
        template: options.template.clone(),
        candidates,
        stats,
    })
}

fn render_name(path: &Path, parts: &[TemplatePart], fixer: &FilenameFixer) -> Rendered {
    let Some(file_name) = path.file_name().and_then(|v| v.to_str()) else {
        warn!("skipping file with a non UTF-8 name: {}", path.display());
        return Rendered::NonUtf8Name;
    };

    debug!("decoding EXIF data: {}", path.display());
    let exif = match read_exif_fields(path) {
        Ok(exif) => exif,
        Err(err) => {
            warn!("skipping {}: {err:#}", path.display());
            return Rendered::NoExif;
        }
    };

    let mut context = ImageContext::from_file_name(file_name, fixer);
    context.merge_exif(&exif);

    match render_template(parts, &context) {
        Ok(rendered) => Rendered::Name(sanitize_filename(&rendered)),
        Err(err) => {
            warn!("failed to render template for {}: {err}", path.display());
            Rendered::TemplateFailed
        }
    }
}

fn resolve_collision(
    original_path: &Path,
    name: &str,
    planned_paths: &mut HashSet<PathBuf>,
) -> Result<PathBuf> {
    let parent = original_path
        .parent()
        .with_context(|| format!("file has no parent directory: {}", original_path.display()))?;

    let mut candidate = parent.join(name);
    if is_available(&candidate, original_path, planned_paths) {
        planned_paths.insert(candidate.clone());
        return Ok(candidate);
    }

    let (stem, extension) = split_name(name);
    let mut n = 1usize;
    loop {
        candidate = parent.join(format!("{stem}_{n:03}{extension}"));
        if is_available(&candidate, original_path, planned_paths) {
            planned_paths.insert(candidate.clone());
            return Ok(candidate);
        }
        n += 1;
    }
}

fn is_available(candidate: &Path, original_path: &Path, planned_paths: &HashSet<PathBuf>) -> bool {
    if planned_paths.contains(candidate) {
        return false;
    }
    if candidate == original_path {
        return true;
    }
    !candidate.exists()
}

fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) if pos > 0 => name.split_at(pos),
        _ => (name, ""),
    }
}

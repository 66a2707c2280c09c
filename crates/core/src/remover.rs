use crate::walk::collect_files;
use anyhow::{bail, Context, Result};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct RemovalOptions {
    pub target: Option<PathBuf>,
    pub candidates: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RemovalStats {
    pub candidate_names: usize,
    pub scanned_files: usize,
    pub matched: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovalPlan {
    pub target_root: Option<PathBuf>,
    pub candidate_names: Vec<String>,
    pub removals: Vec<PathBuf>,
    pub stats: RemovalStats,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RemovalResult {
    pub removed: usize,
    pub failed: usize,
}

pub fn collect_candidate_names(candidates: &[PathBuf]) -> BTreeSet<OsString> {
    let mut names = BTreeSet::new();
    for candidate in candidates {
        if !candidate.is_dir() {
            warn!("candidate directory does not exist: {}", candidate.display());
            continue;
        }
        for path in collect_files(candidate) {
            if let Some(name) = path.file_name() {
                debug!("added to removal list: {}", path.display());
                names.insert(name.to_os_string());
            }
        }
    }
    names
}

pub fn generate_removal_plan(options: &RemovalOptions) -> Result<RemovalPlan> {
    if options.candidates.is_empty() {
        bail!("at least one candidate directory is required");
    }

    if let Some(target) = options.target.as_deref() {
        if !target.is_dir() {
            bail!("target directory does not exist: {}", target.display());
        }
        ensure_disjoint(target, &options.candidates)?;
    }

    let names = collect_candidate_names(&options.candidates);
    let mut stats = RemovalStats {
        candidate_names: names.len(),
        ..RemovalStats::default()
    };

    let mut removals = Vec::new();
    match options.target.as_deref() {
        None => {
            for name in &names {
                info!("found candidate filename: {}", name.to_string_lossy());
            }
        }
        Some(target) => {
            for path in collect_files(target) {
                stats.scanned_files += 1;
                let Some(name) = path.file_name() else {
                    continue;
                };
                // Exact bytes, case-sensitive.
                if names.contains(name) {
                    info!("removing file: {}", path.display());
                    removals.push(path);
                }
            }
        }
    }
    stats.matched = removals.len();

    Ok(RemovalPlan {
        target_root: options.target.clone(),
        candidate_names: names
            .iter()
            .map(|name| name.to_string_lossy().into_owned())
            .collect(),
        removals,
        stats,
    })
}

pub fn apply_removal_plan(plan: &RemovalPlan) -> RemovalResult {
    let mut result = RemovalResult::default();
    for path in &plan.removals {
        match fs::remove_file(path) {
            Ok(()) => {
                debug!("removed {}", path.display());
                result.removed += 1;
            }
            Err(err) => {
                error!("failed to remove {}: {err}", path.display());
                result.failed += 1;
            }
        }
    }
    result
}

// Pruning a tree against itself would delete the candidates too.
fn ensure_disjoint(target: &Path, candidates: &[PathBuf]) -> Result<()> {
    let target = fs::canonicalize(target)
        .with_context(|| format!("cannot resolve target directory: {}", target.display()))?;
    for candidate in candidates {
        let Ok(resolved) = fs::canonicalize(candidate) else {
            continue;
        };
        if resolved.starts_with(&target) || target.starts_with(&resolved) {
            bail!(
                "target and candidate directories overlap: {} / {}",
                target.display(),
                candidate.display()
            );
        }
    }
    Ok(())
}

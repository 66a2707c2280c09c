use crate::planner::{RenameCandidate, RenamePlan};
use anyhow::{bail, Context, Result};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ApplyResult {
    pub renamed: usize,
    pub unchanged: usize,
    pub failed: usize,
}

pub fn apply_rename_plan(plan: &RenamePlan) -> ApplyResult {
    let mut result = ApplyResult::default();
    for candidate in &plan.candidates {
        if !candidate.changed {
            result.unchanged += 1;
            continue;
        }
        match rename_candidate(candidate) {
            Ok(()) => {
                info!(
                    "renamed {} -> {}",
                    candidate.original_path.display(),
                    candidate.target_path.display()
                );
                result.renamed += 1;
            }
            Err(err) => {
                error!("{err:#}");
                result.failed += 1;
            }
        }
    }
    result
}

fn rename_candidate(candidate: &RenameCandidate) -> Result<()> {
    let from = &candidate.original_path;
    let to = &candidate.target_path;
    if from.parent() != to.parent() {
        bail!(
            "rename would move the file to another directory: {} -> {}",
            from.display(),
            to.display()
        );
    }
    // The plan may be stale; never replace a file that appeared since.
    if to.exists() {
        bail!("rename destination already exists: {}", to.display());
    }
    fs::rename(from, to)
        .with_context(|| format!("failed to rename file: {} -> {}", from.display(), to.display()))
}

//! The rename executor: applies a plan in order with optional backups.
//!
//! Execution is best-effort. A failing item is marked and the batch moves
//! on; earlier renames are never reverted.

use crate::error::FailReason;
use crate::log::Sink;
use crate::plan::{target_occupied, ItemStatus, RenamePlan, RenamePlanItem};
use anyhow::{anyhow, Context, Result};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Options for executing a rename plan
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Copy every source into `backup_dir` before renaming it
    pub backup: bool,
    pub backup_dir: PathBuf,
    /// Report what would happen without touching the filesystem
    pub dry_run: bool,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            backup: false,
            backup_dir: PathBuf::from(".renamer/backups"),
            dry_run: false,
        }
    }
}

/// Check if the filesystem at the given path is case-insensitive
pub fn detect_case_insensitive_fs(path: &Path) -> bool {
    let temp_dir = match TempDir::new_in(path) {
        Ok(dir) => dir,
        Err(_) => return false, // Assume case-sensitive if we can't test
    };

    let test_file_lower = temp_dir.path().join("test_case_a");
    let test_file_upper = temp_dir.path().join("test_case_A");

    if fs::write(&test_file_lower, b"test").is_err() {
        return false;
    }

    // On case-insensitive FS, this will succeed
    fs::metadata(&test_file_upper).is_ok()
}

/// Calculate SHA256 checksum of a file
pub fn calculate_checksum(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Copy `source` into `batch_dir` as `<index:04>_<tag><name>`, unique within
/// the batch. A partial or unverifiable copy is removed again.
fn backup_file(source: &Path, batch_dir: &Path, index: usize, tag: &str) -> Result<PathBuf> {
    fs::create_dir_all(batch_dir)
        .with_context(|| format!("Failed to create backup directory {}", batch_dir.display()))?;

    let file_name = source
        .file_name()
        .ok_or_else(|| anyhow!("{} has no file name", source.display()))?;
    let backup_path = batch_dir.join(format!(
        "{:04}_{}{}",
        index,
        tag,
        file_name.to_string_lossy()
    ));
    if backup_path.exists() {
        return Err(anyhow!("backup {} already exists", backup_path.display()));
    }

    let verify = || -> Result<()> {
        fs::copy(source, &backup_path).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                source.display(),
                backup_path.display()
            )
        })?;
        let original = calculate_checksum(source)?;
        let copied = calculate_checksum(&backup_path)?;
        if original != copied {
            return Err(anyhow!("checksum mismatch for {}", backup_path.display()));
        }
        Ok(())
    };

    if let Err(e) = verify() {
        let _ = fs::remove_file(&backup_path);
        return Err(e);
    }
    Ok(backup_path)
}

/// Back up the source, and the file an overwrite would replace
fn backup_item(item: &mut RenamePlanItem, batch_dir: &Path, sink: &mut dyn Sink) -> Result<()> {
    let backup_path = backup_file(item.source(), batch_dir, item.index(), "")?;
    sink.debug(&format!(
        "Backed up {} to {}",
        item.source().display(),
        backup_path.display()
    ));
    item.set_backup(backup_path);

    if target_occupied(item.source(), item.target()) {
        let replaced = backup_file(item.target(), batch_dir, item.index(), "replaced_")?;
        sink.info(&format!(
            "Backed up replaced {} to {}",
            item.target().display(),
            replaced.display()
        ));
    }
    Ok(())
}

/// Perform a file rename
fn perform_rename(from: &Path, to: &Path) -> Result<()> {
    let case_only =
        from.to_string_lossy().to_lowercase() == to.to_string_lossy().to_lowercase() && from != to;

    if case_only {
        // Two-step rename so case-insensitive filesystems see a real change
        let file_name = from.file_name().unwrap_or(from.as_os_str()).to_string_lossy();
        let temp_name = from.with_file_name(format!(
            ".{}.{}.renamer.tmp",
            file_name,
            std::process::id()
        ));

        fs::rename(from, &temp_name)
            .with_context(|| format!("Failed to rename {} to temp", from.display()))?;

        if let Err(e) = fs::rename(&temp_name, to) {
            let _ = fs::rename(&temp_name, from);
            return Err(e).with_context(|| format!("Failed to rename temp to {}", to.display()));
        }
    } else {
        fs::rename(from, to)
            .with_context(|| format!("Failed to rename {} to {}", from.display(), to.display()))?;
    }
    Ok(())
}

/// Apply a plan and return it with final statuses.
///
/// Only `Planned` items are touched, strictly in plan order: target
/// existence was checked against the pre-rename state, so reordering would
/// invalidate the collision analysis.
pub fn execute(mut plan: RenamePlan, options: &ExecuteOptions, sink: &mut dyn Sink) -> RenamePlan {
    if options.dry_run {
        for item in plan.items_mut() {
            if item.status().is_planned() {
                sink.info(&format!(
                    "[DRY RUN] Rename: {} -> {}",
                    item.source().display(),
                    item.target().display()
                ));
                item.set_status(ItemStatus::WouldApply);
            }
        }
        return plan;
    }

    let batch_dir = options.backup_dir.join(format!(
        "{}_{}",
        plan.id(),
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));

    for item in plan.items_mut() {
        if !item.status().is_planned() {
            continue;
        }

        if options.backup {
            if let Err(e) = backup_item(item, &batch_dir, sink) {
                sink.error(&format!(
                    "Backup failed for {}: {:#}",
                    item.source().display(),
                    e
                ));
                item.set_status(ItemStatus::Failed(FailReason::BackupFailed(format!(
                    "{:#}",
                    e
                ))));
                continue;
            }
        }

        match perform_rename(item.source(), item.target()) {
            Ok(()) => {
                sink.info(&format!(
                    "Renamed: {} -> {}",
                    item.source().display(),
                    item.target().display()
                ));
                item.set_status(ItemStatus::Applied);
            },
            Err(e) => {
                sink.error(&format!(
                    "Error renaming {}: {:#}",
                    item.source().display(),
                    e
                ));
                item.set_status(ItemStatus::Failed(FailReason::Io(format!("{:#}", e))));
            },
        }
    }

    let stats = plan.stats();
    if stats.failed == 0 {
        sink.info(&format!("Renamed {} files", stats.applied));
    } else {
        sink.warn(&format!(
            "Renamed {} files, {} failed",
            stats.applied, stats.failed
        ));
    }
    plan
}

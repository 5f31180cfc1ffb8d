//! The rename planner: turns an ordered list of files plus a mode into a
//! validated, ordered list of (source, target) pairs.

use crate::entry::FileEntry;
use crate::error::{FailReason, RenameError, SkipReason};
use crate::log::Sink;
use crate::mode::RenameMode;
use crate::name::{validate_file_name, with_suffix};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Whether case changes also apply to the extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtensionPolicy {
    #[default]
    Keep,
    Apply,
}

/// What happens to items that resolve to the same target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// The first item in input order keeps the target, the rest are skipped
    #[default]
    KeepFirst,
    /// Every member of a colliding group is skipped
    SkipAll,
    /// Later members get `stem_1.ext`, `stem_2.ext`, ...
    Suffix,
}

#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub case_extension: ExtensionPolicy,
    pub collision: CollisionPolicy,
    /// Allow targets that already exist on disk to be replaced
    pub allow_overwrite: bool,
    /// Treat targets differing only by case as the same path
    pub case_insensitive: bool,
    /// Clock used by the `{date}` and `{time}` template placeholders
    pub now: DateTime<Local>,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            case_extension: ExtensionPolicy::default(),
            collision: CollisionPolicy::default(),
            allow_overwrite: false,
            case_insensitive: false,
            now: Local::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ItemStatus {
    Planned,
    /// Dry-run result for an item that would have been renamed
    WouldApply,
    Skipped(SkipReason),
    Applied,
    Failed(FailReason),
}

impl ItemStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::WouldApply => "would apply",
            Self::Skipped(_) => "skipped",
            Self::Applied => "applied",
            Self::Failed(_) => "failed",
        }
    }

    pub fn is_planned(&self) -> bool {
        matches!(self, Self::Planned)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped(reason) => write!(f, "skipped: {}", reason),
            Self::Failed(reason) => write!(f, "failed: {}", reason),
            other => f.write_str(other.label()),
        }
    }
}

/// One proposed rename. Only the executor changes its status.
#[derive(Debug, Clone, Serialize)]
pub struct RenamePlanItem {
    index: usize,
    source: PathBuf,
    target: PathBuf,
    size: u64,
    status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    backup: Option<PathBuf>,
}

impl RenamePlanItem {
    fn new(index: usize, entry: &FileEntry, target: PathBuf, status: ItemStatus) -> Self {
        Self {
            index,
            source: entry.path().to_path_buf(),
            target,
            size: entry.size(),
            status,
            backup: None,
        }
    }

    /// Position of the file in the input
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Source size in bytes at plan time
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn status(&self) -> &ItemStatus {
        &self.status
    }

    /// Backup copy made before the rename, if any
    pub fn backup(&self) -> Option<&Path> {
        self.backup.as_deref()
    }

    pub(crate) fn set_status(&mut self, status: ItemStatus) {
        self.status = status;
    }

    pub(crate) fn set_backup(&mut self, backup: PathBuf) {
        self.backup = Some(backup);
    }

    fn skip(&mut self, reason: SkipReason) {
        self.status = ItemStatus::Skipped(reason);
    }
}

/// Item counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStats {
    pub total: usize,
    pub planned: usize,
    pub would_apply: usize,
    pub skipped: usize,
    pub applied: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenamePlan {
    id: String,
    mode: RenameMode,
    items: Vec<RenamePlanItem>,
}

impl RenamePlan {
    /// Stable identifier derived from the mode and the source paths
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> &RenameMode {
        &self.mode
    }

    /// Items in input order
    pub fn items(&self) -> &[RenamePlanItem] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut [RenamePlanItem] {
        &mut self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn stats(&self) -> PlanStats {
        let mut stats = PlanStats {
            total: self.items.len(),
            ..PlanStats::default()
        };
        for item in &self.items {
            match item.status {
                ItemStatus::Planned => stats.planned += 1,
                ItemStatus::WouldApply => stats.would_apply += 1,
                ItemStatus::Skipped(_) => stats.skipped += 1,
                ItemStatus::Applied => stats.applied += 1,
                ItemStatus::Failed(_) => stats.failed += 1,
            }
        }
        stats
    }
}

fn generate_plan_id(mode: &RenameMode, files: &[FileEntry]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(mode.to_string().as_bytes());
    for entry in files {
        hasher.update(entry.path().to_string_lossy().as_bytes());
        hasher.update([0u8]);
    }
    let hash = format!("{:x}", hasher.finalize());
    hash[..12].to_string()
}

fn target_key(path: &Path, case_insensitive: bool) -> PathBuf {
    if case_insensitive {
        PathBuf::from(path.to_string_lossy().to_lowercase())
    } else {
        path.to_path_buf()
    }
}

/// Whether `target` is occupied on disk by something other than `source`.
///
/// A case-only rename on a case-insensitive filesystem finds the source
/// itself under the new spelling; listing the parent tells the two apart.
pub(crate) fn target_occupied(source: &Path, target: &Path) -> bool {
    if fs::symlink_metadata(target).is_err() {
        return false;
    }

    let case_only =
        source.to_string_lossy().to_lowercase() == target.to_string_lossy().to_lowercase();
    if !case_only {
        return true;
    }

    let (Some(parent), Some(name)) = (target.parent(), target.file_name()) else {
        return true;
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    match fs::read_dir(parent) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .any(|e| e.file_name() == name),
        Err(_) => true,
    }
}

/// Skip or re-target every planned item that shares a target with another
fn resolve_collisions(items: &mut [RenamePlanItem], options: &PlanOptions) {
    let mut groups: HashMap<PathBuf, Vec<usize>> = HashMap::new();
    let mut order = Vec::new();
    for (i, item) in items.iter().enumerate() {
        if !item.status.is_planned() {
            continue;
        }
        let key = target_key(&item.target, options.case_insensitive);
        let group = groups.entry(key.clone()).or_default();
        if group.is_empty() {
            order.push(key);
        }
        group.push(i);
    }

    let mut taken: HashSet<PathBuf> = groups.keys().cloned().collect();
    for key in order {
        let members = &groups[&key];
        if members.len() < 2 {
            continue;
        }
        let losers = match options.collision {
            CollisionPolicy::SkipAll => &members[..],
            CollisionPolicy::KeepFirst | CollisionPolicy::Suffix => &members[1..],
        };
        for &i in losers {
            if options.collision == CollisionPolicy::Suffix {
                if let Some(target) = suffixed_target(&items[i], &mut taken, options) {
                    items[i].target = target;
                    continue;
                }
            }
            items[i].skip(SkipReason::Collision);
        }
    }
}

/// Upper bound on suffix attempts for a single item
const MAX_SUFFIX: usize = 10_000;

fn suffixed_target(
    item: &RenamePlanItem,
    taken: &mut HashSet<PathBuf>,
    options: &PlanOptions,
) -> Option<PathBuf> {
    let name = item.target.file_name()?.to_str()?;
    let dir = item.target.parent()?;
    for n in 1..=MAX_SUFFIX {
        let candidate_name = with_suffix(name, n);
        if validate_file_name(&candidate_name).is_err() {
            return None;
        }
        let candidate = dir.join(&candidate_name);
        let key = target_key(&candidate, options.case_insensitive);
        if taken.contains(&key) || target_occupied(&item.source, &candidate) {
            continue;
        }
        taken.insert(key);
        return Some(candidate);
    }
    None
}

/// Compute a rename plan.
///
/// Fails only on configuration errors (see [`RenameError::InvalidPattern`]);
/// every per-file problem ends up as a `Skipped` item. The filesystem is
/// only read, never written.
pub fn plan(
    files: &[FileEntry],
    mode: &RenameMode,
    options: &PlanOptions,
    sink: &mut dyn Sink,
) -> Result<RenamePlan, RenameError> {
    let compiled = mode.compile(files.len())?;
    sink.debug(&format!("Planning {} files with {}", files.len(), mode));

    let mut items = Vec::with_capacity(files.len());
    for (position, entry) in files.iter().enumerate() {
        let name = compiled.target_name(entry, position, options);
        let target = entry.dir().join(&name);
        sink.debug(&format!("{} -> {}", entry.file_name(), name));

        let status = if !entry.path().is_file() {
            ItemStatus::Skipped(SkipReason::SourceMissing)
        } else if let Err(detail) = validate_file_name(&name) {
            ItemStatus::Skipped(SkipReason::InvalidName(detail))
        } else if target == entry.path() {
            ItemStatus::Skipped(SkipReason::Unchanged)
        } else {
            ItemStatus::Planned
        };
        items.push(RenamePlanItem::new(position, entry, target, status));
    }

    resolve_collisions(&mut items, options);

    // Sources of other items are occupied at execution time too, so they are
    // never valid targets, even when overwriting is allowed.
    let sources: HashSet<PathBuf> = items
        .iter()
        .map(|item| target_key(&item.source, options.case_insensitive))
        .collect();
    for item in &mut items {
        if !item.status.is_planned() {
            continue;
        }
        let key = target_key(&item.target, options.case_insensitive);
        let own_source = key == target_key(&item.source, options.case_insensitive);
        let is_other_source = sources.contains(&key) && !own_source;
        if is_other_source
            || (!options.allow_overwrite && target_occupied(&item.source, &item.target))
        {
            item.skip(SkipReason::TargetExists);
        }
    }

    for item in &items {
        if let ItemStatus::Skipped(reason) = &item.status {
            sink.warn(&format!(
                "Skipping {} -> {}: {}",
                item.source.display(),
                item.target.display(),
                reason
            ));
        }
    }

    let plan = RenamePlan {
        id: generate_plan_id(mode, files),
        mode: mode.clone(),
        items,
    };
    let stats = plan.stats();
    sink.info(&format!(
        "Planned {} of {} renames ({} skipped)",
        stats.planned, stats.total, stats.skipped
    ));
    Ok(plan)
}

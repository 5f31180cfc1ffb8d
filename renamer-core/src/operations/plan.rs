use crate::entry::{collect_files, FileEntry, Selection};
use crate::execute::detect_case_insensitive_fs;
use crate::log::Sink;
use crate::mode::RenameMode;
use crate::plan::{plan, PlanOptions, RenamePlan};
use crate::preview::{render_plan, Preview};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::Path;

/// Everything needed to compute and preview a plan
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub selection: Selection,
    pub mode: RenameMode,
    pub options: PlanOptions,
    pub preview: Preview,
    pub use_color: Option<bool>,
}

/// Probe every directory holding a selected file; one case-insensitive
/// directory is enough to fold target names for the whole batch.
fn selection_is_case_insensitive(files: &[FileEntry]) -> bool {
    let dirs: BTreeSet<&Path> = files
        .iter()
        .map(|entry| match entry.dir() {
            dir if dir.as_os_str().is_empty() => Path::new("."),
            dir => dir,
        })
        .collect();
    dirs.into_iter().any(detect_case_insensitive_fs)
}

/// Plan operation - collects the files, plans, and renders the preview
pub fn plan_operation(
    request: &PlanRequest,
    sink: &mut dyn Sink,
) -> Result<(RenamePlan, Option<String>)> {
    let files = collect_files(&request.selection).context("Failed to collect files")?;
    sink.info(&format!(
        "Found {} files matching '{}'",
        files.len(),
        request.selection.pattern
    ));

    let mut options = request.options.clone();
    if !options.case_insensitive {
        options.case_insensitive = selection_is_case_insensitive(&files);
    }
    if options.case_insensitive {
        sink.debug("Comparing target names case-insensitively");
    }

    let plan = plan(&files, &request.mode, &options, sink)
        .context("Failed to compute rename plan")?;

    let preview = match request.preview {
        Preview::None => None,
        format => Some(render_plan(&plan, format, request.use_color)),
    };

    Ok((plan, preview))
}

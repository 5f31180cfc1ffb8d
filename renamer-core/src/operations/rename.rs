use crate::execute::{execute, ExecuteOptions};
use crate::log::Sink;
use crate::output::ExecuteResult;
use crate::plan::RenamePlan;
use crate::report::{save_report, ReportFormat};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Options for applying an already computed plan
#[derive(Debug, Clone)]
pub struct RenameRequest {
    pub execute: ExecuteOptions,
    /// Save an operations log in this format after execution
    pub save_log: Option<ReportFormat>,
    pub log_dir: PathBuf,
}

/// Rename operation - executes the plan and writes the operations log
pub fn rename_operation(
    plan: RenamePlan,
    request: &RenameRequest,
    sink: &mut dyn Sink,
) -> Result<ExecuteResult> {
    let plan = execute(plan, &request.execute, sink);

    let report = match request.save_log {
        Some(format) => {
            let path = save_report(&plan, &request.log_dir, format, chrono::Local::now())
                .context("Failed to save operations log")?;
            sink.info(&format!("Operations log saved to {}", path.display()));
            Some(path)
        },
        None => None,
    };

    Ok(ExecuteResult::from_plan(
        plan,
        request.execute.dry_run,
        report,
    ))
}

use crate::plan::{ItemStatus, PlanStats, RenamePlan};
use serde::Serialize;
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a plan operation
#[derive(Debug, Serialize)]
pub struct PlanResult {
    pub plan_id: String,
    pub mode: String,
    pub stats: PlanStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<RenamePlan>,
}

impl PlanResult {
    pub fn from_plan(plan: RenamePlan) -> Self {
        Self {
            plan_id: plan.id().to_string(),
            mode: plan.mode().to_string(),
            stats: plan.stats(),
            plan: Some(plan),
        }
    }
}

/// Result of executing a plan
#[derive(Debug, Serialize)]
pub struct ExecuteResult {
    pub plan_id: String,
    pub dry_run: bool,
    pub stats: PlanStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<RenamePlan>,
}

impl ExecuteResult {
    pub fn from_plan(plan: RenamePlan, dry_run: bool, report: Option<PathBuf>) -> Self {
        Self {
            plan_id: plan.id().to_string(),
            dry_run,
            stats: plan.stats(),
            report,
            plan: Some(plan),
        }
    }

    /// True when every planned item made it
    pub fn succeeded(&self) -> bool {
        self.stats.failed == 0
    }
}

/// Result of a version command
#[derive(Debug, Serialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for PlanResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "plan",
            "plan_id": self.plan_id,
            "mode": self.mode,
            "summary": self.stats,
            "plan": self.plan,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        writeln!(output, "Rename plan: {}", self.mode).unwrap();
        writeln!(
            output,
            "Files: {}, planned: {}, skipped: {}",
            self.stats.total, self.stats.planned, self.stats.skipped
        )
        .unwrap();
        writeln!(output, "Plan ID: {}", self.plan_id).unwrap();
        output
    }
}

impl OutputFormatter for ExecuteResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.succeeded(),
            "operation": "rename",
            "plan_id": self.plan_id,
            "dry_run": self.dry_run,
            "summary": self.stats,
            "report": self.report,
            "plan": self.plan,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        if self.dry_run {
            writeln!(
                output,
                "[DRY RUN] {} files would be renamed",
                self.stats.would_apply
            )
            .unwrap();
        } else {
            writeln!(output, "✓ Renamed {} files", self.stats.applied).unwrap();
        }

        if self.stats.skipped > 0 {
            writeln!(output, "Skipped {} files", self.stats.skipped).unwrap();
        }

        if self.stats.failed > 0 {
            writeln!(output, "✗ {} renames failed:", self.stats.failed).unwrap();
            if let Some(plan) = &self.plan {
                for item in plan.items() {
                    if let ItemStatus::Failed(reason) = item.status() {
                        writeln!(output, "  {}: {}", item.source().display(), reason).unwrap();
                    }
                }
            }
        }

        if let Some(report) = &self.report {
            writeln!(output, "Operations log saved to {}", report.display()).unwrap();
        }

        output
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "name": self.name,
            "version": self.version,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}\n", self.name, self.version)
    }
}

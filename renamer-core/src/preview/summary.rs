use super::display_path;
use crate::plan::RenamePlan;
use std::fmt::Write;
use std::path::Path;

/// Render plan as a plain text summary
pub fn render_summary(plan: &RenamePlan, base: &Path) -> String {
    let mut output = String::new();
    let stats = plan.stats();

    writeln!(output, "[PLAN SUMMARY]").unwrap();
    writeln!(output, "Mode: {}", plan.mode()).unwrap();
    writeln!(output, "Files: {}", stats.total).unwrap();
    writeln!(output, "Planned: {}", stats.planned).unwrap();
    writeln!(output, "Skipped: {}", stats.skipped).unwrap();

    if !plan.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "[RENAMES]").unwrap();
        for item in plan.items() {
            writeln!(
                output,
                "{} -> {} [{}]",
                display_path(item.source(), base),
                display_path(item.target(), base),
                item.status()
            )
            .unwrap();
        }
    }

    output
}

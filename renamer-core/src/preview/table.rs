use super::display_path;
use crate::name::format_size;
use crate::plan::{ItemStatus, RenamePlan};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::{self, IsTerminal};
use std::path::Path;

fn status_color(status: &ItemStatus) -> Color {
    match status {
        ItemStatus::Planned | ItemStatus::Applied => Color::Green,
        ItemStatus::WouldApply => Color::Blue,
        ItemStatus::Skipped(_) => Color::Yellow,
        ItemStatus::Failed(_) => Color::Red,
    }
}

/// Render plan as a table: one row per item in plan order
pub fn render_table(plan: &RenamePlan, base: &Path, use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Source").fg(Color::Cyan),
            Cell::new("Target").fg(Color::Cyan),
            Cell::new("Size").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["#", "Source", "Target", "Size", "Status"]);
    }

    for item in plan.items() {
        let index = (item.index() + 1).to_string();
        let source = display_path(item.source(), base);
        let target = display_path(item.target(), base);
        let size = format_size(item.size());
        let status = item.status().to_string();

        if use_color {
            table.add_row(vec![
                Cell::new(index),
                Cell::new(source),
                Cell::new(format!("→ {}", target)).fg(Color::Magenta),
                Cell::new(size).fg(Color::Yellow),
                Cell::new(status).fg(status_color(item.status())),
            ]);
        } else {
            table.add_row(vec![index, source, format!("→ {}", target), size, status]);
        }
    }

    let stats = plan.stats();
    table.add_row(vec![
        String::new(),
        "TOTALS".to_string(),
        format!("{} files", stats.total),
        String::new(),
        format!("{} planned, {} skipped", stats.planned, stats.skipped),
    ]);

    table.to_string()
}

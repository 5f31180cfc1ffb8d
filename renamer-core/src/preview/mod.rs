mod summary;
mod table;

pub use summary::render_summary;
pub use table::render_table;

use crate::plan::RenamePlan;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Table,
    Summary,
    Json,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color, // Honor explicit color request
        None => is_terminal(),                  // Auto-detect only when not specified
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// `path` relative to `base` when it lives below it
pub(crate) fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_default()
}

/// Render the plan in the specified format, paths relative to the current directory
pub fn render_plan(plan: &RenamePlan, format: Preview, use_color: Option<bool>) -> String {
    let use_color = should_use_color(use_color);
    let base = current_dir();

    match format {
        Preview::Table => render_table(plan, &base, use_color),
        Preview::Summary => render_summary(plan, &base),
        Preview::Json => serde_json::to_string_pretty(plan).unwrap_or_default() + "\n",
        Preview::None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_from_str() {
        assert_eq!("TABLE".parse::<Preview>().unwrap(), Preview::Table);
        assert_eq!("summary".parse::<Preview>().unwrap(), Preview::Summary);
        assert_eq!("json".parse::<Preview>().unwrap(), Preview::Json);
        assert_eq!("none".parse::<Preview>().unwrap(), Preview::None);
        assert!("diff".parse::<Preview>().is_err());
    }

    #[test]
    fn test_should_use_color() {
        assert!(should_use_color_with_detector(Some(true), || false));
        assert!(!should_use_color_with_detector(Some(false), || true));
        assert!(should_use_color_with_detector(None, || true));
        assert!(!should_use_color_with_detector(None, || false));
    }

    #[test]
    fn test_display_path() {
        assert_eq!(
            display_path(Path::new("/work/photos/a.jpg"), Path::new("/work")),
            Path::new("photos").join("a.jpg").display().to_string()
        );
        assert_eq!(
            display_path(Path::new("/elsewhere/a.jpg"), Path::new("/work")),
            "/elsewhere/a.jpg"
        );
    }
}

use crate::error::RenameError;
use crate::name::split_name;
use globset::{GlobBuilder, GlobMatcher};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory the tool keeps its own state in (config, backups, logs)
pub const STATE_DIR: &str = ".renamer";

/// A source file as it was read from disk at plan time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    path: PathBuf,
    file_name: String,
    size: u64,
}

impl FileEntry {
    /// Read a regular file's metadata. Fails when the path is missing, is not
    /// a regular file, or its name is not valid UTF-8.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RenameError> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|e| RenameError::io(path, e))?;
        if !metadata.is_file() {
            return Err(RenameError::InvalidSelection(format!(
                "{} is not a regular file",
                path.display()
            )));
        }
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                RenameError::InvalidSelection(format!(
                    "{} does not have a UTF-8 file name",
                    path.display()
                ))
            })?
            .to_string();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            size: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Name without the extension
    pub fn stem(&self) -> &str {
        split_name(&self.file_name).0
    }

    /// Extension including the leading dot, or an empty string
    pub fn extension(&self) -> &str {
        split_name(&self.file_name).1
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Directory the file lives in
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Which files a run operates on
#[derive(Debug, Clone)]
pub struct Selection {
    /// Files are taken as-is, directories are listed
    pub paths: Vec<PathBuf>,
    /// Glob matched against file names inside listed directories
    pub pattern: String,
    /// Descend into subdirectories
    pub recursive: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            paths: vec![PathBuf::from(".")],
            pattern: "*".to_string(),
            recursive: false,
        }
    }
}

fn build_matcher(pattern: &str) -> Result<GlobMatcher, RenameError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| RenameError::InvalidSelection(format!("bad file pattern '{}': {}", pattern, e)))
}

/// Resolve a selection into an ordered list of entries.
///
/// Explicit file arguments keep their command-line order; the contents of
/// each directory follow in file-name order. Duplicates are dropped and the
/// state directory is never descended into.
pub fn collect_files(selection: &Selection) -> Result<Vec<FileEntry>, RenameError> {
    let matcher = build_matcher(&selection.pattern)?;
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for root in &selection.paths {
        if root.is_file() {
            if seen.insert(root.clone()) {
                entries.push(FileEntry::from_path(root)?);
            }
            continue;
        }
        if !root.is_dir() {
            return Err(RenameError::InvalidSelection(format!(
                "path not found: {}",
                root.display()
            )));
        }

        let max_depth = if selection.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == STATE_DIR));

        for dir_entry in walker {
            let dir_entry = dir_entry.map_err(|e| {
                let path = e.path().map_or_else(|| root.clone(), Path::to_path_buf);
                RenameError::InvalidSelection(format!("cannot read {}: {}", path.display(), e))
            })?;
            if !dir_entry.file_type().is_file() || !matcher.is_match(dir_entry.file_name()) {
                continue;
            }
            let path = dir_entry.into_path();
            if seen.insert(path.clone()) {
                entries.push(FileEntry::from_path(&path)?);
            }
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) -> PathBuf {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, rel).unwrap();
        path
    }

    #[test]
    fn test_entry_parts() {
        let temp_dir = TempDir::new().unwrap();
        let path = touch(temp_dir.path(), "Report.TXT");

        let entry = FileEntry::from_path(&path).unwrap();
        assert_eq!(entry.file_name(), "Report.TXT");
        assert_eq!(entry.stem(), "Report");
        assert_eq!(entry.extension(), ".TXT");
        assert_eq!(entry.size(), "Report.TXT".len() as u64);
        assert_eq!(entry.dir(), temp_dir.path());
    }

    #[test]
    fn test_entry_rejects_missing_and_dirs() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            FileEntry::from_path(temp_dir.path().join("nope.txt")),
            Err(RenameError::Io { .. })
        ));
        assert!(matches!(
            FileEntry::from_path(temp_dir.path()),
            Err(RenameError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_collect_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "c.jpg");
        touch(temp_dir.path(), "a.jpg");
        touch(temp_dir.path(), "b.txt");
        touch(temp_dir.path(), "sub/d.jpg");

        let selection = Selection {
            paths: vec![temp_dir.path().to_path_buf()],
            pattern: "*.jpg".to_string(),
            recursive: false,
        };
        let names: Vec<String> = collect_files(&selection)
            .unwrap()
            .iter()
            .map(|e| e.file_name().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "c.jpg"]);
    }

    #[test]
    fn test_collect_recursive_skips_state_dir() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "a.jpg");
        touch(temp_dir.path(), "sub/d.jpg");
        touch(temp_dir.path(), ".renamer/backups/x/0000_a.jpg");

        let selection = Selection {
            paths: vec![temp_dir.path().to_path_buf()],
            pattern: "*.jpg".to_string(),
            recursive: true,
        };
        let entries = collect_files(&selection).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries
            .iter()
            .all(|e| !e.path().to_string_lossy().contains(STATE_DIR)));
    }

    #[test]
    fn test_collect_explicit_files_keep_order() {
        let temp_dir = TempDir::new().unwrap();
        let b = touch(temp_dir.path(), "b.txt");
        let a = touch(temp_dir.path(), "a.txt");

        let selection = Selection {
            paths: vec![b.clone(), a.clone(), b.clone()],
            ..Selection::default()
        };
        let entries = collect_files(&selection).unwrap();
        let paths: Vec<&Path> = entries.iter().map(FileEntry::path).collect();
        assert_eq!(paths, vec![b.as_path(), a.as_path()]);
    }

    #[test]
    fn test_collect_errors() {
        let temp_dir = TempDir::new().unwrap();
        let missing = Selection {
            paths: vec![temp_dir.path().join("missing")],
            ..Selection::default()
        };
        assert!(matches!(
            collect_files(&missing),
            Err(RenameError::InvalidSelection(_))
        ));

        let bad_glob = Selection {
            paths: vec![temp_dir.path().to_path_buf()],
            pattern: "[".to_string(),
            recursive: false,
        };
        assert!(matches!(
            collect_files(&bad_glob),
            Err(RenameError::InvalidSelection(_))
        ));
    }
}

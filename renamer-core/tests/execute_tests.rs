use renamer_core::{
    execute, plan, ExecuteOptions, FailReason, FileEntry, ItemStatus, Level, MemorySink, NullSink,
    PlanOptions, RenameMode, RenamePlan,
};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn sequential() -> RenameMode {
    RenameMode::Sequential {
        prefix: "img_".to_string(),
        start_index: 1,
        digit_width: 3,
    }
}

fn plan_files(dir: &Path, names: &[&str], mode: &RenameMode) -> RenamePlan {
    let files: Vec<FileEntry> = names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, format!("content of {}", name)).unwrap();
            FileEntry::from_path(&path).unwrap()
        })
        .collect();
    plan(&files, mode, &PlanOptions::default(), &mut NullSink).unwrap()
}

fn dir_listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_execute_renames_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let plan = plan_files(temp_dir.path(), &["a.txt", "b.txt", "c.txt"], &sequential());

    let result = execute(plan, &ExecuteOptions::default(), &mut NullSink);

    assert!(result
        .items()
        .iter()
        .all(|i| i.status() == &ItemStatus::Applied));
    assert_eq!(
        dir_listing(temp_dir.path()),
        vec!["img_001.txt", "img_002.txt", "img_003.txt"]
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("img_002.txt")).unwrap(),
        "content of b.txt"
    );
}

#[test]
fn test_dry_run_leaves_filesystem_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let plan = plan_files(temp_dir.path(), &["a.txt", "b.txt"], &sequential());
    let before = dir_listing(temp_dir.path());
    let options = ExecuteOptions {
        backup: true,
        backup_dir: temp_dir.path().join("backups"),
        dry_run: true,
    };
    let mut sink = MemorySink::new();

    let result = execute(plan, &options, &mut sink);

    assert_eq!(dir_listing(temp_dir.path()), before);
    assert!(result
        .items()
        .iter()
        .all(|i| i.status() == &ItemStatus::WouldApply));
    assert_eq!(result.stats().would_apply, 2);
    assert_eq!(
        sink.at_level(Level::Info)
            .filter(|e| e.message.starts_with("[DRY RUN] Rename:"))
            .count(),
        2
    );
}

#[test]
fn test_backup_preserves_original_content() {
    let temp_dir = TempDir::new().unwrap();
    let work = temp_dir.path().join("work");
    fs::create_dir_all(&work).unwrap();
    let plan = plan_files(&work, &["a.txt", "b.txt"], &sequential());
    let options = ExecuteOptions {
        backup: true,
        backup_dir: temp_dir.path().join("backups"),
        dry_run: false,
    };

    let result = execute(plan, &options, &mut NullSink);

    for (item, name) in result.items().iter().zip(["a.txt", "b.txt"]) {
        assert_eq!(item.status(), &ItemStatus::Applied);
        let backup = item.backup().expect("backup path recorded");
        assert!(backup.starts_with(temp_dir.path().join("backups")));
        assert!(backup
            .file_name()
            .unwrap()
            .to_string_lossy()
            .ends_with(name));
        assert_eq!(
            fs::read_to_string(backup).unwrap(),
            format!("content of {}", name)
        );
    }
    assert!(!work.join("a.txt").exists());
}

#[test]
fn test_backup_keeps_overwritten_target() {
    let temp_dir = TempDir::new().unwrap();
    let work = temp_dir.path().join("work");
    fs::create_dir_all(&work).unwrap();
    fs::write(work.join("img_001.txt"), "old target").unwrap();
    fs::write(work.join("a.txt"), "new content").unwrap();
    let files = vec![FileEntry::from_path(work.join("a.txt")).unwrap()];
    let plan_options = PlanOptions {
        allow_overwrite: true,
        ..PlanOptions::default()
    };
    let plan = plan(&files, &sequential(), &plan_options, &mut NullSink).unwrap();
    let options = ExecuteOptions {
        backup: true,
        backup_dir: temp_dir.path().join("backups"),
        dry_run: false,
    };

    let mut sink = MemorySink::new();
    let result = execute(plan, &options, &mut sink);

    assert_eq!(result.items()[0].status(), &ItemStatus::Applied);
    assert_eq!(
        fs::read_to_string(work.join("img_001.txt")).unwrap(),
        "new content"
    );

    let batches: Vec<_> = fs::read_dir(temp_dir.path().join("backups"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(batches.len(), 1);
    assert_eq!(
        dir_listing(&batches[0]),
        vec!["0000_a.txt", "0000_replaced_img_001.txt"]
    );
    assert_eq!(
        fs::read_to_string(batches[0].join("0000_replaced_img_001.txt")).unwrap(),
        "old target"
    );
    assert!(sink
        .at_level(Level::Info)
        .any(|e| e.message.starts_with("Backed up replaced")));
}

#[test]
fn test_backup_failure_skips_the_rename() {
    let temp_dir = TempDir::new().unwrap();
    let work = temp_dir.path().join("work");
    fs::create_dir_all(&work).unwrap();
    let plan = plan_files(&work, &["a.txt"], &sequential());
    // A regular file where the backup directory should go
    let blocker = temp_dir.path().join("backups");
    fs::write(&blocker, "not a directory").unwrap();
    let options = ExecuteOptions {
        backup: true,
        backup_dir: blocker,
        dry_run: false,
    };

    let result = execute(plan, &options, &mut NullSink);

    assert!(matches!(
        result.items()[0].status(),
        ItemStatus::Failed(FailReason::BackupFailed(_))
    ));
    assert!(work.join("a.txt").exists());
    assert!(!work.join("img_001.txt").exists());
}

#[test]
fn test_failure_mid_batch_does_not_stop_or_revert() {
    let temp_dir = TempDir::new().unwrap();
    let plan = plan_files(temp_dir.path(), &["a.txt", "b.txt", "c.txt"], &sequential());
    fs::remove_file(temp_dir.path().join("b.txt")).unwrap();
    let mut sink = MemorySink::new();

    let result = execute(plan, &ExecuteOptions::default(), &mut sink);

    let items = result.items();
    assert_eq!(items[0].status(), &ItemStatus::Applied);
    assert!(matches!(
        items[1].status(),
        ItemStatus::Failed(FailReason::Io(_))
    ));
    assert_eq!(items[2].status(), &ItemStatus::Applied);
    assert_eq!(
        dir_listing(temp_dir.path()),
        vec!["img_001.txt", "img_003.txt"]
    );

    let stats = result.stats();
    assert_eq!(stats.applied, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(sink.at_level(Level::Error).count(), 1);
    assert!(sink
        .at_level(Level::Warn)
        .any(|e| e.message == "Renamed 2 files, 1 failed"));
}

#[test]
fn test_skipped_items_are_not_touched() {
    let temp_dir = TempDir::new().unwrap();
    let mode = RenameMode::PatternReplace {
        pattern: "-1".to_string(),
        replacement: String::new(),
    };
    let plan = plan_files(temp_dir.path(), &["x-1.txt", "x-1-1.txt"], &mode);

    let result = execute(plan, &ExecuteOptions::default(), &mut NullSink);

    assert_eq!(result.items()[0].status(), &ItemStatus::Applied);
    assert!(matches!(result.items()[1].status(), ItemStatus::Skipped(_)));
    assert_eq!(dir_listing(temp_dir.path()), vec!["x-1-1.txt", "x.txt"]);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("x.txt")).unwrap(),
        "content of x-1.txt"
    );
}

#[test]
fn test_applied_targets_are_unique() {
    let temp_dir = TempDir::new().unwrap();
    let mode = RenameMode::CaseChange {
        kind: renamer_core::CaseKind::Lower,
    };
    let plan = plan_files(
        temp_dir.path(),
        &["Photo.jpg", "PHOTO2.jpg", "notes.md", "Notes.MD"],
        &mode,
    );

    let result = execute(plan, &ExecuteOptions::default(), &mut NullSink);

    let mut seen = HashSet::new();
    for item in result.items() {
        if item.status() == &ItemStatus::Applied {
            assert!(seen.insert(item.target().to_path_buf()));
            assert!(item.target().exists());
        }
    }
    assert!(!seen.is_empty());
}

#[test]
fn test_execute_empty_plan() {
    let plan = plan(&[], &sequential(), &PlanOptions::default(), &mut NullSink).unwrap();
    let result = execute(plan, &ExecuteOptions::default(), &mut NullSink);
    assert!(result.is_empty());
}

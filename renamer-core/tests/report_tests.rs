use chrono::{Local, TimeZone};
use renamer_core::{
    execute, plan, save_report, ExecuteOptions, FileEntry, NullSink, PlanOptions, RenameMode,
    RenamePlan, ReportFormat, ReportRecord,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn executed_plan(dir: &Path) -> RenamePlan {
    let files: Vec<FileEntry> = ["x-1.txt", "x-1-1.txt"]
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, name).unwrap();
            FileEntry::from_path(&path).unwrap()
        })
        .collect();
    let mode = RenameMode::PatternReplace {
        pattern: "-1".to_string(),
        replacement: String::new(),
    };
    let plan = plan(&files, &mode, &PlanOptions::default(), &mut NullSink).unwrap();
    execute(plan, &ExecuteOptions::default(), &mut NullSink)
}

#[test]
fn test_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let plan = executed_plan(temp_dir.path());
    let log_dir = temp_dir.path().join("logs");
    let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();

    let path = save_report(&plan, &log_dir, ReportFormat::Json, now).unwrap();

    assert_eq!(
        path.file_name().unwrap().to_string_lossy(),
        "operations_log_20240309_140507.json"
    );
    let records: Vec<ReportRecord> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(records.len(), 2);

    assert!(records[0].original.ends_with("x-1.txt"));
    assert!(records[0].new.ends_with("x.txt"));
    assert!(records[0].success);
    assert_eq!(records[0].status, "applied");
    assert_eq!(records[0].error, None);
    assert_eq!(records[0].timestamp, now.to_rfc3339());

    assert!(!records[1].success);
    assert_eq!(records[1].status, "skipped");
    assert_eq!(records[1].error.as_deref(), Some("collision"));
}

#[test]
fn test_csv_report() {
    let temp_dir = TempDir::new().unwrap();
    let plan = executed_plan(temp_dir.path());
    let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();

    let path = save_report(&plan, temp_dir.path(), ReportFormat::Csv, now).unwrap();

    assert_eq!(path.extension().unwrap(), "csv");
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content.lines().next().unwrap(),
        "original,new,timestamp,success,status,error"
    );

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let records: Vec<ReportRecord> = reader.deserialize().map(Result::unwrap).collect();
    assert_eq!(records.len(), 2);
    assert!(records[0].success);
    assert_eq!(records[0].error, None);
    assert_eq!(records[1].error.as_deref(), Some("collision"));
}

#[test]
fn test_report_format_from_str() {
    assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
    assert_eq!("csv".parse::<ReportFormat>().unwrap(), ReportFormat::Csv);
    assert!("xml".parse::<ReportFormat>().is_err());
}

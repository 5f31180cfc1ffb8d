use proptest::prelude::*;
use renamer_core::{
    plan, CollisionPolicy, FileEntry, NullSink, PlanOptions, RenameMode, RenamePlan,
};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use tempfile::TempDir;

fn plan_names(
    names: &BTreeSet<String>,
    mode: &RenameMode,
    options: &PlanOptions,
) -> (TempDir, RenamePlan) {
    let temp_dir = TempDir::new().unwrap();
    let files: Vec<FileEntry> = names
        .iter()
        .map(|name| {
            let path = temp_dir.path().join(name);
            fs::write(&path, name).unwrap();
            FileEntry::from_path(&path).unwrap()
        })
        .collect();
    let plan = plan(&files, mode, options, &mut NullSink).unwrap();
    (temp_dir, plan)
}

fn file_names() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[a-c]{1,3}(-[a-c]{1,2}){0,2}\\.(txt|md)", 1..12)
}

fn collision_policy() -> impl Strategy<Value = CollisionPolicy> {
    prop_oneof![
        Just(CollisionPolicy::KeepFirst),
        Just(CollisionPolicy::SkipAll),
        Just(CollisionPolicy::Suffix),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn planned_targets_are_unique(
        names in file_names(),
        pattern in "-[a-c]{1,2}|[a-c]",
        collision in collision_policy(),
    ) {
        let mode = RenameMode::PatternReplace { pattern, replacement: String::new() };
        let options = PlanOptions { collision, ..PlanOptions::default() };
        let (_temp_dir, plan) = plan_names(&names, &mode, &options);

        let planned: Vec<_> = plan.items().iter().filter(|i| i.status().is_planned()).collect();
        let targets: HashSet<_> = planned.iter().map(|i| i.target().to_path_buf()).collect();
        prop_assert_eq!(targets.len(), planned.len());

        // A planned target never lands on a file that is already there
        for item in planned {
            prop_assert!(!item.target().exists());
        }
    }

    #[test]
    fn planning_is_deterministic(names in file_names(), prefix in "[a-z]{0,4}_") {
        let mode = RenameMode::Sequential { prefix, start_index: 1, digit_width: 3 };
        let options = PlanOptions::default();

        let temp_dir = TempDir::new().unwrap();
        let files: Vec<FileEntry> = names
            .iter()
            .map(|name| {
                let path = temp_dir.path().join(name);
                fs::write(&path, name).unwrap();
                FileEntry::from_path(&path).unwrap()
            })
            .collect();
        let first = plan(&files, &mode, &options, &mut NullSink).unwrap();
        let second = plan(&files, &mode, &options, &mut NullSink).unwrap();

        prop_assert_eq!(first.id(), second.id());
        prop_assert_eq!(first.items().len(), files.len());
        for (a, b) in first.items().iter().zip(second.items()) {
            prop_assert_eq!(a.target(), b.target());
            prop_assert_eq!(a.status(), b.status());
        }
        // Sources keep their input order
        for (item, entry) in first.items().iter().zip(&files) {
            prop_assert_eq!(item.source(), entry.path());
        }
    }
}

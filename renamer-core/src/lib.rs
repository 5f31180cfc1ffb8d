#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod entry;
pub mod error;
pub mod execute;
pub mod log;
pub mod mode;
pub mod name;
pub mod operations;
pub mod output;
pub mod plan;
pub mod preview;
pub mod report;

pub use config::Config;
pub use entry::{collect_files, FileEntry, Selection};
pub use error::{FailReason, RenameError, SkipReason};
pub use execute::{detect_case_insensitive_fs, execute, ExecuteOptions};
pub use log::{FileSink, Level, LogEvent, MemorySink, NullSink, Sink, TracingSink};
pub use mode::{CaseKind, RenameMode};
pub use operations::{plan_operation, rename_operation, PlanRequest, RenameRequest};
pub use output::{ExecuteResult, OutputFormat, OutputFormatter, PlanResult, VersionResult};
pub use plan::{
    plan, CollisionPolicy, ExtensionPolicy, ItemStatus, PlanOptions, PlanStats, RenamePlan,
    RenamePlanItem,
};
pub use preview::{render_plan, Preview};
pub use report::{report_records, save_report, ReportFormat, ReportRecord};

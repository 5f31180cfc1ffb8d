use clap::ValueEnum;
use renamer_core::{CaseKind, CollisionPolicy, ExtensionPolicy, Level, Preview, ReportFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CaseArg {
    Lower,
    Upper,
    Title,
    Camel,
}

impl From<CaseArg> for CaseKind {
    fn from(arg: CaseArg) -> Self {
        match arg {
            CaseArg::Lower => Self::Lower,
            CaseArg::Upper => Self::Upper,
            CaseArg::Title => Self::Title,
            CaseArg::Camel => Self::Camel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollisionArg {
    /// Keep the first item of each colliding group, skip the rest
    KeepFirst,
    /// Skip every item of a colliding group
    SkipAll,
    /// Append _1, _2, ... to later items until the name is free
    Suffix,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::KeepFirst => Self::KeepFirst,
            CollisionArg::SkipAll => Self::SkipAll,
            CollisionArg::Suffix => Self::Suffix,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CaseExtensionArg {
    Keep,
    Apply,
}

impl From<CaseExtensionArg> for ExtensionPolicy {
    fn from(arg: CaseExtensionArg) -> Self {
        match arg {
            CaseExtensionArg::Keep => Self::Keep,
            CaseExtensionArg::Apply => Self::Apply,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PreviewArg {
    Table,
    Summary,
    Json,
    None,
}

impl From<PreviewArg> for Preview {
    fn from(arg: PreviewArg) -> Self {
        match arg {
            PreviewArg::Table => Self::Table,
            PreviewArg::Summary => Self::Summary,
            PreviewArg::Json => Self::Json,
            PreviewArg::None => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

impl From<OutputFormat> for renamer_core::OutputFormat {
    fn from(arg: OutputFormat) -> Self {
        match arg {
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SaveLogArg {
    Json,
    Csv,
}

impl From<SaveLogArg> for ReportFormat {
    fn from(arg: SaveLogArg) -> Self {
        match arg {
            SaveLogArg::Json => Self::Json,
            SaveLogArg::Csv => Self::Csv,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Debug => Self::Debug,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Error => Self::Error,
        }
    }
}

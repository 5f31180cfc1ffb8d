use anyhow::Result;
use renamer_core::{
    plan_operation, Config, OutputFormatter, PlanOptions, PlanRequest, PlanResult, Preview,
    RenameMode, Selection, TracingSink,
};
use std::path::PathBuf;
use std::str::FromStr;

use crate::cli::args::{ModeArgs, ModeOptions, PlanArgs, SelectionArgs};
use crate::error::UsageError;
use crate::{OutputFormat, PreviewArg};

/// Map the mutually exclusive mode flags onto a `RenameMode`
pub fn to_rename_mode(mode: ModeArgs, options: ModeOptions) -> Result<RenameMode> {
    if let Some(prefix) = mode.sequential {
        return Ok(RenameMode::Sequential {
            prefix,
            start_index: options.start,
            digit_width: options.width,
        });
    }
    if let Some(pattern) = mode.replace {
        return Ok(RenameMode::PatternReplace {
            pattern,
            replacement: options.with,
        });
    }
    if let Some(kind) = mode.case {
        return Ok(RenameMode::CaseChange { kind: kind.into() });
    }
    if let Some(search) = mode.regex {
        return Ok(RenameMode::Regex {
            search,
            replace: options.replacement,
        });
    }
    if let Some(template) = mode.template {
        return Ok(RenameMode::Template { template });
    }
    Err(UsageError::MissingMode.into())
}

/// Resolve the preview format from the flag, then config, then table
pub fn preview_format(preview: Option<PreviewArg>, config: &Config) -> Preview {
    preview.map_or_else(
        || Preview::from_str(&config.defaults.preview_format).unwrap_or(Preview::Table),
        Into::into,
    )
}

/// Build a plan request with CLI flags taking precedence over config
pub fn build_request(
    selection: SelectionArgs,
    mode: RenameMode,
    plan: &PlanArgs,
    preview: Preview,
    config: &Config,
    use_color: Option<bool>,
) -> PlanRequest {
    let paths = if selection.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        selection.paths
    };

    PlanRequest {
        selection: Selection {
            paths,
            pattern: selection.pattern,
            recursive: selection.recursive,
        },
        mode,
        options: PlanOptions {
            case_extension: plan
                .case_extension
                .map_or(config.defaults.case_extension, Into::into),
            collision: plan.collision.map_or(config.defaults.collision, Into::into),
            allow_overwrite: plan.overwrite || config.defaults.allow_overwrite,
            ..PlanOptions::default()
        },
        preview,
        use_color,
    }
}

pub fn handle_plan(request: &PlanRequest, output: OutputFormat) -> Result<()> {
    let (plan, preview) = plan_operation(request, &mut TracingSink)?;

    match output {
        OutputFormat::Json => {
            println!("{}", PlanResult::from_plan(plan).format_json());
        },
        OutputFormat::Summary => {
            if let Some(preview) = preview {
                print!("{}", preview);
            }
            print!("{}", PlanResult::from_plan(plan).format_summary());
        },
    }

    Ok(())
}

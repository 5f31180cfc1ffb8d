use anyhow::{Context, Result};
use clap::Parser;
use renamer_core::{
    entry::STATE_DIR, Config, Level, OutputFormatter, Preview, RenameError, VersionResult,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;
mod error;
mod plan;
mod rename;

use cli::{Cli, Commands, OutputFormat, PreviewArg};
use error::UsageError;
use rename::RenameSettings;

fn main() {
    let cli = Cli::parse();

    // Handle -C directory flag
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to directory: {}", dir.display()))
            .unwrap_or_else(|e| {
                eprintln!("Error: {e:#}");
                process::exit(2);
            });
    }

    // Load config to get defaults
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        process::exit(2);
    });

    let level = cli
        .log_level
        .map_or(config.defaults.log_level, Into::into);
    init_tracing(level);

    let use_color = if cli.no_color {
        Some(false)
    } else {
        config.defaults.use_color
    };

    let result = match cli.command {
        Commands::Plan {
            selection,
            mode,
            mode_options,
            plan: plan_args,
            preview,
            output,
        } => plan::to_rename_mode(mode, mode_options).and_then(|mode| {
            let preview = effective_preview(preview, output, &config);
            let request =
                plan::build_request(selection, mode, &plan_args, preview, &config, use_color);
            plan::handle_plan(&request, output).map(|()| 0)
        }),

        Commands::Rename {
            selection,
            mode,
            mode_options,
            plan: plan_args,
            dry_run,
            backup,
            backup_dir,
            save_log,
            preview,
            output,
        } => plan::to_rename_mode(mode, mode_options).and_then(|mode| {
            let preview = effective_preview(preview, output, &config);
            let request =
                plan::build_request(selection, mode, &plan_args, preview, &config, use_color);
            let settings = RenameSettings {
                dry_run,
                backup: backup || config.defaults.backup,
                backup_dir: backup_dir.unwrap_or_else(|| config.defaults.backup_dir.clone()),
                save_log: save_log.map(Into::into).or(config.defaults.save_log),
                state_dir: PathBuf::from(STATE_DIR),
            };
            rename::handle_rename(&request, &settings, cli.yes, output)
                .map(|succeeded| if succeeded { 0 } else { 1 })
        }),

        Commands::Version { output } => handle_version(output).map(|()| 0),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    }
}

/// 2 for invalid input, 3 for everything else
fn exit_code(error: &anyhow::Error) -> i32 {
    let invalid_input = error.chain().any(|cause| {
        cause.is::<UsageError>()
            || matches!(
                cause.downcast_ref::<RenameError>(),
                Some(RenameError::InvalidPattern(_) | RenameError::InvalidSelection(_))
            )
    });
    if invalid_input {
        2
    } else {
        3
    }
}

/// No preview for JSON output; otherwise the flag, then config
fn effective_preview(preview: Option<PreviewArg>, output: OutputFormat, config: &Config) -> Preview {
    if output == OutputFormat::Json {
        Preview::None
    } else {
        plan::preview_format(preview, config)
    }
}

fn init_tracing(level: Level) {
    let directive = match level {
        Level::Debug => "debug",
        Level::Info => "info",
        Level::Warn => "warn",
        Level::Error => "error",
    };
    let filter = EnvFilter::try_from_env("RENAMER_LOG").unwrap_or_else(|_| EnvFilter::new(directive));
    tracing_subscriber::fmt()
        .compact()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "renamer".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    print!("{}", version_result.format(output.into()));
    if output == OutputFormat::Json {
        println!();
    }
    Ok(())
}

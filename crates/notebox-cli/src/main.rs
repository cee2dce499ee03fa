//! Notebox CLI - local notes for the Notebox launcher
//!
//! This is the command-line interface for Notebox. Every note operation goes
//! through the same bridge the launcher uses, so the CLI and the launcher
//! see identical behavior.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod logging;
mod output;

use clap::Parser;
use notebox_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{bridge, init, maintenance, misc, notes};
use crate::errors::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    // A broken config still gets reported below; logging falls back to defaults.
    let config_level = ctx
        .config()
        .ok()
        .flatten()
        .and_then(|config| config.logging.level.clone());
    if let Err(e) = logging::init_logging(cli.verbose, config_level.as_deref()) {
        eprintln!("Warning: {}", e);
    }

    let result = run(&ctx, &cli).await;
    ctx.shutdown().await;

    if let Err(e) = result {
        if let Some(cli_err) = e.downcast_ref::<CliError>() {
            cli_err.exit();
        }
        let error_msg = format!("{}", e);
        match extract_error_hint(&error_msg) {
            Some(hint) if !error_msg.contains(&hint) => {
                eprintln!("Error: {}\n{}", error_msg, hint)
            }
            _ => eprintln!("Error: {}", error_msg),
        }
        std::process::exit(1);
    }
}

/// Provide contextual hints for common error messages.
fn extract_error_hint(error: &str) -> Option<String> {
    if let Some(idx) = error.find("\nHint:") {
        return Some(error[idx + 1..].to_string());
    }

    let error_lower = error.to_lowercase();

    if error_lower.contains("failed to parse config") {
        return Some(
            "Hint: Fix or remove the config file, or run `notebox init` to rewrite it."
                .to_string(),
        );
    }

    if error_lower.contains("flush failed") || error_lower.contains("store unavailable") {
        return Some(
            "Hint: Check free disk space and permissions on the store directory.".to_string(),
        );
    }

    if error_lower.contains("backup") && error_lower.contains("destination") {
        return Some(
            "Hint: Ensure the destination path is writable and differs from the store."
                .to_string(),
        );
    }

    None
}

async fn run(ctx: &AppContext<'_>, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::List(args)) => {
            notes::handle_list(ctx, args).await?;
        }
        Some(Commands::Show(args)) => {
            notes::handle_show(ctx, args).await?;
        }
        Some(Commands::New(args)) => {
            notes::handle_new(ctx, args).await?;
        }
        Some(Commands::Edit(args)) => {
            notes::handle_edit(ctx, args).await?;
        }
        Some(Commands::Delete(args)) => {
            notes::handle_delete(ctx, args).await?;
        }
        Some(Commands::Check) => {
            maintenance::handle_check(ctx)?;
        }
        Some(Commands::Backup(args)) => {
            maintenance::handle_backup(ctx, args)?;
        }
        Some(Commands::Bridge) => {
            bridge::handle_bridge(ctx).await?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        None => {
            println!("Notebox v{}", VERSION);
            println!("\nQuickstart:");
            println!("  notebox init");
            println!("  notebox new --title \"Groceries\" --content \"milk\"");
            println!("  notebox list");
            println!("  notebox show <id>");
            println!("  notebox edit <id> --content \"milk, eggs\"");
            println!("\nRun `notebox --help` for full usage.");
        }
    }

    Ok(())
}

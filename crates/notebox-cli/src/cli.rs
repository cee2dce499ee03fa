use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use notebox_core::VERSION;

/// Notebox - local notes for the Notebox launcher
#[derive(Parser)]
#[command(name = "notebox")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the notes store
    #[arg(short, long, global = true, env = "NOTEBOX_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the notes store will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Config path override
    #[arg(long)]
    pub config_path: Option<String>,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Note ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `new` command
#[derive(Args)]
pub struct NewArgs {
    /// Note title (defaults to "Untitled")
    #[arg(short, long)]
    pub title: Option<String>,

    /// Note content (overrides stdin)
    #[arg(short, long)]
    pub content: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Note ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// New title (keeps the current title if omitted)
    #[arg(short, long)]
    pub title: Option<String>,

    /// New content (keeps the current content if omitted)
    #[arg(short, long)]
    pub content: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Note ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `backup` command
#[derive(Args)]
pub struct BackupArgs {
    /// Destination path for the backup copy
    #[arg(value_name = "DEST")]
    pub destination: String,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the notes store and write the config file
    Init(InitArgs),

    /// List notes, most recently updated first
    List(ListArgs),

    /// Show a single note
    Show(ShowArgs),

    /// Create a note
    New(NewArgs),

    /// Change a note's title or content
    Edit(EditArgs),

    /// Delete a note
    Delete(DeleteArgs),

    /// Check notes store integrity
    Check,

    /// Copy the notes store to another location
    Backup(BackupArgs),

    /// Serve JSON requests on stdin, one per line, answering on stdout
    Bridge,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

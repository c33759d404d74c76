// Rust guideline compliant 2026-02-06

//! Twinfile CLI Application
//!
//! Command-line interface for twinfile: Git-native file mirroring driven by
//! the pre-commit hook.

use clap::Parser;

pub mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "twf",
    version,
    about = "Twinfile: keep mirrored files in sync through Git pre-commit hooks",
    long_about = "Twinfile replays changes made to a source file onto a mirrored copy in the same repository. The sync runs from the pre-commit hook so mirrors always ride along with the commit that changed their source.",
    after_help = "Examples:\n  twf init\n  twf sync --dry-run\n  twf test\n  twf test /path/to/checkout\n"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Initialize twinfile in the current repository
    Init,

    /// Manually run the repository pre-commit hook and report its exit code
    Test {
        /// Directory to run in (defaults to the directory containing twf)
        path: Option<String>,

        /// Print the result as JSON instead of the banner
        #[arg(long)]
        json: bool,
    },

    /// Sync configured mirrors now
    Sync {
        /// Preview changes without applying
        #[arg(long)]
        dry_run: bool,
    },

    /// Run twinfile Git hooks
    Hooks {
        #[command(subcommand)]
        action: commands::hooks::HookAction,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            commands::init::execute()?;
        }
        Some(Commands::Test { path, json }) => {
            let exit_code = commands::test_hook::execute(path, json)?;
            // The runner's own exit status propagates the hook's.
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Some(Commands::Sync { dry_run }) => {
            commands::sync::execute(dry_run)?;
        }
        Some(Commands::Hooks { action }) => {
            commands::hooks::execute(action)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

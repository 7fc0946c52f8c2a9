//! acl-combiner CLI
//!
//! Combines a base HuJSON policy with the fragments found in a directory

mod commands;
mod output;

use std::io;
use std::path::PathBuf;

use acl_combiner_core::init_tracing;
use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use tracing::error;

#[derive(Parser)]
#[command(name = "acl-combiner")]
#[command(about = "Combine HuJSON policy fragments into a single policy file")]
#[command(version = acl_combiner_core::VERSION)]
#[command(
    long_about = "acl-combiner merges the sections of every .json/.hujson fragment found under a\n\
directory into a base policy, keeping comments, and writes the combined policy.\n\
\n\
Examples:\n  \
acl-combiner -f policy.hujson -d policies/        # Print the combined policy\n  \
acl-combiner -d policies/ -o combined.hujson      # Start from an empty policy\n  \
acl-combiner -d policies/ --allow acls,tests -v   # Only merge two sections"
)]
struct Cli {
    /// Base policy file
    #[arg(short, long, help = "Parent file to merge into (default: an empty policy)")]
    file: Option<PathBuf>,

    /// Directory holding the fragments
    #[arg(
        short,
        long,
        required_unless_present = "generate_completion",
        help = "Directory to search for policy fragments"
    )]
    dir: Option<PathBuf>,

    /// Output file
    #[arg(short, long, help = "Output file (default: stdout)")]
    output: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file path
    #[arg(
        short,
        long,
        help = "Path to configuration file (.aclcombinerrc.json/.aclcombinerrc.toml/acl-combiner.yaml)"
    )]
    config: Option<PathBuf>,

    /// Sections to merge
    #[arg(
        long,
        value_delimiter = ',',
        help = "Only merge these sections (comma-separated, can be used multiple times)"
    )]
    allow: Vec<String>,

    /// Exclude patterns (glob syntax)
    #[arg(
        long,
        help = "Skip fragments matching pattern, relative to the directory (can be used multiple times)"
    )]
    exclude: Vec<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return;
    }

    if !cli.no_color && std::env::var("NO_COLOR").is_err() {
        colored::control::set_override(true);
    } else {
        colored::control::set_override(false);
    }

    init_tracing(&log_directive(cli.verbose));

    if let Err(e) = commands::combine_command(cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

/// Log filter for a `-v` count, used when `RUST_LOG` is unset
fn log_directive(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("acl_combiner={level},acl_combiner_core={level}")
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

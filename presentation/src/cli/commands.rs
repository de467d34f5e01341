//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for ask-group results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every participant's slot followed by the result
    Full,
    /// Only the result (answer or consensus)
    Summary,
    /// JSON output
    Json,
}

/// CLI arguments for confluence
#[derive(Parser, Debug)]
#[command(name = "confluence")]
#[command(author, version, about = "Ask a group a question and summarize their consensus")]
#[command(long_about = r#"
Confluence asks every member of a group the same question, waits until each
of them has answered or the voting period has ended, and summarizes the
answers into a consensus.

Prompts are printed to the terminal. Answer on stdin as

  <display name>: <answer>

Configuration files are loaded from (in priority order):
1. --config <path>                        Explicit config file
2. ./confluence.toml                      Project-level config
3. ~/.config/confluence/config.toml       Global config
4. CONFLUENCE_* environment variables

Example:
  confluence ask-group --group book-club --as alice "Which book next?"
  confluence ask-group -g book-club --as alice --target "@bob @carol" -t 10 "Friday?"
  confluence set-required-role -g book-club --as alice voters
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask a group a question and summarize the answers
    AskGroup {
        /// The question to ask
        question: String,

        /// Group to ask
        #[arg(short, long)]
        group: String,

        /// Member invoking the command (id or display name)
        #[arg(long = "as", value_name = "MEMBER")]
        invoker: String,

        /// Only ask these members, e.g. "@bob @carol"
        #[arg(long, value_name = "NAMES")]
        target: Option<String>,

        /// Minutes until the voting period ends
        #[arg(short, long, value_name = "MINUTES")]
        timeout: Option<u32>,
    },

    /// Require a role for asking a group (administrators only)
    SetRequiredRole {
        /// Role members need to run ask-group
        role: String,

        /// Group to configure
        #[arg(short, long)]
        group: String,

        /// Member invoking the command (id or display name)
        #[arg(long = "as", value_name = "MEMBER")]
        invoker: String,
    },
}

//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for the parenting advisor.

use clap::{Parser, Subcommand};

/// Kosodate Advisor - Expert parenting Q&A from the command line
///
/// Sends your question to an LLM framed as one of five built-in experts
/// (parenting stress, nutrition, sleep, work-life balance, business
/// management) and prints the answer.
#[derive(Parser, Debug)]
#[command(name = "advisor")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the advisor
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question to one of the built-in experts
    Ask {
        /// The question to ask
        question: String,

        /// Expert to consult (stress, nutrition, sleep, balance, management)
        #[arg(short, long, env = "ADVISOR_EXPERT")]
        expert: Option<String>,

        /// Path to configuration file
        #[arg(short, long, env = "ADVISOR_CONFIG")]
        config: Option<String>,
    },

    /// List the available experts
    Experts,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Display version and build information
    Version,
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}

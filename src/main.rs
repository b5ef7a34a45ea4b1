//! Kosodate Advisor - Expert parenting Q&A CLI
//!
//! This is the main entry point for the advisor binary. A question is
//! framed as one of five built-in experts, sent to an OpenAI-compatible
//! chat endpoint, and the answer is printed to stdout.

mod cli;
mod config;
mod error;
mod logging;
mod persona;
mod prompt;
mod provider;
mod service;
mod version;

use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::config::AdvisorConfig;
use crate::error::{Error, Result};
use crate::persona::PersonaRegistry;
use crate::provider::OpenAiProvider;
use crate::service::ExpertQueryService;

fn main() -> Result<()> {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    // For commands that don't need full logging, use simple setup
    match &cli.command {
        Commands::Version => {
            version::print_version();
            return Ok(());
        }
        Commands::Experts => {
            logging::init_simple(tracing::Level::WARN)?;
            return list_experts();
        }
        Commands::Config { subcommand } => {
            // Config commands use minimal logging
            logging::init_simple(tracing::Level::WARN)?;
            return handle_config_command(subcommand.clone());
        }
        Commands::Ask { .. } => {}
    }

    let Commands::Ask {
        question,
        expert,
        config,
    } = cli.command
    else {
        unreachable!();
    };

    // Load config (or use defaults)
    let config = match AdvisorConfig::load(config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            // Use formatted error for terminal
            eprint!("{}", e.format_for_terminal());
            std::process::exit(e.exit_code());
        }
    };

    // Initialize logging with config settings
    // The guards must be kept alive for the lifetime of the program
    let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

    // Log version info at startup
    let build = version::build_info();
    info!(
        version = %build.full_version(),
        profile = %build.profile,
        "Starting Kosodate Advisor"
    );

    let expert = expert.unwrap_or_else(|| config.default_expert().to_string());

    if let Err(e) = run_ask(&config, &question, &expert) {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

/// Run one question/answer round trip on a current-thread runtime
fn run_ask(config: &AdvisorConfig, question: &str, expert: &str) -> Result<()> {
    let registry = PersonaRegistry::builtin()?;
    let provider = OpenAiProvider::new(config.provider.clone())?;

    // One request at a time; a multi-threaded runtime buys nothing here
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Internal(format!("Failed to create async runtime: {}", e)))?;

    let answer = runtime.block_on(async {
        let service = ExpertQueryService::new(&registry, &provider);
        service.ask(question, expert).await
    })?;

    println!("{}", answer.text);
    Ok(())
}

/// Print the built-in experts with their descriptions
fn list_experts() -> Result<()> {
    let registry = PersonaRegistry::builtin()?;

    println!("Available experts:");
    for persona in registry.all() {
        println!(
            "  {:<12} {} - {}",
            persona.slug(),
            persona.id.display_name(),
            persona.description
        );
    }

    Ok(())
}

/// Handle configuration subcommands
fn handle_config_command(subcommand: cli::ConfigSubcommand) -> Result<()> {
    use cli::ConfigSubcommand;

    match subcommand {
        ConfigSubcommand::Show { config } => {
            let cfg = AdvisorConfig::load(config.as_deref())?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            config::init_config(path.as_deref(), force)?;
        }
        ConfigSubcommand::Validate { config } => {
            let path = config.as_deref();
            match AdvisorConfig::load(path) {
                Ok(_) => {
                    println!("Configuration is valid.");
                }
                Err(e) => {
                    eprint!("{}", e.format_for_terminal());
                    std::process::exit(e.exit_code());
                }
            }
        }
    }

    Ok(())
}

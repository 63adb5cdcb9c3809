use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quartet::config::{Overrides, Settings};
use quartet::providers::base::Provider;
use quartet::providers::factory::{get_provider, ProviderType};

mod commands;
mod prompt;

use commands::career::CareerCommand;
use commands::game::GameCommand;
use commands::student::StudentCommand;
use commands::travel::TravelCommand;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Model provider (gemini, openai or offline); overrides quartet.toml
    #[arg(short, long, global = true)]
    provider: Option<ProviderType>,

    /// Model name; overrides quartet.toml
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Settings file to use instead of ./quartet.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Career guidance from the career, skill and job specialists
    #[command(subcommand)]
    Career(CareerCommand),

    /// Play the text adventure
    #[command(subcommand)]
    Game(GameCommand),

    /// Academic questions, study tips and summaries
    #[command(subcommand)]
    Student(StudentCommand),

    /// Plan a trip with the travel agents
    #[command(subcommand)]
    Travel(TravelCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenv::dotenv().ok();
    init_tracing(cli.verbose);

    let provider = build_provider(cli.config.as_deref(), cli.provider, cli.model.clone())?;
    tracing::debug!(model = provider.model(), "provider ready");

    match cli.command {
        Command::Career(command) => commands::career::run(command, provider).await,
        Command::Game(command) => commands::game::run(command, provider).await,
        Command::Student(command) => commands::student::run(command, provider).await,
        Command::Travel(command) => commands::travel::run(command, provider).await,
    }
}

/// Logs go to stderr so they never interleave with rendered replies
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_provider(
    config: Option<&Path>,
    provider: Option<ProviderType>,
    model: Option<String>,
) -> Result<Arc<dyn Provider>> {
    let settings = Settings::load(config, &Overrides { provider, model })?;
    get_provider(settings.provider_config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "quartet", "student", "tips", "--provider", "offline", "--verbose",
        ])
        .unwrap();
        assert_eq!(cli.provider, Some(ProviderType::Offline));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Student(StudentCommand::Tips)));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        assert!(Cli::try_parse_from(["quartet", "--provider", "ollama", "student", "tips"]).is_err());
    }

    #[test]
    fn test_provider_from_config_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[provider]\ntype = \"offline\"").unwrap();

        let provider = build_provider(Some(file.path()), None, None).unwrap();
        assert_eq!(provider.model(), "offline");
    }
}

use clap::Parser;
use leaderboard::adapter::inbound::cli::command::{Cli, ColorChoice, Commands, ConfigCommand};
use leaderboard::adapter::inbound::cli::output::{self, OutputConfig};
use leaderboard::adapter::inbound::cli::{calendar, config, dashboard, serve, targets};
use leaderboard::error::Result;
use leaderboard::infrastructure::config::settings::Config;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    if let Err(e) = run(cli).await {
        error!(error = %e, "Fatal error");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Config(ConfigCommand::Init { force }) => config::execute_init(&cli.config, force),
        Commands::Config(ConfigCommand::Show) => config::execute_show(&cli.config),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&cli.config),
        Commands::Calendar(args) => {
            let config = config::load(&cli.config)?;
            calendar::execute(&config, &args)
        }
        Commands::Targets(args) => {
            let config = config::load(&cli.config)?;
            init_logging(&config, cli.verbose);
            targets::execute(&config, &args).await
        }
        Commands::Serve(args) => {
            let config = config::load(&cli.config)?;
            init_logging(&config, cli.verbose);
            info!("leaderboard server starting");
            serve::execute(config, &args).await
        }
        Commands::Dashboard(args) => {
            let config = config::load(&cli.config)?;
            init_logging(&config, cli.verbose);
            info!("leaderboard dashboard starting");
            dashboard::execute(&config, &args).await
        }
    }
}

/// `-v` raises the configured level to debug, `-vv` to trace.
fn init_logging(config: &Config, verbose: u8) {
    let mut logging = config.logging.clone();
    match verbose {
        0 => {}
        1 => logging.level = "debug".to_string(),
        _ => logging.level = "trace".to_string(),
    }
    logging.init();
}

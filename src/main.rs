use clap::Parser;
use tracing_subscriber::EnvFilter;
use ui_probe::cli::commands::{cmd_paths, cmd_tree};
use ui_probe::cli::config::{Cli, Commands, load_config, log_level};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_level(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref());

    // Resolve settings: CLI > config > defaults
    match cli.command {
        Commands::Tree {
            dump,
            format,
            strict,
        } => {
            let format = format.unwrap_or(config.format);
            cmd_tree(&dump, format, strict || config.strict)?;
        }
        Commands::Paths { dump, app, format } => {
            let app = app.unwrap_or(config.app_name);
            let format = format.unwrap_or(config.format);
            cmd_paths(&dump, &app, format)?;
        }
    }

    Ok(())
}

use clap::Parser;
use link_hints::cli::commands::{cmd_hints, cmd_replay, cmd_scan};
use link_hints::cli::config::{Cli, Commands, load_config, resolve_settings, resolve_trace_path};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    // Resolve hint settings: CLI > config > defaults
    let settings = resolve_settings(&cli, &config)?;
    let trace_path = resolve_trace_path(&cli, &config);

    match &cli.command {
        Commands::Scan { page } => {
            cmd_scan(page, cli.verbose)?;
        }
        Commands::Hints { page } => {
            cmd_hints(page, &settings, cli.verbose)?;
        }
        Commands::Replay {
            page,
            keys,
            action,
            key_interval_ms,
            settle_ms,
        } => {
            cmd_replay(
                page,
                keys,
                action,
                *key_interval_ms,
                *settle_ms,
                &settings,
                trace_path.as_deref(),
                cli.verbose,
            )?;
        }
    }

    Ok(())
}

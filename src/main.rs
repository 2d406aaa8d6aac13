//! bbviz - a terminal dashboard for exploring batted-ball events.

use bbviz::cli::Cli;
use bbviz::config::Config;
use bbviz::error::Result;
use bbviz::roster::{self, Roster};
use bbviz::tui::headless::run_headless;
use bbviz::tui::Tui;
use bbviz::{data, logging};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();

    if cli.is_headless() || cli.export_roster.is_some() {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{}: {}", e.category(), e);
            eprintln!("{}: {}", e.category(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    config.apply_env_defaults();
    cli.apply_overrides(&mut config)?;
    config.validate()?;

    if let Some(dir) = &cli.export_roster {
        let source = roster::name_source(&config).await;
        for path in roster::export(source.as_ref(), dir).await? {
            println!("{}", path.display());
        }
        return Ok(ExitCode::SUCCESS);
    }

    if cli.is_headless() {
        let passed = run_headless(&cli, &config).await?;
        return Ok(if passed {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let roster = Roster::load(roster::name_source(&config).await.as_ref()).await;
    let source = data::connect(&config.data).await?;
    let mut tui = Tui::new()?;
    tui.run(source, roster, &config).await?;
    Ok(ExitCode::SUCCESS)
}

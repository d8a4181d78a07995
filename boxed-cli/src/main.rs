//! boxedup - storage tub inventory with printable QR labels

mod cli;
mod commands;
mod config;
mod logger;

use boxed_client::{AppContext, backend_for};
use clap::Parser;
use cli::Cli;
use config::Config;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    config.apply_overrides(&cli);

    let _guard = match logger::init_logger(config.log_json, config.log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {:#}", e);
            ExitCode::from(commands::exit_code(&e))
        }
    }
}

async fn run(cli: Cli, config: &Config) -> anyhow::Result<()> {
    let backend = backend_for(&config.backend_config())?;

    if commands::run_unauthenticated(&cli.command, &backend).await? {
        return Ok(());
    }

    let ctx = match (cli.login.email.as_deref(), cli.login.password.as_deref()) {
        (Some(email), Some(password)) => AppContext::sign_in(backend, email, password).await?,
        _ => AppContext::establish(backend).await?,
    };
    if ctx.is_demo() {
        tracing::info!("Demo mode: changes are kept in memory only");
    }

    commands::run(cli.command, &ctx, config).await
}

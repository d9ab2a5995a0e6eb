use anyhow::Result;
use chrono::Local;
use clap::Parser;
use std::fs::File;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

mod local;
mod remote;
mod shell;
mod types;

use remote::client::CurlClient;
use shell::Shell;

/// Interactive FTP client and local file manager
#[derive(Parser)]
#[command(name = "ftpr", version, about)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();

    // Setup logging; the prompt owns stdout, so logs go to a file
    let log_dir = "logs";
    if !std::path::Path::new(log_dir).exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let log_file = format!(
        "{}/ftpr_{}.log",
        log_dir,
        Local::now().format("%Y%m%d_%H%M%S")
    );
    let file = File::create(&log_file)?;

    fmt()
        .with_max_level(Level::DEBUG)
        .with_env_filter(EnvFilter::from_default_env().add_directive("ftpr=debug".parse()?))
        .with_ansi(false)
        .with_writer(file)
        .init();

    debug!("starting shell");

    let client = match CurlClient::new().await {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Failed to initialize the transfer client: {:#}", err);
            std::process::exit(1);
        }
    };

    let mut shell = Shell::new(client)?;
    shell.run().await
}

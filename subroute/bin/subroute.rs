//! Command-line front end for the subaddress router
//!
//! - `route`: dry-run the routing of one or more recipients
//! - `check-config`: validate the configuration and show the global policy

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use subroute::{Subroute, controller::SharedStore, splitter::Splitter};
use subroute_router::{RecordingMessage, Router};

/// Route inbound email by subaddress
#[derive(Parser, Debug)]
#[command(name = "subroute")]
#[command(about = "Route inbound email by subaddress", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show what would happen to a message sent to each recipient
    Route {
        /// Recipient addresses
        #[arg(required = true)]
        recipients: Vec<String>,

        /// Envelope sender
        #[arg(short, long, default_value = "sender@localhost")]
        from: String,
    },
    /// Validate the configuration and print the resolved global policy
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => find_config_file()?,
    };
    let config = Subroute::from_file(&config_path)?;
    config.init();

    let router = config.router()?;

    match cli.command {
        Commands::Route { recipients, from } => cmd_route(&router, &from, &recipients).await,
        Commands::CheckConfig => cmd_check_config(&config, &router).await,
    }
}

async fn cmd_route(
    router: &Router<SharedStore, Splitter>,
    from: &str,
    recipients: &[String],
) -> anyhow::Result<()> {
    for recipient in recipients {
        let mut message = RecordingMessage::new(from, recipient.as_str());
        router.route(&mut message).await?;

        match message.outbound() {
            Some(outbound) => println!("{recipient} -> {outbound}"),
            None => anyhow::bail!("No outbound call was made for {recipient}"),
        }
    }

    Ok(())
}

async fn cmd_check_config(
    config: &Subroute,
    router: &Router<SharedStore, Splitter>,
) -> anyhow::Result<()> {
    let policy = router.resolver().resolve_global().await?;

    println!("{policy}");
    println!();
    println!("splitter     = {:?}", config.splitter);
    println!("store_errors = {:?}", config.store_errors);
    match config.lookup_timeout()? {
        Some(timeout) => println!("timeout      = {}s", timeout.as_secs()),
        None => println!("timeout      = none"),
    }

    Ok(())
}

/// Find the configuration file using the following precedence:
/// 1. `SUBROUTE_CONFIG` environment variable
/// 2. ./subroute.config.ron (current working directory)
/// 3. /etc/subroute/subroute.config.ron (system-wide config)
fn find_config_file() -> anyhow::Result<PathBuf> {
    if let Ok(env_path) = std::env::var("SUBROUTE_CONFIG") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        anyhow::bail!(
            "SUBROUTE_CONFIG points to non-existent file: {}",
            path.display()
        );
    }

    let default_paths = [
        PathBuf::from("./subroute.config.ron"),
        PathBuf::from("/etc/subroute/subroute.config.ron"),
    ];

    if let Some(path) = default_paths.iter().find(|path| path.exists()) {
        return Ok(path.clone());
    }

    let paths_tried = default_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    anyhow::bail!(
        "No configuration file found. Tried:\n  - SUBROUTE_CONFIG environment variable\n{paths_tried}"
    )
}

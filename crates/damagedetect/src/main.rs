//! `damagedetect` - CLI for the drone operations dashboard
//!
//! This binary runs the dashboard web server and prints the damage and drone
//! listings it serves.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;

use damagedetect::cli::{
    format_damage, format_drones, Cli, Command, ConfigCommand, DamageCommand, DronesCommand,
    ServeCommand,
};
use damagedetect::{build_router, feed, init_logging, web, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Execute the command; configuration is loaded by the commands that need it
    match cli.command {
        Command::Serve(serve_cmd) => handle_serve(load_config(cli.config)?, serve_cmd).await,
        Command::Damage(damage_cmd) => handle_damage(&load_config(cli.config)?, &damage_cmd).await,
        Command::Drones(drones_cmd) => handle_drones(&load_config(cli.config)?, &drones_cmd).await,
        Command::Config(config_cmd) => handle_config(cli.config, config_cmd),
    }
}

fn load_config(config_path: Option<PathBuf>) -> anyhow::Result<Config> {
    Config::load_from(config_path).context("failed to load configuration")
}

async fn handle_serve(mut config: Config, cmd: ServeCommand) -> anyhow::Result<()> {
    if let Some(bind) = cmd.bind {
        config.server.bind_address = bind;
    }
    if let Some(port) = cmd.port {
        config.server.port = port;
    }
    config.validate().context("invalid server override")?;

    let feed = feed::from_config(&config.feed)?;
    info!(feed = feed.name(), "Using status feed");

    let router = build_router(AppState::new(config.site.clone(), feed));
    let listener = web::bind(&config.listen_address()).await?;
    web::serve(listener, router).await?;
    Ok(())
}

async fn handle_damage(config: &Config, cmd: &DamageCommand) -> anyhow::Result<()> {
    let feed = feed::from_config(&config.feed)?;
    let records = feed
        .damage_statuses(cmd.refresh)
        .await
        .context("failed to fetch damage statuses")?;
    print!("{}", format_damage(&records, cmd.format)?);
    Ok(())
}

async fn handle_drones(config: &Config, cmd: &DronesCommand) -> anyhow::Result<()> {
    let feed = feed::from_config(&config.feed)?;
    let drones = feed
        .drone_statuses()
        .await
        .context("failed to fetch drone statuses")?;
    print!("{}", format_drones(&drones, cmd.format)?);
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Listen address:     {}", config.listen_address());
                println!();
                println!("[Site]");
                println!("  Name:               {}", config.site.name);
                println!("  Description:        {}", config.site.description);
                println!("  Nav items:          {}", config.site.nav_items.len());
                println!("  Menu items:         {}", config.site.nav_menu_items.len());
                println!();
                println!("[Feed]");
                println!("  Source:             {:?}", config.feed.source);
                if let Some(dir) = &config.feed.directory {
                    println!("  Directory:          {}", dir.display());
                }
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            if !path.is_file() {
                bail!("configuration file not found: {}", path.display());
            }
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("configuration error in {}", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

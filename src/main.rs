use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use postboard::app::{App, AppEvent};
use postboard::config::Config;

/// Get the config directory path (~/.config/postboard/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("postboard"))
}

#[derive(Parser, Debug)]
#[command(
    name = "postboard",
    about = "Browse, search and edit posts from a REST endpoint"
)]
struct Args {
    /// URL of the JSON post collection
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Cards per page
    #[arg(long, value_name = "N")]
    page_size: Option<usize>,

    /// Start with post bodies hidden
    #[arg(long)]
    hide_body: bool,

    /// Config file (default: ~/.config/postboard/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Load the config file and apply command-line overrides on top.
fn load_config(args: &Args) -> Result<Config> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };

    let mut config = Config::load(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    if args.hide_body {
        config.show_body = false;
    }

    config.validate().context("Invalid command-line options")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    tracing::info!(
        endpoint = %config.endpoint,
        page_size = config.effective_page_size(),
        "Starting postboard"
    );

    let mut app = App::new(&config).context("Failed to create application")?;

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(8);
    postboard::ui::spawn_bootstrap(&mut app, &event_tx);
    drop(event_tx);

    postboard::ui::run(&mut app, event_rx).await?;

    Ok(())
}

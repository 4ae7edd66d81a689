use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_transcript_api::cli::{Cli, Commands};
use yt_transcript_api::config::Config;
use yt_transcript_api::provider::YoutubeCaptionClient;
use yt_transcript_api::server::Server;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "yt_transcript_api=debug,tower_http=debug"
    } else {
        "yt_transcript_api=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::load().await?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let provider = Arc::new(YoutubeCaptionClient::new(&config.youtube));
            let server = Server::new(&config, provider)?;

            tracing::info!("Starting YouTube Transcript API");
            server.serve().await?;
        }
        Commands::Config { show } => {
            if show {
                config.display();
            } else {
                println!("Config file: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

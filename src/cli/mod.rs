use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "yt-transcript",
    about = "YouTube Transcript API - Serve YouTube video transcripts over HTTP",
    version,
    long_about = "An HTTP service that accepts a YouTube video URL and returns the video's \
transcript as flattened text. Caption data is fetched from YouTube on demand; nothing is stored."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long, value_name = "HOST")]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,
    },

    /// Show or manage configuration
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },
}

//! YouTube Transcript API - an HTTP service for fetching YouTube video transcripts
//!
//! This library exposes a single endpoint that accepts a YouTube video URL and
//! returns the video's captions flattened into one string. Caption retrieval is
//! delegated to a transcript provider; the service itself only parses URLs,
//! shapes requests and responses, and translates errors.

pub mod cli;
pub mod config;
pub mod extract;
pub mod provider;
pub mod server;
pub mod transcript;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use provider::{ProviderError, TranscriptProvider};
pub use server::Server;
pub use transcript::CaptionEntry;

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

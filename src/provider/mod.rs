use async_trait::async_trait;

pub mod youtube;

pub use youtube::YoutubeCaptionClient;

use crate::transcript::CaptionEntry;

/// Errors from the caption provider.
///
/// All variants surface to API consumers as a single HTTP 500 tier; the
/// classification exists for logging and tests.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("no captions available for video {0}")]
    NoCaptions(String),

    #[error("video unavailable: {0}")]
    VideoUnavailable(String),

    #[error("caption request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected provider response: {0}")]
    UnexpectedResponse(String),
}

/// Trait for fetching a video's caption entries
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Fetch the full caption list for the video's default/available track,
    /// in caption order.
    async fn fetch_transcript(
        &self,
        video_id: &str,
    ) -> Result<Vec<CaptionEntry>, ProviderError>;
}

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::YoutubeConfig;
use crate::transcript::CaptionEntry;

use super::{ProviderError, TranscriptProvider};

/// Caption client talking to YouTube's Innertube player endpoint.
///
/// Two round trips per request: one player call to list the video's caption
/// tracks, one fetch of the selected track in json3 format. The Android client
/// context is used because its caption URLs work without additional tokens.
pub struct YoutubeCaptionClient {
    client: Client,
    player_url: String,
    preferred_language: String,
    client_version: String,
}

impl YoutubeCaptionClient {
    pub fn new(config: &YoutubeConfig) -> Self {
        Self {
            client: Client::new(),
            player_url: config.player_url.clone(),
            preferred_language: config.preferred_language.clone(),
            client_version: config.client_version.clone(),
        }
    }

    /// Look up the caption track to fetch for a video
    async fn lookup_caption_track(&self, video_id: &str) -> Result<CaptionTrack, ProviderError> {
        tracing::debug!("Looking up caption tracks for video: {}", video_id);

        let body = json!({
            "context": {
                "client": {
                    "clientName": "ANDROID",
                    "clientVersion": self.client_version,
                }
            },
            "videoId": video_id,
        });

        let response = self.client.post(&self.player_url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Player endpoint returned HTTP {} for {}", status, video_id);
            return Err(ProviderError::UnexpectedResponse(format!(
                "player endpoint returned HTTP {status}"
            )));
        }

        let player: PlayerResponse = response.json().await.map_err(|e| {
            ProviderError::UnexpectedResponse(format!("undecodable player response: {e}"))
        })?;

        select_caption_track(player, video_id, &self.preferred_language)
    }

    /// Fetch a caption track and flatten it into entries
    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<CaptionEntry>, ProviderError> {
        // Track URLs already carry a query string
        let url = format!("{}&fmt=json3", track.base_url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::UnexpectedResponse(format!(
                "caption endpoint returned HTTP {status}"
            )));
        }

        let timed_text: TimedText = response.json().await.map_err(|e| {
            ProviderError::UnexpectedResponse(format!("undecodable caption payload: {e}"))
        })?;

        Ok(flatten_events(timed_text))
    }
}

#[async_trait]
impl TranscriptProvider for YoutubeCaptionClient {
    async fn fetch_transcript(
        &self,
        video_id: &str,
    ) -> Result<Vec<CaptionEntry>, ProviderError> {
        let track = self.lookup_caption_track(video_id).await?;

        tracing::debug!(
            "Fetching caption track ({}) for video: {}",
            track.language_code.as_deref().unwrap_or("unknown"),
            video_id,
        );

        self.fetch_track(&track).await
    }
}

/// Pick the track matching the preferred language, falling back to the first
fn select_caption_track(
    player: PlayerResponse,
    video_id: &str,
    preferred_language: &str,
) -> Result<CaptionTrack, ProviderError> {
    if let Some(playability) = &player.playability_status {
        if let Some(status) = &playability.status {
            if status != "OK" {
                let reason = playability.reason.as_deref().unwrap_or(status);
                return Err(ProviderError::VideoUnavailable(reason.to_string()));
            }
        }
    }

    let mut tracks = player
        .captions
        .and_then(|c| c.player_captions_tracklist_renderer)
        .and_then(|r| r.caption_tracks)
        .unwrap_or_default();

    if tracks.is_empty() {
        return Err(ProviderError::NoCaptions(video_id.to_string()));
    }

    let index = tracks
        .iter()
        .position(|t| t.language_code.as_deref() == Some(preferred_language))
        .unwrap_or(0);

    Ok(tracks.swap_remove(index))
}

/// Flatten json3 events into caption entries, one entry per captioned event
fn flatten_events(timed_text: TimedText) -> Vec<CaptionEntry> {
    timed_text
        .events
        .unwrap_or_default()
        .into_iter()
        .filter_map(|event| {
            let segs = event.segs?;
            let text: String = segs.into_iter().filter_map(|s| s.utf8).collect();

            // Timing-only events carry a lone newline
            if text.is_empty() || text == "\n" {
                return None;
            }

            Some(CaptionEntry {
                text: Some(text.replace('\n', " ")),
                start: event.start_ms.map(|ms| ms as f64 / 1000.0),
                duration: event.duration_ms.map(|ms| ms as f64 / 1000.0),
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    captions: Option<Captions>,
    playability_status: Option<PlayabilityStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayabilityStatus {
    status: Option<String>,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    caption_tracks: Option<Vec<CaptionTrack>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TimedText {
    events: Option<Vec<TimedTextEvent>>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(rename = "tStartMs")]
    start_ms: Option<u64>,

    #[serde(rename = "dDurationMs")]
    duration_ms: Option<u64>,

    segs: Option<Vec<Segment>>,
}

#[derive(Debug, Deserialize)]
struct Segment {
    utf8: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn player_response(value: serde_json::Value) -> PlayerResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_selects_preferred_language_track() {
        let player = player_response(json!({
            "playabilityStatus": { "status": "OK" },
            "captions": {
                "playerCaptionsTracklistRenderer": {
                    "captionTracks": [
                        { "baseUrl": "https://example.com/t?lang=de", "languageCode": "de" },
                        { "baseUrl": "https://example.com/t?lang=en", "languageCode": "en" }
                    ]
                }
            }
        }));

        let track = select_caption_track(player, "abc123", "en").unwrap();
        assert_eq!(track.language_code.as_deref(), Some("en"));
    }

    #[test]
    fn test_falls_back_to_first_track() {
        let player = player_response(json!({
            "playabilityStatus": { "status": "OK" },
            "captions": {
                "playerCaptionsTracklistRenderer": {
                    "captionTracks": [
                        { "baseUrl": "https://example.com/t?lang=de", "languageCode": "de" },
                        { "baseUrl": "https://example.com/t?lang=fr", "languageCode": "fr" }
                    ]
                }
            }
        }));

        let track = select_caption_track(player, "abc123", "en").unwrap();
        assert_eq!(track.language_code.as_deref(), Some("de"));
    }

    #[test]
    fn test_missing_tracks_is_no_captions() {
        let player = player_response(json!({
            "playabilityStatus": { "status": "OK" }
        }));

        let err = select_caption_track(player, "abc123", "en").unwrap_err();
        assert!(matches!(err, ProviderError::NoCaptions(id) if id == "abc123"));
    }

    #[test]
    fn test_bad_playability_is_unavailable() {
        let player = player_response(json!({
            "playabilityStatus": { "status": "ERROR", "reason": "Video unavailable" }
        }));

        let err = select_caption_track(player, "abc123", "en").unwrap_err();
        assert!(matches!(err, ProviderError::VideoUnavailable(reason) if reason == "Video unavailable"));
    }

    #[test]
    fn test_flattens_json3_events() {
        let timed_text: TimedText = serde_json::from_value(json!({
            "events": [
                { "tStartMs": 0, "dDurationMs": 1500, "segs": [ { "utf8": "Hi" } ] },
                { "tStartMs": 1500 },
                { "tStartMs": 2000, "dDurationMs": 1000, "segs": [ { "utf8": "there,\n" }, { "utf8": "world" } ] },
                { "tStartMs": 3000, "segs": [ { "utf8": "\n" } ] }
            ]
        }))
        .unwrap();

        let entries = flatten_events(timed_text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text.as_deref(), Some("Hi"));
        assert_eq!(entries[0].start, Some(0.0));
        assert_eq!(entries[0].duration, Some(1.5));
        assert_eq!(entries[1].text.as_deref(), Some("there, world"));
    }
}

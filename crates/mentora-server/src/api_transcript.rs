//! YouTube transcript fetching.
//!
//! Lessons on the platform embed YouTube videos; the frontend asks the
//! backend for a caption transcript so the tutor can discuss the video with
//! the learner. YouTube exposes no official transcript API, so this follows
//! the same path browsers do: fetch the watch page, read the caption track
//! list out of the embedded player config, then fetch the chosen track in
//! its JSON form.

use crate::api::ApiError;
use crate::AppState;
use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request body for transcript fetching.
#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    pub video_url: String,
}

/// Response body for a fetched transcript.
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub success: bool,
    pub video_id: String,
    pub transcript: String,
    pub language: String,
    pub language_code: String,
}

/// One entry of the player config's caption track list.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    #[serde(rename = "languageCode")]
    pub language_code: String,
    #[serde(default)]
    pub name: Option<serde_json::Value>,
}

impl CaptionTrack {
    /// Display name of the track's language, falling back to the code.
    fn language(&self) -> String {
        self.name
            .as_ref()
            .and_then(|name| name["simpleText"].as_str())
            .unwrap_or(&self.language_code)
            .to_string()
    }
}

/// Extracts the video id from the YouTube URL forms learners paste:
/// `watch?v=`, `youtu.be/`, `/embed/`, `/v/`, and `/shorts/`.
pub fn extract_video_id(raw: &str) -> Option<String> {
    let parsed = url::Url::parse(raw).ok()?;
    let host = parsed.host_str()?.trim_start_matches("www.");

    let id = match host {
        "youtu.be" => parsed.path_segments()?.next().map(str::to_string),
        "youtube.com" | "m.youtube.com" | "music.youtube.com" => {
            if parsed.path() == "/watch" {
                parsed
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned())
            } else {
                let mut segments = parsed.path_segments()?;
                match segments.next() {
                    Some("embed") | Some("v") | Some("shorts") => {
                        segments.next().map(str::to_string)
                    }
                    _ => None,
                }
            }
        }
        _ => None,
    }?;

    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid.then_some(id)
}

/// Finds the caption track list inside the watch-page HTML.
///
/// Returns `None` when the page carries no `captionTracks` key at all
/// (captions disabled); `Some(vec![])` when the key exists but lists no
/// tracks.
pub fn extract_caption_tracks(html: &str) -> Option<Vec<CaptionTrack>> {
    let start = html.find("\"captionTracks\":")? + "\"captionTracks\":".len();
    let array = balanced_json_array(&html[start..])?;
    serde_json::from_str(array).ok()
}

/// Slices the balanced JSON array starting at the beginning of `s`,
/// respecting string literals and escapes.
fn balanced_json_array(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Prefers an English track, falling back to the first available.
pub fn pick_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    tracks
        .iter()
        .find(|t| t.language_code.starts_with("en"))
        .or_else(|| tracks.first())
}

#[derive(Debug, Deserialize)]
struct Json3Transcript {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
struct Json3Event {
    #[serde(default)]
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: Option<String>,
}

/// Joins a json3 caption document into one whitespace-normalized string.
fn join_transcript(doc: &Json3Transcript) -> String {
    let mut text = String::new();
    for event in &doc.events {
        let Some(segs) = &event.segs else { continue };
        for seg in segs {
            if let Some(utf8) = &seg.utf8 {
                text.push_str(utf8);
                text.push(' ');
            }
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Handler for `POST /api/youtube/transcript`.
pub async fn transcript_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<TranscriptRequest>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let video_id = extract_video_id(&request.video_url)
        .ok_or_else(|| ApiError::BadRequest("Invalid YouTube URL".to_string()))?;

    let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
    let page = state
        .http
        .get(&watch_url)
        .send()
        .await
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    if !page.status().is_success() {
        return Err(ApiError::NotFound(
            "Video not found or unavailable".to_string(),
        ));
    }
    let html = page
        .text()
        .await
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    let tracks = extract_caption_tracks(&html).ok_or_else(|| {
        ApiError::Forbidden("Transcripts are disabled for this video".to_string())
    })?;
    let track = pick_track(&tracks).ok_or_else(|| {
        ApiError::NotFound("No transcripts available for this video".to_string())
    })?;

    let track_url = format!("{}&fmt=json3", track.base_url);
    let doc: Json3Transcript = state
        .http
        .get(&track_url)
        .send()
        .await
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?
        .json()
        .await
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    let transcript = join_transcript(&doc);
    if transcript.is_empty() {
        return Err(ApiError::NotFound(
            "No transcripts found for this video".to_string(),
        ));
    }

    Ok(Json(TranscriptResponse {
        success: true,
        video_id,
        transcript,
        language: track.language(),
        language_code: track.language_code.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_ids_from_common_url_forms() {
        for (url, expected) in [
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "dQw4w9WgXcQ"),
            ("https://youtube.com/watch?v=abc123&t=10s", "abc123"),
            ("https://youtu.be/dQw4w9WgXcQ", "dQw4w9WgXcQ"),
            ("https://www.youtube.com/embed/xyz_9-A", "xyz_9-A"),
            ("https://www.youtube.com/v/xyz_9-A", "xyz_9-A"),
            ("https://m.youtube.com/watch?v=abc123", "abc123"),
            ("https://www.youtube.com/shorts/shortid1", "shortid1"),
        ] {
            assert_eq!(extract_video_id(url).as_deref(), Some(expected), "{url}");
        }
    }

    #[test]
    fn rejects_non_video_urls() {
        for url in [
            "not a url",
            "https://example.com/watch?v=abc",
            "https://www.youtube.com/",
            "https://www.youtube.com/watch",
            "https://www.youtube.com/watch?list=PL123",
        ] {
            assert_eq!(extract_video_id(url), None, "{url}");
        }
    }

    #[test]
    fn caption_tracks_parse_from_player_config() {
        let html = r#"<script>var ytInitialPlayerResponse = {"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=en","name":{"simpleText":"English"},"languageCode":"en"},{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=bn","name":{"simpleText":"Bangla"},"languageCode":"bn"}]}}};</script>"#;
        let tracks = extract_caption_tracks(html).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].language_code, "en");
        assert!(tracks[0].base_url.contains("lang=en"));
        assert_eq!(tracks[0].language(), "English");
    }

    #[test]
    fn page_without_caption_tracks_is_none() {
        assert!(extract_caption_tracks("<html>no captions here</html>").is_none());
    }

    #[test]
    fn balanced_array_survives_nested_brackets_and_strings() {
        let s = r#"[{"a":"tricky ] string","b":[1,2]},{"c":"\" escaped"}] trailing"#;
        let array = balanced_json_array(s).unwrap();
        let value: serde_json::Value = serde_json::from_str(array).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn picks_english_then_first() {
        let mk = |code: &str| CaptionTrack {
            base_url: String::new(),
            language_code: code.to_string(),
            name: None,
        };
        let tracks = vec![mk("bn"), mk("en-US")];
        assert_eq!(pick_track(&tracks).unwrap().language_code, "en-US");

        let tracks = vec![mk("bn"), mk("hi")];
        assert_eq!(pick_track(&tracks).unwrap().language_code, "bn");

        assert!(pick_track(&[]).is_none());
    }

    #[test]
    fn join_transcript_normalizes_whitespace() {
        let doc: Json3Transcript = serde_json::from_str(
            r#"{"events":[
                {"segs":[{"utf8":"Hello\n"},{"utf8":"  world"}]},
                {},
                {"segs":[{"utf8":"again"}]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(join_transcript(&doc), "Hello world again");
    }
}

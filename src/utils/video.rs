// src/utils/video.rs

use url::Url;

/// Maps a YouTube link to its embeddable player URL.
///
/// Handles `youtube.com/watch?v=ID`, `youtu.be/ID` (with or without extra query
/// parameters) and links that are already `youtube.com/embed/ID`. Returns `None`
/// for anything else; callers fall back to a plain link.
pub fn embed_url(video_url: &str) -> Option<String> {
    let url = Url::parse(video_url).ok()?;
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");

    let id = match host {
        "youtu.be" => url.path_segments()?.next().map(str::to_string),
        "youtube.com" => {
            let mut segments = url.path_segments()?;
            match segments.next() {
                Some("watch") => url
                    .query_pairs()
                    .find(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned()),
                Some("embed") | Some("shorts") => segments.next().map(str::to_string),
                _ => None,
            }
        }
        _ => None,
    }?;

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return None;
    }

    Some(format!("https://www.youtube.com/embed/{}", id))
}

//! Media URL helpers for the player collaborator.
//!
//! Entries point either at a direct video file or at a YouTube page.
//! YouTube links have to be rewritten to the embed form before a player
//! can load them in a frame.

use reqwest::Url;

const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Check if a URL points at YouTube
pub fn is_youtube_url(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

/// Normalize a media URL to its embeddable form.
///
/// Handles `youtube.com/embed/<id>` (unchanged), `youtu.be/<id>` short
/// links and `youtube.com/watch?v=<id>`. Anything else, including URLs
/// that fail to parse, is returned unchanged.
pub fn embed_url(url: &str) -> String {
    if url.contains("youtube.com/embed") {
        return url.to_string();
    }

    if let Some((_, rest)) = url.split_once("youtu.be/") {
        let id = rest.split(['?', '&']).next().unwrap_or_default();
        if !id.is_empty() {
            return format!("{}{}", EMBED_BASE, id);
        }
    }

    if is_youtube_url(url) {
        if let Ok(parsed) = Url::parse(url) {
            if let Some((_, v)) = parsed.query_pairs().find(|(k, _)| k == "v") {
                return format!("{}{}", EMBED_BASE, v);
            }
        }
    }

    url.to_string()
}

//! Link extraction and display shaping
//!
//! The remote service answers in loosely structured text, so this
//! module holds the one contract worth testing in isolation: pull
//! absolute HTTP(S) URLs out of free text, excluding any that point
//! back at the search engine's own domain, and shape the survivors for
//! display.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::automation::RetrievedItem;

/// How many path characters the shortened display form keeps
const DISPLAY_PATH_CHARS: usize = 15;

/// A link ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultLink {
    /// Display label: a provided title or the positional fallback
    /// ("Result N")
    pub label: String,
    /// Full, unshortened target URL
    pub url: String,
}

impl ResultLink {
    /// Positional fallback label for the `position`-th result
    /// (1-based).
    pub fn fallback_label(position: usize) -> String {
        format!("Result {position}")
    }
}

/// Returns true for absolute `http://` or `https://` URLs.
pub fn is_absolute_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

/// Returns true when `url` is hosted on `domain` or a subdomain of it.
///
/// Comparison is by host, not by substring, so `notgoogle.example.com`
/// does not match `google.com`.
pub fn is_on_domain(url: &str, domain: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    let domain = domain.to_ascii_lowercase();
    host == domain || host.ends_with(&format!(".{domain}"))
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"https?://[^\s<>"')\]]+"#).expect("URL pattern is valid")
    })
}

/// Extract absolute URLs from free text, excluding `excluded_domain`.
///
/// Candidates are matched anywhere in the text, including mid-sentence,
/// and stripped of trailing punctuation before validation. Order of
/// appearance is preserved and duplicates are kept (callers decide
/// whether repetition matters).
pub fn urls_from_text(text: &str, excluded_domain: &str) -> Vec<String> {
    url_pattern()
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?']))
        .filter(|candidate| is_absolute_url(candidate))
        .filter(|candidate| !is_on_domain(candidate, excluded_domain))
        .map(str::to_string)
        .collect()
}

/// First qualifying URL in `text`, if any.
pub fn first_url_from_text(text: &str, excluded_domain: &str) -> Option<String> {
    urls_from_text(text, excluded_domain).into_iter().next()
}

/// Build result links from structured retrieve items.
///
/// Items without a URL are dropped; items without a title get the
/// positional fallback label. At most `limit` links are returned.
pub fn links_from_items(items: &[RetrievedItem], limit: usize) -> Vec<ResultLink> {
    items
        .iter()
        .filter_map(|item| item.url.clone().filter(|u| is_absolute_url(u)).map(|url| (item, url)))
        .take(limit)
        .enumerate()
        .map(|(idx, (item, url))| ResultLink {
            label: item
                .title
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| ResultLink::fallback_label(idx + 1)),
            url,
        })
        .collect()
}

/// Shortened display form of a URL: host plus the first fifteen path
/// characters, with an ellipsis when the path was truncated.
///
/// Unparseable URLs come back unchanged; the full URL always remains
/// the link target.
pub fn shorten_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let Some(host) = parsed.host_str() else {
        return url.to_string();
    };
    let path = parsed.path();
    if path.chars().count() > DISPLAY_PATH_CHARS {
        let head: String = path.chars().take(DISPLAY_PATH_CHARS).collect();
        format!("{host}{head}...")
    } else {
        format!("{host}{path}")
    }
}

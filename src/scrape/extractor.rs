//! HTML-to-post extraction heuristics
//!
//! Parses one hashtag listing document into structured post records. The
//! site's markup changes frequently, so everything here is layered and
//! defensive:
//! - Candidate discovery tries structural selectors first, then a
//!   platform-specific attribute fallback.
//! - Per-candidate extraction never aborts the page; a candidate that
//!   cannot be parsed is logged and skipped.
//! - Counter extraction scans a fixed text window around engagement
//!   keywords and keeps the largest parsable number.
//!
//! These heuristics are explicitly best-effort; synthetic documents matching
//! their expectations are used for offline testing.

use crate::content::{clean_content, compute_total_engagement, safe_int};
use chrono::{Local, TimeZone};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use url::{Position, Url};

/// Class names that mark a post's main text container
const CONTENT_CLASS_MARKERS: [&str; 2] = ["userContent", "ecm0bbzt"];

/// Keywords scanned for each engagement counter
const LIKE_KEYWORDS: [&str; 2] = ["like", "reaction"];
const COMMENT_KEYWORDS: [&str; 1] = ["comment"];
const SHARE_KEYWORDS: [&str; 1] = ["share"];
const VIEW_KEYWORDS: [&str; 1] = ["view"];

/// Characters of context scanned around a matched counter keyword
const STAT_WINDOW_BEFORE: usize = 10;
const STAT_WINDOW_AFTER: usize = 20;

/// Kind of media attached to a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Text,
    Photo,
    Video,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Text => write!(f, "text"),
            MediaType::Photo => write!(f, "photo"),
            MediaType::Video => write!(f, "video"),
        }
    }
}

/// One structured post record extracted from a listing page
///
/// Immutable once constructed. `total_engagement` is always the floored sum
/// of the four counters.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Absolute post URL; empty when no anchor was found
    pub permalink: String,

    /// Normalized post text, at most 10,000 characters
    pub content: String,

    /// Detected media kind
    pub media_type: MediaType,

    pub like_count: i64,
    pub comment_count: i64,
    pub share_count: i64,

    /// Derived: like + comment + share + views, floored at zero
    pub total_engagement: i64,

    pub video_views_count: i64,

    /// Normalized timestamp string; empty when nothing date-like was found
    pub date: String,
}

/// Extracts post records from hashtag listing HTML
///
/// Holds the canonical site origin and bare domain derived from the
/// configured base URL, used to absolutize permalinks.
#[derive(Debug, Clone)]
pub struct PostExtractor {
    origin: String,
    domain: String,
}

impl PostExtractor {
    /// Creates an extractor for the site the given base URL points at
    ///
    /// # Arguments
    ///
    /// * `base_url` - The hashtag listing base URL from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(PostExtractor)` - Origin and domain derived successfully
    /// * `Err(url::ParseError)` - Base URL is unparsable or host-less
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(base_url)?;
        let host = url.host_str().ok_or(url::ParseError::EmptyHost)?;

        // scheme://host[:port], no path
        let origin = url[..Position::BeforePath].to_string();
        let domain = host.strip_prefix("www.").unwrap_or(host).to_string();

        Ok(Self { origin, domain })
    }

    /// Parses one HTML document into zero or more post records
    ///
    /// Candidate discovery is layered, first non-empty layer wins:
    /// 1. Semantic `article` elements or any element with `role="article"`
    /// 2. Fallback: `div` elements carrying a `data-ft` post marker
    ///
    /// Records are returned in document order. A candidate that fails
    /// extraction is skipped; it never aborts the page.
    pub fn extract_posts(&self, html: &str) -> Vec<Post> {
        let document = Html::parse_document(html);

        let mut candidates: Vec<ElementRef> = Vec::new();
        if let Ok(selector) = Selector::parse(r#"article, [role="article"]"#) {
            candidates = document.select(&selector).collect();
        }
        if candidates.is_empty() {
            if let Ok(selector) = Selector::parse("div[data-ft]") {
                candidates = document.select(&selector).collect();
            }
        }

        let mut posts = Vec::new();
        for node in candidates {
            match self.parse_candidate(node) {
                Some(post) => posts.push(post),
                None => tracing::debug!("Skipping weak post candidate"),
            }
        }

        posts
    }

    /// Extracts one candidate node into a post record
    ///
    /// Returns `None` when the candidate carries neither content nor a
    /// permalink — too weak a signal to be a real post.
    fn parse_candidate(&self, node: ElementRef) -> Option<Post> {
        let permalink = self.extract_permalink(node);
        let content = self.extract_content(node);

        if content.is_empty() && permalink.is_empty() {
            return None;
        }

        let media_type = detect_media_type(node);

        let text = flatten_text(node).to_lowercase();
        let like_count = extract_stat(&text, &LIKE_KEYWORDS);
        let comment_count = extract_stat(&text, &COMMENT_KEYWORDS);
        let share_count = extract_stat(&text, &SHARE_KEYWORDS);
        let video_views_count = extract_stat(&text, &VIEW_KEYWORDS);

        let total_engagement =
            compute_total_engagement(like_count, comment_count, share_count, video_views_count);

        let date = extract_date(node);

        Some(Post {
            permalink,
            content,
            media_type,
            like_count,
            comment_count,
            share_count,
            total_engagement,
            video_views_count,
            date,
        })
    }

    /// Takes the href of the first anchor inside the candidate
    ///
    /// An href already mentioning the site domain is used as-is; anything
    /// else gets the canonical origin prepended. No anchor means an empty
    /// permalink.
    fn extract_permalink(&self, node: ElementRef) -> String {
        if let Ok(selector) = Selector::parse("a[href]") {
            if let Some(link) = node.select(&selector).next() {
                if let Some(href) = link.value().attr("href") {
                    if href.contains(&self.domain) {
                        return href.to_string();
                    }
                    return format!("{}{}", self.origin, href);
                }
            }
        }
        String::new()
    }

    /// Collects the candidate's post text
    ///
    /// Scans descendant `div`s carrying a known content-container class and
    /// joins their visible text; falls back to the candidate's own full
    /// visible text when no marker matches. The joined text is run through
    /// the normalizer.
    fn extract_content(&self, node: ElementRef) -> String {
        let mut blocks: Vec<String> = Vec::new();

        for marker in CONTENT_CLASS_MARKERS {
            if let Ok(selector) = Selector::parse(&format!("div.{}", marker)) {
                for div in node.select(&selector) {
                    let text = flatten_text(div);
                    if !text.is_empty() {
                        blocks.push(text);
                    }
                }
            }
        }

        if blocks.is_empty() {
            let text = flatten_text(node);
            if !text.is_empty() {
                blocks.push(text);
            }
        }

        clean_content(&blocks.join(" "))
    }
}

/// Joins an element's descendant text nodes with single spaces
fn flatten_text(node: ElementRef) -> String {
    node.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Guesses the media type from nested elements, first match wins
fn detect_media_type(node: ElementRef) -> MediaType {
    for (tag, media) in [("video", MediaType::Video), ("img", MediaType::Photo)] {
        if let Ok(selector) = Selector::parse(tag) {
            if node.select(&selector).next().is_some() {
                return media;
            }
        }
    }
    MediaType::Text
}

/// Extracts a numeric stat by scanning text near matching keywords
///
/// For every keyword, a fixed window around its first occurrence (10 chars
/// before, 20 after) is tokenized and each token run through `safe_int`;
/// the maximum value seen wins. Keeping the maximum instead of the first
/// hit defends against the keyword itself or adjacent tokens parsing to 0.
/// An absent keyword contributes 0.
fn extract_stat(text: &str, keywords: &[&str]) -> i64 {
    let mut candidate_value = 0;

    for keyword in keywords {
        let Some(idx) = text.find(keyword) else {
            continue;
        };

        let window = char_window(text, idx, STAT_WINDOW_BEFORE, STAT_WINDOW_AFTER);
        for token in window.split_whitespace() {
            let value = safe_int(token);
            if value > candidate_value {
                candidate_value = value;
            }
        }
    }

    candidate_value
}

/// Slices a window of `before`/`after` characters around a byte offset,
/// never splitting a UTF-8 code point
fn char_window(text: &str, at: usize, before: usize, after: usize) -> &str {
    let start = text[..at]
        .char_indices()
        .rev()
        .take(before)
        .last()
        .map_or(at, |(i, _)| i);

    let end = text[at..]
        .char_indices()
        .nth(after)
        .map_or(text.len(), |(i, _)| at + i);

    &text[start..end]
}

/// Extracts a normalized date string from the candidate
///
/// Prefers an `abbr` element carrying a `data-utime` Unix timestamp
/// (formatted as local `YYYY-MM-DD HH:MM:SS`), then falls back to the
/// first `time` or `abbr` element's `title` attribute, then its visible
/// text. Nothing found means an empty string.
fn extract_date(node: ElementRef) -> String {
    if let Ok(selector) = Selector::parse("abbr[data-utime]") {
        if let Some(abbr) = node.select(&selector).next() {
            if let Some(raw) = abbr.value().attr("data-utime") {
                if let Ok(ts) = raw.trim().parse::<i64>() {
                    if let Some(datetime) = Local.timestamp_opt(ts, 0).single() {
                        return datetime.format("%Y-%m-%d %H:%M:%S").to_string();
                    }
                }
            }
        }
    }

    for tag in ["time", "abbr"] {
        if let Ok(selector) = Selector::parse(tag) {
            if let Some(element) = node.select(&selector).next() {
                if let Some(title) = element.value().attr("title") {
                    let title = title.trim();
                    if !title.is_empty() {
                        return title.to_string();
                    }
                }
                let text = flatten_text(element);
                if !text.is_empty() {
                    return text;
                }
            }
        }
    }

    String::new()
}

//! Content normalization utilities
//!
//! Pure text/number helpers shared by the extraction pipeline:
//! - Control-character stripping and whitespace collapsing
//! - Tolerant parsing of shorthand counters ("1.2K", "3,456")
//! - Engagement summation with defensive flooring
//!
//! Every function here is total: arbitrary input yields a defined output,
//! never an error.

/// Maximum length of normalized post content, in characters
const MAX_CONTENT_LEN: usize = 10_000;

/// Normalizes post text.
///
/// - Removes ASCII control characters (0x00-0x08, 0x0B-0x0C, 0x0E-0x1F).
///   Tab, LF, and CR are kept so the whitespace collapse sees them.
/// - Collapses all whitespace runs to a single space and trims.
/// - Truncates to 10,000 characters.
///
/// Idempotent: cleaning already-clean text changes nothing.
///
/// # Example
///
/// ```
/// use tagsift::content::clean_content;
///
/// assert_eq!(clean_content("Hello \x00 \t world\n"), "Hello world");
/// ```
pub fn clean_content(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| !is_stripped_control(*c)).collect();

    let mut cleaned: String = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.chars().count() > MAX_CONTENT_LEN {
        tracing::debug!(
            "Truncating overly long content from {} to {} chars",
            cleaned.chars().count(),
            MAX_CONTENT_LEN
        );
        cleaned = cleaned.chars().take(MAX_CONTENT_LEN).collect();
        // The cut can expose a trailing space; trim it so cleaning stays idempotent.
        cleaned.truncate(cleaned.trim_end().len());
    }

    cleaned
}

/// Returns true for control characters removed by [`clean_content`]
fn is_stripped_control(c: char) -> bool {
    matches!(c, '\x00'..='\x08' | '\x0B' | '\x0C' | '\x0E'..='\x1F')
}

/// Parses an integer from loose counter text like "1.2K", "3,456", or "789".
///
/// Recognizes a trailing `k`/`m` shorthand suffix (case-insensitive) as a
/// x1,000 / x1,000,000 multiplier, ignores every character that is not a
/// digit or decimal point, and truncates fractional results. Non-parsable
/// input yields 0; this function never fails.
pub fn safe_int(value: &str) -> i64 {
    let s = value.trim().to_lowercase();
    if s.is_empty() {
        return 0;
    }

    let (s, multiplier) = if let Some(rest) = s.strip_suffix('k') {
        (rest, 1_000i64)
    } else if let Some(rest) = s.strip_suffix('m') {
        (rest, 1_000_000i64)
    } else {
        (s.as_str(), 1i64)
    };

    // Remove commas and other non-digit, non-dot chars
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return 0;
    }

    if cleaned.contains('.') {
        cleaned
            .parse::<f64>()
            .map(|n| (n * multiplier as f64) as i64)
            .unwrap_or(0)
    } else {
        cleaned
            .parse::<i64>()
            .map(|n| n.saturating_mul(multiplier))
            .unwrap_or(0)
    }
}

/// Sums the four engagement counters, flooring the result at zero.
///
/// The floor guards against corrupt upstream data producing a negative
/// total; individual counters are already non-negative in practice.
pub fn compute_total_engagement(
    like_count: i64,
    comment_count: i64,
    share_count: i64,
    video_views_count: i64,
) -> i64 {
    let total = like_count
        .saturating_add(comment_count)
        .saturating_add(share_count)
        .saturating_add(video_views_count);

    if total < 0 {
        tracing::debug!("Computed negative engagement ({}); coercing to zero", total);
        return 0;
    }
    total
}

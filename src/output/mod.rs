//! Output module for exporting scraped posts and run summaries
//!
//! The core pipeline only returns an in-memory list of posts; this module
//! is the collaborator that writes that list to disk and summarizes a run
//! for the CLI.

use crate::scrape::{MediaType, Post};
use crate::Result;
use std::path::Path;

/// Writes the scraped posts to a file as pretty-printed JSON
///
/// # Arguments
///
/// * `posts` - The accumulated post records of one run
/// * `path` - Destination file path (overwritten if present)
pub fn write_json(posts: &[Post], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(posts)?;
    std::fs::write(path, json)?;
    tracing::info!("Wrote {} posts to {}", posts.len(), path.display());
    Ok(())
}

/// Aggregate numbers for one scrape run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeStats {
    pub total_posts: usize,
    pub text_posts: usize,
    pub photo_posts: usize,
    pub video_posts: usize,
    pub total_engagement: i64,
}

/// Summarizes a run's post records
pub fn summarize(posts: &[Post]) -> ScrapeStats {
    let mut stats = ScrapeStats {
        total_posts: posts.len(),
        text_posts: 0,
        photo_posts: 0,
        video_posts: 0,
        total_engagement: 0,
    };

    for post in posts {
        match post.media_type {
            MediaType::Text => stats.text_posts += 1,
            MediaType::Photo => stats.photo_posts += 1,
            MediaType::Video => stats.video_posts += 1,
        }
        stats.total_engagement = stats.total_engagement.saturating_add(post.total_engagement);
    }

    stats
}

impl std::fmt::Display for ScrapeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Posts scraped:    {}", self.total_posts)?;
        writeln!(
            f,
            "By media type:    text {} / photo {} / video {}",
            self.text_posts, self.photo_posts, self.video_posts
        )?;
        write!(f, "Total engagement: {}", self.total_engagement)
    }
}

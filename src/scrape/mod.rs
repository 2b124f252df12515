//! Scraping pipeline
//!
//! This module contains the core fetch-and-parse pipeline:
//! - HTTP fetching with retry, backoff, and identity/proxy rotation
//! - HTML-to-post extraction heuristics
//! - Pagination over the hashtag listing with early-stop conditions

mod extractor;
mod fetcher;
mod paginator;

pub use extractor::{MediaType, Post, PostExtractor};
pub use fetcher::{build_http_client, fetch_page};
pub use paginator::{scrape_hashtag, HashtagScraper};

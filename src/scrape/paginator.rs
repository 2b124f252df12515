//! Pagination controller
//!
//! Drives the whole pipeline: builds page URLs, invokes the fetcher and the
//! extractor for up to `max_pages` pages, paces between requests, and stops
//! early when a page yields no HTML or no posts. Pages are processed
//! strictly sequentially; the only blocking points are the bounded GET and
//! the deliberate pacing/backoff sleeps.

use crate::config::{Config, ScraperConfig};
use crate::rotate::{IdentityRotator, ProxyRotator};
use crate::scrape::extractor::{Post, PostExtractor};
use crate::scrape::fetcher::fetch_page;
use crate::TagsiftError;
use std::time::Duration;
use url::form_urlencoded;

/// Walks the listing pages of one hashtag and accumulates post records
pub struct HashtagScraper {
    hashtag: String,
    max_pages: u32,
    settings: ScraperConfig,
    extractor: PostExtractor,
    identities: IdentityRotator,
    proxies: ProxyRotator,
}

impl HashtagScraper {
    /// Creates a scraper for one hashtag
    ///
    /// # Arguments
    ///
    /// * `hashtag` - Hashtag to scrape; a leading `#` is stripped
    /// * `max_pages` - Upper bound on listing pages to walk
    /// * `config` - Full configuration (fetch settings, identity/proxy pools)
    ///
    /// # Returns
    ///
    /// * `Ok(HashtagScraper)` - Ready to run
    /// * `Err(TagsiftError)` - The configured base URL is unusable
    pub fn new(hashtag: &str, max_pages: u32, config: &Config) -> Result<Self, TagsiftError> {
        let extractor = PostExtractor::new(&config.scraper.base_url)?;

        Ok(Self {
            hashtag: hashtag.trim_start_matches('#').to_string(),
            max_pages,
            settings: config.scraper.clone(),
            extractor,
            identities: IdentityRotator::new(config.identity.user_agents.clone()),
            proxies: ProxyRotator::from_endpoints(&config.proxy.endpoints),
        })
    }

    /// Runs the pagination loop and returns all extracted posts in order
    ///
    /// Early-stop conditions, neither of which is an error:
    /// - A page yields no HTML after all retries (end of availability or
    ///   unrecoverable failure)
    /// - A page yields HTML but zero posts (no more content)
    pub async fn run(&mut self) -> Vec<Post> {
        let mut all_posts = Vec::new();

        for page in 1..=self.max_pages {
            let url = self.build_page_url(page);
            tracing::info!("Fetching page {}: {}", page, url);

            let Some(html) =
                fetch_page(&url, &self.settings, &mut self.identities, &mut self.proxies).await
            else {
                tracing::warn!("No HTML returned for page {}; stopping", page);
                break;
            };

            let page_posts = self.extractor.extract_posts(&html);
            tracing::info!("Parsed {} posts from page {}", page_posts.len(), page);

            if page_posts.is_empty() {
                // No more posts found, stop early
                break;
            }

            all_posts.extend(page_posts);

            tokio::time::sleep(Duration::from_secs_f64(self.settings.sleep_between_requests))
                .await;
        }

        all_posts
    }

    /// Builds the listing URL for one page
    ///
    /// Page 1 is the base URL plus the form-urlencoded hashtag; later pages
    /// append a `page=N` query. Deterministic for a given hashtag and page.
    pub fn build_page_url(&self, page: u32) -> String {
        let encoded: String = form_urlencoded::byte_serialize(self.hashtag.as_bytes()).collect();
        if page <= 1 {
            format!("{}{}", self.settings.base_url, encoded)
        } else {
            format!("{}{}?page={}", self.settings.base_url, encoded, page)
        }
    }
}

/// Scrapes one hashtag end to end
///
/// The single entry point over the whole pipeline: given a hashtag, a page
/// bound, and a configuration bundle, returns the accumulated ordered post
/// records across all processed pages.
pub async fn scrape_hashtag(
    hashtag: &str,
    max_pages: u32,
    config: &Config,
) -> Result<Vec<Post>, TagsiftError> {
    let mut scraper = HashtagScraper::new(hashtag, max_pages, config)?;
    Ok(scraper.run().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IdentityConfig, OutputConfig, ProxyPoolConfig, ScraperConfig};

    fn test_config() -> Config {
        Config {
            scraper: ScraperConfig {
                base_url: "https://www.example.com/hashtag/".to_string(),
                max_pages: 5,
                request_timeout: 15,
                sleep_between_requests: 0.0,
                max_retries: 3,
                backoff_factor: 0.0,
            },
            identity: IdentityConfig::default(),
            proxy: ProxyPoolConfig::default(),
            output: OutputConfig::default(),
        }
    }

    #[test]
    fn test_page_one_omits_page_query() {
        let scraper = HashtagScraper::new("rust", 5, &test_config()).unwrap();
        assert_eq!(
            scraper.build_page_url(1),
            "https://www.example.com/hashtag/rust"
        );
    }

    #[test]
    fn test_later_pages_carry_page_query() {
        let scraper = HashtagScraper::new("rust", 5, &test_config()).unwrap();
        assert_eq!(
            scraper.build_page_url(2),
            "https://www.example.com/hashtag/rust?page=2"
        );
        assert_eq!(
            scraper.build_page_url(7),
            "https://www.example.com/hashtag/rust?page=7"
        );
    }

    #[test]
    fn test_leading_hash_is_stripped() {
        let scraper = HashtagScraper::new("#rust", 5, &test_config()).unwrap();
        assert_eq!(
            scraper.build_page_url(1),
            "https://www.example.com/hashtag/rust"
        );
    }

    #[test]
    fn test_special_characters_are_encoded() {
        let scraper = HashtagScraper::new("rust lang", 5, &test_config()).unwrap();
        assert_eq!(
            scraper.build_page_url(1),
            "https://www.example.com/hashtag/rust+lang"
        );

        let scraper = HashtagScraper::new("c++", 5, &test_config()).unwrap();
        assert_eq!(
            scraper.build_page_url(2),
            "https://www.example.com/hashtag/c%2B%2B?page=2"
        );
    }

    #[test]
    fn test_url_builder_is_deterministic() {
        let scraper = HashtagScraper::new("café", 5, &test_config()).unwrap();
        assert_eq!(scraper.build_page_url(3), scraper.build_page_url(3));
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        let mut config = test_config();
        config.scraper.base_url = "not a url at all".to_string();
        assert!(HashtagScraper::new("rust", 5, &config).is_err());
    }

    // The pagination loop itself is exercised against a mock server in
    // tests/scrape_tests.rs
}

//! Integration tests for the scraping pipeline
//!
//! These tests use wiremock to stand in for the hashtag listing site and
//! exercise the fetch/retry/pagination behavior end to end.

use tagsift::config::{Config, IdentityConfig, OutputConfig, ProxyPoolConfig, ScraperConfig};
use tagsift::rotate::{IdentityRotator, ProxyRotator};
use tagsift::scrape::{fetch_page, scrape_hashtag, MediaType};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a configuration pointed at the mock server, with timings zeroed
/// so tests run fast
fn test_config(server_uri: &str, max_retries: u32) -> Config {
    Config {
        scraper: ScraperConfig {
            base_url: format!("{}/hashtag/", server_uri),
            max_pages: 5,
            request_timeout: 5,
            sleep_between_requests: 0.0,
            max_retries,
            backoff_factor: 0.0,
        },
        identity: IdentityConfig::default(),
        proxy: ProxyPoolConfig::default(),
        output: OutputConfig::default(),
    }
}

/// One synthetic post candidate in the site's expected markup
fn article(id: u32, text: &str) -> String {
    format!(
        r#"<article><a href="/story/{}">permalink</a><div class="userContent">{}</div></article>"#,
        id, text
    )
}

/// Wraps candidates into a full listing page
fn listing_page(articles: &[String]) -> String {
    format!("<html><body>{}</body></html>", articles.join("\n"))
}

#[tokio::test]
async fn scrape_stops_when_a_page_fetch_fails() {
    let server = MockServer::start().await;

    // Pages 2 and 3 match on their query parameter; the query-less page 1
    // mock catches everything else, so its expectation also proves that no
    // page beyond 3 was ever requested.
    Mock::given(method("GET"))
        .and(path("/hashtag/rust"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&[article(3, "page two post")])),
        )
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    // Page 3 always fails; two attempts (max_retries) and the run stops
    Mock::given(method("GET"))
        .and(path("/hashtag/rust"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hashtag/rust"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[
            article(1, "page one first"),
            article(2, "page one second"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 2);
    let posts = scrape_hashtag("rust", 5, &config).await.unwrap();

    let contents: Vec<&str> = posts.iter().map(|p| p.content.as_str()).collect();
    assert_eq!(
        contents,
        vec!["page one first", "page one second", "page two post"]
    );
}

#[tokio::test]
async fn scrape_stops_when_a_page_has_no_posts() {
    let server = MockServer::start().await;

    // A page with no recognizable candidates; the expectation of exactly
    // one request proves the run stopped without trying page 2
    Mock::given(method("GET"))
        .and(path("/hashtag/rust"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>nothing recognizable</p></body></html>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 2);
    let posts = scrape_hashtag("rust", 5, &config).await.unwrap();

    assert!(posts.is_empty());
}

#[tokio::test]
async fn fetch_retries_transient_failures_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hashtag/rust"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .with_priority(1)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hashtag/rust"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered body"))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 3);
    let url = format!("{}/hashtag/rust", server.uri());
    let mut identities = IdentityRotator::new(vec![]);
    let mut proxies = ProxyRotator::new(vec![]);

    let body = fetch_page(&url, &config.scraper, &mut identities, &mut proxies).await;
    assert_eq!(body.as_deref(), Some("recovered body"));
}

#[tokio::test]
async fn fetch_gives_up_after_exhausting_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hashtag/rust"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 3);
    let url = format!("{}/hashtag/rust", server.uri());
    let mut identities = IdentityRotator::new(vec![]);
    let mut proxies = ProxyRotator::new(vec![]);

    let body = fetch_page(&url, &config.scraper, &mut identities, &mut proxies).await;
    assert!(body.is_none());
}

#[tokio::test]
async fn identity_rotates_between_attempts() {
    let server = MockServer::start().await;

    // First attempt carries the first identity and fails; the retry must
    // carry the second identity (rotation is not attempt-sticky)
    Mock::given(method("GET"))
        .and(path("/hashtag/rust"))
        .and(header("user-agent", "agent-one"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hashtag/rust"))
        .and(header("user-agent", "agent-two"))
        .respond_with(ResponseTemplate::new(200).set_body_string("rotated"))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 2);
    let url = format!("{}/hashtag/rust", server.uri());
    let mut identities =
        IdentityRotator::new(vec!["agent-one".to_string(), "agent-two".to_string()]);
    let mut proxies = ProxyRotator::new(vec![]);

    let body = fetch_page(&url, &config.scraper, &mut identities, &mut proxies).await;
    assert_eq!(body.as_deref(), Some("rotated"));
}

#[tokio::test]
async fn scrape_extracts_full_post_records() {
    let server = MockServer::start().await;

    let page_one = format!(
        "<html><body>{}</body></html>",
        r#"
        <article>
            <a href="/story/99">permalink</a>
            <div class="userContent">Hello  world</div>
            <img src="/photo.jpg" />
            <span>5 likes aaaaaaaaaaaaaaaaaaaa 7 comments bbbbbbbbbbbbbbbbbbbb
            2 shares cccccccccccccccccccc 1.2k views</span>
            <time title="May 5, 2024">2h</time>
        </article>
        "#
    );

    Mock::given(method("GET"))
        .and(path("/hashtag/rust"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body></body></html>"),
        )
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hashtag/rust"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_one))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), 2);
    let posts = scrape_hashtag("#rust", 5, &config).await.unwrap();

    assert_eq!(posts.len(), 1);
    let post = &posts[0];
    assert_eq!(post.permalink, format!("{}/story/99", server.uri()));
    assert_eq!(post.content, "Hello world");
    assert_eq!(post.media_type, MediaType::Photo);
    assert_eq!(post.like_count, 5);
    assert_eq!(post.comment_count, 7);
    assert_eq!(post.share_count, 2);
    assert_eq!(post.video_views_count, 1200);
    assert_eq!(post.total_engagement, 1214);
    assert_eq!(post.date, "May 5, 2024");
}

//! Page Extractor — fetches one company page and distils a bounded text excerpt.
//!
//! Extraction never fails outward. Any fetch, status, content-type or decode
//! problem is folded into a fallback sentence that tells the model to work from
//! the URL alone.

use std::time::Duration;

use reqwest::{header, Client};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, info, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Paragraphs considered for the body excerpt.
pub const MAX_PARAGRAPHS: usize = 20;
/// Character budget for the joined paragraph excerpt.
pub const PARAGRAPH_BUDGET: usize = 4000;
/// Characters kept from each keyword-matched element.
pub const SNIPPET_LEN: usize = 200;
/// Hard cap on the final excerpt, applied after keyword snippets are appended.
pub const MAX_EXTRACT_LEN: usize = 8000;
/// Bytes of the page body read before the rest is dropped.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Lowercase terms that mark an element as worth quoting.
pub const KEYWORDS: &[&str] = &[
    "security",
    "compliance",
    "cloud",
    "saas",
    "it team",
    "data protection",
    "cybersecurity",
    "managed services",
    "technology",
    "careers",
    "about us",
];

#[derive(Debug, Error)]
enum FetchError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("Expected HTML content, got {0}")]
    NotHtml(String),
}

#[derive(Clone)]
pub struct PageExtractor {
    client: Client,
}

impl PageExtractor {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Returns the excerpt for `url`, or the URL-only fallback sentence.
    pub async fn extract(&self, url: &str) -> String {
        info!("Attempting to scrape: {url}");
        match self.fetch_html(url).await {
            Ok(html) => {
                let text = extract_text(&html);
                info!("Scraping successful for {url}, {} chars", text.chars().count());
                text
            }
            Err(e) => {
                warn!("Scraping error for {url}: {e}");
                fallback_text(url, &e.to_string())
            }
        }
    }

    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, ACCEPT)
            .header(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !is_html_media_type(&content_type) {
            let shown = if content_type.is_empty() {
                "no content type".to_string()
            } else {
                content_type
            };
            return Err(FetchError::NotHtml(shown));
        }

        read_capped(response, MAX_BODY_BYTES).await
    }
}

/// Reads the body chunk by chunk, stopping once `limit` bytes are buffered.
async fn read_capped(mut response: reqwest::Response, limit: usize) -> Result<String, FetchError> {
    let mut body: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let room = limit - body.len();
        if chunk.len() >= room {
            body.extend_from_slice(&chunk[..room]);
            debug!("Page body exceeded {limit} bytes, truncated");
            break;
        }
        body.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&body).into_owned())
}

pub fn fallback_text(url: &str, reason: &str) -> String {
    format!(
        "Scraping failed for {url}. Error: {reason}. Proceeding with analysis based on URL only."
    )
}

fn is_html_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "text/html" || essence == "application/xhtml+xml"
}

/// Builds the excerpt from raw HTML: title, meta description, h1–h3, the paragraph
/// excerpt, then keyword snippets, whitespace-collapsed and capped.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut buffer = String::new();

    buffer.push_str(&select_texts(&document, "title").concat());
    buffer.push('\n');
    buffer.push_str(&meta_description(&document).unwrap_or_default());
    buffer.push('\n');
    buffer.push_str(&select_texts(&document, "h1, h2, h3").join("\n"));
    buffer.push('\n');
    buffer.push_str(&paragraph_excerpt(&document));

    let snippets = keyword_snippets(&document);
    debug!("Matched {} keyword snippets", snippets.len());
    for snippet in snippets {
        buffer.push('\n');
        buffer.push_str(&snippet);
    }

    let collapsed = collapse_whitespace(&buffer);
    truncate_chars(&collapsed, MAX_EXTRACT_LEN).to_string()
}

/// The first `MAX_PARAGRAPHS` paragraphs, newline-joined, cut to `PARAGRAPH_BUDGET` chars.
fn paragraph_excerpt(document: &Html) -> String {
    let paragraphs: Vec<String> = select_texts(document, "p")
        .into_iter()
        .take(MAX_PARAGRAPHS)
        .collect();
    truncate_chars(&paragraphs.join("\n"), PARAGRAPH_BUDGET).to_string()
}

fn keyword_snippets(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("a, p, li") else {
        return Vec::new();
    };
    document
        .select(&selector)
        .map(|el| element_text(&el))
        .filter(|text| {
            let lower = text.to_lowercase();
            KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .map(|text| truncate_chars(&text, SNIPPET_LEN).to_string())
        .collect()
}

fn meta_description(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"meta[name="description"]"#).ok()?;
    document
        .select(&selector)
        .find_map(|el| el.value().attr("content"))
        .map(str::to_string)
}

fn select_texts(document: &Html, css: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };
    document.select(&selector).map(|el| element_text(&el)).collect()
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Prefix of `text` holding at most `max` characters.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SAMPLE_PAGE: &str = r#"
        <html>
          <head>
            <title>Acme Health  Cloud</title>
            <meta name="description" content="Patient data platform for clinics">
          </head>
          <body>
            <h1>Welcome</h1>
            <h2>Our platform</h2>
            <h4>Ignored heading</h4>
            <p>We build scheduling tools.</p>
            <ul><li>HIPAA compliance built in</li><li>Fast onboarding</li></ul>
            <a href="/careers">Careers</a>
          </body>
        </html>"#;

    fn extractor() -> PageExtractor {
        PageExtractor::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_extract_text_orders_sections() {
        let text = extract_text(SAMPLE_PAGE);
        assert!(text.starts_with("Acme Health Cloud Patient data platform for clinics Welcome"));
        assert!(text.contains("Our platform We build scheduling tools."));
        assert!(!text.contains("Ignored heading"));
    }

    #[test]
    fn test_extract_text_appends_keyword_snippets() {
        let text = extract_text(SAMPLE_PAGE);
        assert!(text.contains("HIPAA compliance built in"));
        // "Careers" matches case-insensitively
        assert!(text.ends_with("Careers"));
        assert!(!text.contains("Fast onboarding"));
    }

    #[test]
    fn test_extract_text_collapses_whitespace() {
        let text = extract_text("<html><body><p>  a \n\n\t b  </p></body></html>");
        assert_eq!(text, "a b");
    }

    #[test]
    fn test_missing_meta_description_adds_nothing() {
        let text = extract_text("<html><head><title>T</title></head><body></body></html>");
        assert_eq!(text, "T");
    }

    #[test]
    fn test_paragraph_excerpt_is_capped() {
        let long = "x".repeat(900);
        let body: String = (0..30).map(|_| format!("<p>{long}</p>")).collect();
        let document = Html::parse_document(&format!("<html><body>{body}</body></html>"));
        let excerpt = paragraph_excerpt(&document);
        assert_eq!(excerpt.chars().count(), PARAGRAPH_BUDGET);
    }

    #[test]
    fn test_only_first_twenty_paragraphs_count() {
        let body: String = (0..25).map(|i| format!("<p>para{i}</p>")).collect();
        let document = Html::parse_document(&format!("<html><body>{body}</body></html>"));
        let excerpt = paragraph_excerpt(&document);
        assert!(excerpt.contains("para19"));
        assert!(!excerpt.contains("para20"));
    }

    #[test]
    fn test_overall_cap_applies_after_snippets() {
        let filler = "security ".repeat(30);
        let body: String = (0..200).map(|_| format!("<li>{filler}</li>")).collect();
        let text = extract_text(&format!("<html><body>{body}</body></html>"));
        assert_eq!(text.chars().count(), MAX_EXTRACT_LEN);
    }

    #[test]
    fn test_truncate_chars_respects_multibyte() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn test_html_media_types() {
        assert!(is_html_media_type("text/html; charset=utf-8"));
        assert!(is_html_media_type("application/xhtml+xml"));
        assert!(!is_html_media_type("application/json"));
        assert!(!is_html_media_type(""));
    }

    #[tokio::test]
    async fn test_extract_fetches_with_browser_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(header_eq("user-agent", USER_AGENT))
            .and(header_eq("accept", ACCEPT))
            .and(header_eq("accept-language", ACCEPT_LANGUAGE))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(SAMPLE_PAGE, "text/html; charset=utf-8"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let text = extractor().extract(&format!("{}/", server.uri())).await;
        assert!(text.starts_with("Acme Health Cloud"));
    }

    #[tokio::test]
    async fn test_non_success_status_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let text = extractor().extract(&server.uri()).await;
        assert!(text.contains("HTTP status 404"));
        assert!(text.contains("based on URL only"));
    }

    #[tokio::test]
    async fn test_non_html_content_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
            .mount(&server)
            .await;

        let text = extractor().extract(&server.uri()).await;
        assert!(text.contains("Expected HTML content, got application/json"));
        assert!(text.contains("based on URL only"));
    }

    #[tokio::test]
    async fn test_slow_page_times_out_to_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(SAMPLE_PAGE, "text/html")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let slow = PageExtractor::new(Duration::from_secs(1)).unwrap();
        let text = slow.extract(&server.uri()).await;
        assert!(text.starts_with("Scraping failed for"));
        assert!(text.contains("based on URL only"));
        assert!(!text.contains("Acme Health"));
    }

    #[tokio::test]
    async fn test_oversized_body_is_cut_at_byte_limit() {
        let padding = "x".repeat(MAX_BODY_BYTES + 1024);
        let page = format!(
            "<html><head><title>Big</title></head><body><!--{padding}--><p>late marker</p></body></html>"
        );
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(page, "text/html"))
            .mount(&server)
            .await;

        let text = extractor().extract(&server.uri()).await;
        assert!(text.starts_with("Big"));
        assert!(!text.contains("late marker"));
    }

    #[tokio::test]
    async fn test_network_failure_falls_back() {
        // Nothing listens on port 1
        let text = extractor().extract("http://127.0.0.1:1/").await;
        assert!(text.starts_with("Scraping failed for http://127.0.0.1:1/"));
        assert!(text.contains("based on URL only"));
    }
}

//! Web scraping module for content extraction.
//!
//! Uses reqwest for fetching and scraper for HTML parsing.

use lazy_static::lazy_static;
use reqwest::Client;
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, info};

/// User-Agent string identifying this scraper
const USER_AGENT: &str = concat!("resumo/", env!("CARGO_PKG_VERSION"));

lazy_static! {
    static ref PARAGRAPH: Selector = Selector::parse("p").expect("static selector");
    static ref TITLE: Selector = Selector::parse("title").expect("static selector");
    static ref H1: Selector = Selector::parse("h1").expect("static selector");
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),
}

/// Extracted content from a webpage
#[derive(Debug, Clone)]
pub struct WebContent {
    /// Page title
    pub title: Option<String>,
    /// Paragraph text, one paragraph per line
    pub text: String,
}

/// Create a configured HTTP client for scraping
fn create_client() -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(USER_AGENT).build()
}

/// Fetch a page and extract its paragraph text.
///
/// One GET, no retries. The response status is not checked: whatever HTML
/// comes back is parsed.
pub async fn fetch_content(url: &str) -> Result<WebContent, ScraperError> {
    let client = create_client()?;

    info!(url, "fetching page");
    let response = client.get(url).send().await?;
    debug!(status = %response.status(), "page fetched");
    let html = response.text().await?;

    Ok(parse_page(&html))
}

/// Parse already-fetched HTML
pub fn parse_page(html: &str) -> WebContent {
    let document = Html::parse_document(html);

    WebContent {
        title: extract_title(&document),
        text: extract_paragraphs(&document),
    }
}

/// Extract the page title from <title> or <h1>
fn extract_title(document: &Html) -> Option<String> {
    [&*TITLE, &*H1].into_iter().find_map(|selector| {
        document
            .select(selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|title| !title.is_empty())
    })
}

/// Join the text of every `<p>` element with newlines, in document order
pub fn extract_paragraphs(document: &Html) -> String {
    document
        .select(&PARAGRAPH)
        .map(|element| element.text().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

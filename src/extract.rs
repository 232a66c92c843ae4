use std::path::PathBuf;
use std::time::Duration;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::models::{ContentSnapshot, Heading, HeadingLevel, ImageRecord};

// ── Lazy static selectors ────────────────────────────────────────────────────

static TITLE_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());

static HEADING_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());

static PARAGRAPH_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

static IMAGE_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("{0}")]
    InvalidUrl(String),
    #[error("upstream returned {0}")]
    Upstream(reqwest::StatusCode),
    #[error("{0}")]
    Request(String),
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ── Document sources ─────────────────────────────────────────────────────────

/// Somewhere raw HTML comes from.
pub trait DocumentSource {
    async fn fetch_document(&self, url: &Url) -> Result<String, ExtractionError>;
}

/// Fetches over HTTP with a single GET. No retries.
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self, ExtractionError> {
        let mut builder = reqwest::ClientBuilder::new().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ExtractionError::Request(e.to_string()))?;
        Ok(Self { client })
    }
}

impl DocumentSource for HttpSource {
    async fn fetch_document(&self, url: &Url) -> Result<String, ExtractionError> {
        tracing::info!(%url, "fetching document");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                ExtractionError::Request(format!("TimeoutError: {}", e))
            } else if e.is_connect() {
                ExtractionError::Request(format!("ConnectError: {}", e))
            } else {
                ExtractionError::Request(format!("RequestError: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Upstream(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExtractionError::Request(e.to_string()))?;
        tracing::debug!(bytes = body.len(), "document received");
        Ok(body)
    }
}

/// Reads a previously saved page from disk and ignores the URL.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for FileSource {
    async fn fetch_document(&self, _url: &Url) -> Result<String, ExtractionError> {
        tracing::info!(path = %self.path.display(), "reading saved document");
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ExtractionError::Read {
                path: self.path.clone(),
                source,
            })
    }
}

// ── URL validation ───────────────────────────────────────────────────────────

pub fn validate_url(url: &str) -> Result<Url, ExtractionError> {
    let parsed = Url::parse(url)
        .map_err(|e| ExtractionError::InvalidUrl(format!("Invalid URL '{}': {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ExtractionError::InvalidUrl(format!(
            "Only http and https URLs are allowed, got '{}'",
            other
        ))),
    }
}

// ── Extraction ───────────────────────────────────────────────────────────────

pub fn extract_snapshot(html: &str) -> ContentSnapshot {
    let document = Html::parse_document(html);
    ContentSnapshot {
        title: extract_title(&document),
        headings: extract_headings(&document),
        paragraphs: extract_paragraphs(&document),
        images: extract_images(&document),
        links: Vec::new(),
    }
}

/// Text of every `<title>` in document order, concatenated. Inline SVG titles count.
pub fn extract_title(document: &Html) -> String {
    document.select(&TITLE_SEL).map(flattened_text).collect()
}

pub fn extract_headings(document: &Html) -> Vec<Heading> {
    document
        .select(&HEADING_SEL)
        .filter_map(|el| {
            let level = HeadingLevel::from_tag(el.value().name())?;
            Some(Heading {
                level,
                text: flattened_text(el),
            })
        })
        .collect()
}

/// Paragraph text is kept verbatim, blank entries included.
pub fn extract_paragraphs(document: &Html) -> Vec<String> {
    document.select(&PARAGRAPH_SEL).map(flattened_text).collect()
}

pub fn extract_images(document: &Html) -> Vec<ImageRecord> {
    document
        .select(&IMAGE_SEL)
        .map(|el| ImageRecord {
            src: el.value().attr("src").map(str::to_string),
            alt: el.value().attr("alt").map(str::to_string),
        })
        .collect()
}

// ── DOM utility helpers ──────────────────────────────────────────────────────

/// All descendant text nodes, concatenated. Iterative, so nesting depth is unbounded.
fn flattened_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

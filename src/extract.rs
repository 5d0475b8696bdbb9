//! Article content extraction
//!
//! Fetches a web page and reduces it to plain text for the article
//! create flow: title from page metadata, body from paragraph tags
//! joined by blank lines. There is no readability scoring; pages that
//! render their content with scripts extract poorly and the client
//! offers manual paste instead.

use std::time::Duration;

use scraper::{Html, Selector};
use serde::Serialize;

use crate::text;

/// Fetch timeout
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
/// Desktop browser user agent; some sites serve bots an empty shell
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
/// Excerpt length in chars, matching the article list excerpt
const EXCERPT_CHARS: usize = 280;

/// Extraction error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request timed out fetching {0}")]
    Timeout(String),

    #[error("Could not fetch page: {0}")]
    FetchFailed(String),

    #[error("No readable content found at {0}")]
    NoContent(String),
}

/// Plain-text article pulled out of a web page.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedArticle {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub site_name: String,
    pub original_url: String,
}

/// Fetch `raw_url` and extract a plain-text article from it.
pub async fn extract_article(raw_url: &str) -> Result<ExtractedArticle, ExtractError> {
    let parsed = url::Url::parse(raw_url)
        .map_err(|e| ExtractError::InvalidUrl(format!("{}: {}", raw_url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ExtractError::InvalidUrl(format!(
            "unsupported scheme: {}",
            parsed.scheme()
        )));
    }

    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ExtractError::FetchFailed(e.to_string()))?;

    let response = client.get(parsed.as_str()).send().await.map_err(|e| {
        if e.is_timeout() {
            ExtractError::Timeout(raw_url.to_string())
        } else {
            ExtractError::FetchFailed(e.to_string())
        }
    })?;

    if !response.status().is_success() {
        return Err(ExtractError::FetchFailed(format!(
            "{} returned {}",
            raw_url,
            response.status()
        )));
    }

    let html = response.text().await.map_err(|e| {
        if e.is_timeout() {
            ExtractError::Timeout(raw_url.to_string())
        } else {
            ExtractError::FetchFailed(e.to_string())
        }
    })?;

    let site_name = parsed.host_str().unwrap_or_default().to_string();
    extract_from_html(&html, raw_url, &site_name)
}

/// Extract from already-fetched HTML. Separate from the fetch so tests
/// run on static documents.
fn extract_from_html(
    html: &str,
    original_url: &str,
    site_name: &str,
) -> Result<ExtractedArticle, ExtractError> {
    let document = Html::parse_document(html);

    let title = extract_title(&document).unwrap_or_else(|| "Untitled".to_string());
    let content = extract_paragraphs(&document).join("\n\n");

    if content.trim().is_empty() {
        return Err(ExtractError::NoContent(original_url.to_string()));
    }

    let excerpt_end = EXCERPT_CHARS.min(text::char_len(&content));
    let excerpt = text::slice_chars(&content, 0, excerpt_end)
        .unwrap_or_default()
        .to_string();

    Ok(ExtractedArticle {
        title,
        content,
        excerpt,
        site_name: site_name.to_string(),
        original_url: original_url.to_string(),
    })
}

/// Page title: `og:title` meta, then the first `<h1>`, then `<title>`.
fn extract_title(document: &Html) -> Option<String> {
    if let Ok(selector) = Selector::parse(r#"meta[property="og:title"]"#) {
        if let Some(content) = document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
        {
            let title = content.trim();
            if !title.is_empty() {
                return Some(title.to_string());
            }
        }
    }

    for raw in ["h1", "title"] {
        if let Ok(selector) = Selector::parse(raw) {
            if let Some(element) = document.select(&selector).next() {
                let title = element.text().collect::<String>().trim().to_string();
                if !title.is_empty() {
                    return Some(title);
                }
            }
        }
    }

    None
}

/// Body paragraphs: `article p`, falling back to `main p`, then all `p`.
fn extract_paragraphs(document: &Html) -> Vec<String> {
    for raw in ["article p", "main p", "p"] {
        if let Ok(selector) = Selector::parse(raw) {
            let paragraphs: Vec<String> = document
                .select(&selector)
                .map(|el| el.text().collect::<String>().trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();

            if !paragraphs.is_empty() {
                return paragraphs;
            }
        }
    }

    Vec::new()
}

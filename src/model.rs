use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

/// Backend-owned topic identifier such as `tech` or `sports`.
pub type Category = String;

/// Served when an article has no image or its image fails to load.
pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder.svg";

const NO_SUMMARY: &str = "No summary available";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub source: String,
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: Option<String>,
}

/// Body of `GET /categories/`
#[derive(Debug, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Body of `GET /fetch-articles/`
#[derive(Debug, Deserialize)]
pub struct ArticlesResponse {
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl Article {
    /// Summary, else content, else a fixed notice. Blank fields are skipped.
    pub fn display_text(&self) -> &str {
        non_blank(&self.summary)
            .or_else(|| non_blank(&self.content))
            .unwrap_or(NO_SUMMARY)
    }

    /// Article link, or `#` when the backend sent anything but http(s).
    pub fn link(&self) -> &str {
        if is_web_url(&self.url) {
            &self.url
        } else {
            "#"
        }
    }

    pub fn image_src(&self) -> &str {
        non_blank(&self.image_url)
            .filter(|src| is_web_url(src))
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    pub fn published_date(&self) -> Option<NaiveDate> {
        parse_published(self.published.as_deref()?)
    }

    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }

        self.title.to_lowercase().contains(needle)
            || self
                .summary
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(needle))
            || self
                .content
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(needle))
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

fn is_web_url(raw: &str) -> bool {
    url::Url::parse(raw.trim()).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

/// Feeds hand us RFC 2822 (`Mon, 06 Jan 2025 10:00:00 +0530`), RFC 3339 or
/// bare dates; anything else is not shown.
pub fn parse_published(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// "tech" -> "Tech". Only the first character changes.
pub fn category_label(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

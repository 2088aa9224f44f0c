//! Article Browser: categories, per-category article fetches and an
//! in-memory text filter over the last fetched set.
//!
//! The state machine is synchronous. Network calls happen in [`mount`] and
//! [`switch_category`], which only hold the lock while applying a result.
//! Every fetch carries a [`FetchTicket`]; a response whose ticket is no
//! longer current is dropped, so the latest request wins even when
//! responses arrive out of order.

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::client::{FetchError, NewsClient};
use crate::model::{category_label, Article, Category};

#[derive(Debug, Error, PartialEq)]
pub enum BrowserError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Ties a response to the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    category: Option<Category>,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `None` for the categories request.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

#[derive(Debug, Default)]
pub struct ArticleBrowser {
    categories: Vec<Category>,
    selected: Option<Category>,
    articles: Vec<Article>,
    query: String,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl ArticleBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over as a freshly mounted browser and hand out the ticket for
    /// the categories request.
    pub fn reset(&mut self) -> FetchTicket {
        let generation = self.generation + 1;
        *self = Self {
            generation,
            ..Self::default()
        };
        FetchTicket {
            generation,
            category: None,
        }
    }

    /// Apply the categories response. Returns the ticket for the first
    /// category's article fetch when there is one to make.
    pub fn apply_categories(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<Category>, FetchError>,
    ) -> Option<FetchTicket> {
        if ticket.generation != self.generation {
            debug!("Discarding stale categories response");
            return None;
        }

        match result {
            Ok(categories) => {
                let first = categories.first().cloned()?;
                self.categories = categories;
                self.select_category(&first).ok().flatten()
            }
            Err(e) => {
                warn!("Failed to fetch categories: {}", e);
                self.categories.clear();
                self.error = Some(format!("Failed to fetch categories: {}", e));
                None
            }
        }
    }

    /// Switch to `name` and clear the search text. Returns a ticket when an
    /// article fetch is needed; re-selecting the current category only
    /// clears the query.
    pub fn select_category(&mut self, name: &str) -> Result<Option<FetchTicket>, BrowserError> {
        if !self.categories.iter().any(|c| c == name) {
            return Err(BrowserError::UnknownCategory(name.to_string()));
        }

        self.query.clear();

        if self.selected.as_deref() == Some(name) {
            return Ok(None);
        }

        self.generation += 1;
        self.selected = Some(name.to_string());
        self.articles.clear();
        self.error = None;
        self.loading = true;

        Ok(Some(FetchTicket {
            generation: self.generation,
            category: self.selected.clone(),
        }))
    }

    /// Apply an articles response. Returns `false` when the ticket is stale
    /// and the response was dropped.
    pub fn apply_articles(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<Article>, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation || ticket.category.is_none() {
            return false;
        }

        self.loading = false;
        match result {
            Ok(articles) => {
                self.articles = articles;
                self.error = None;
            }
            Err(e) => {
                warn!(
                    "Failed to fetch articles for '{}': {}",
                    ticket.category().unwrap_or_default(),
                    e
                );
                self.articles.clear();
                self.error = Some(format!("Failed to fetch articles: {}", e));
            }
        }
        true
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn visible_articles(&self) -> Vec<&Article> {
        filter_articles(&self.articles, &self.query)
    }

    pub fn heading(&self) -> String {
        if !self.query.is_empty() {
            format!("Results for \"{}\"", self.query)
        } else if let Some(category) = &self.selected {
            format!("{} News", category_label(category))
        } else {
            "Featured Today".to_string()
        }
    }

    /// Owned snapshot for rendering outside the lock.
    pub fn view(&self) -> BrowserView {
        let categories = self
            .categories
            .iter()
            .map(|name| CategoryChip {
                label: category_label(name),
                href: category_href(name),
                selected: self.selected.as_deref() == Some(name.as_str()),
                name: name.clone(),
            })
            .collect();

        let articles = self.visible_articles().into_iter().map(ArticleCard::from).collect();

        BrowserView {
            categories,
            query: self.query.clone(),
            heading: self.heading(),
            loading: self.loading,
            error: self.error.clone(),
            articles,
        }
    }
}

/// Articles whose title, summary or content contains `query`, ignoring
/// case. An empty query keeps everything.
pub fn filter_articles<'a>(articles: &'a [Article], query: &str) -> Vec<&'a Article> {
    let needle = query.to_lowercase();
    articles.iter().filter(|a| a.matches(&needle)).collect()
}

fn category_href(name: &str) -> String {
    let query = serde_urlencoded::to_string([("name", name)]).unwrap_or_default();
    format!("/daily-nuggets/category?{}", query)
}

#[derive(Debug, Clone)]
pub struct BrowserView {
    pub categories: Vec<CategoryChip>,
    pub query: String,
    pub heading: String,
    pub loading: bool,
    pub error: Option<String>,
    pub articles: Vec<ArticleCard>,
}

#[derive(Debug, Clone)]
pub struct CategoryChip {
    pub name: String,
    pub label: String,
    pub href: String,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct ArticleCard {
    pub title: String,
    pub url: String,
    pub source: String,
    pub published: Option<String>,
    pub image_src: String,
    pub text: String,
}

impl From<&Article> for ArticleCard {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            url: article.link().to_string(),
            source: article.source.clone(),
            published: article
                .published_date()
                .map(|d| d.format("%-d %b %Y").to_string()),
            image_src: article.image_src().to_string(),
            text: article.display_text().to_string(),
        }
    }
}

/// Mount the browser: fetch categories, select the first one and load its
/// articles.
pub async fn mount(browser: &Mutex<ArticleBrowser>, client: &NewsClient, limit: usize) {
    let ticket = browser.lock().await.reset();

    let result = client.fetch_categories().await;
    let next = browser.lock().await.apply_categories(&ticket, result);

    match next {
        Some(ticket) => load_articles(browser, client, ticket, limit).await,
        None => info!("No category selected after mount"),
    }
}

pub async fn switch_category(
    browser: &Mutex<ArticleBrowser>,
    client: &NewsClient,
    name: &str,
    limit: usize,
) -> Result<(), BrowserError> {
    let ticket = browser.lock().await.select_category(name)?;
    if let Some(ticket) = ticket {
        load_articles(browser, client, ticket, limit).await;
    }
    Ok(())
}

async fn load_articles(
    browser: &Mutex<ArticleBrowser>,
    client: &NewsClient,
    ticket: FetchTicket,
    limit: usize,
) {
    let Some(category) = ticket.category() else {
        return;
    };

    let result = client.fetch_articles(category, limit).await;
    if !browser.lock().await.apply_articles(&ticket, result) {
        debug!(
            "Discarding stale articles response for '{}' (generation {})",
            category,
            ticket.generation()
        );
    }
}

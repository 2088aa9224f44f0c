use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tower::ServiceBuilder;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::error;
use uuid::Uuid;

use crate::browser::{self, ArticleBrowser, BrowserError, BrowserView};
use crate::client::NewsClient;
use crate::session::{SessionHandle, SessionStore, SESSION_COOKIE};
use crate::site::{self, Chrome, Faq, Step, FAQS, STEPS};

const HX_REDIRECT: &str = "HX-Redirect";

pub struct AppState {
    pub client: Arc<NewsClient>,
    pub sessions: Arc<SessionStore>,
    pub article_limit: usize,
}

// Template structs
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: Chrome,
    pub topics_row_1: Vec<&'static str>,
    pub topics_row_2: Vec<&'static str>,
}

#[derive(Template)]
#[template(path = "daily_nuggets.html")]
pub struct DailyNuggetsTemplate {
    pub chrome: Chrome,
}

#[derive(Template)]
#[template(path = "browser_panel.html")]
pub struct BrowserPanelTemplate {
    pub view: BrowserView,
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub view: BrowserView,
}

#[derive(Template)]
#[template(path = "how_it_works.html")]
pub struct HowItWorksTemplate {
    pub chrome: Chrome,
    pub steps: &'static [Step],
}

#[derive(Template)]
#[template(path = "faqs.html")]
pub struct FaqsTemplate {
    pub chrome: Chrome,
    pub faqs: &'static [Faq],
}

#[derive(Template)]
#[template(path = "get_started.html")]
pub struct GetStartedTemplate {
    pub chrome: Chrome,
    pub topics: Vec<&'static str>,
}

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                error!("Failed to render template: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template: {}", err),
                )
                    .into_response()
            }
        }
    }
}

// Custom error type. Upstream fetch failures never get here: the browser
// turns them into page content.
pub enum AppError {
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, format!("Error: {}", message)).into_response()
            }
        }
    }
}

impl From<BrowserError> for AppError {
    fn from(err: BrowserError) -> Self {
        AppError::NotFound(err.to_string())
    }
}

/// All page and partial routes. Static files are mounted by the caller.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/daily-nuggets", get(daily_nuggets))
        .route("/daily-nuggets/panel", get(panel))
        .route("/daily-nuggets/category", get(select_category))
        .route("/daily-nuggets/search", get(search))
        .route("/how-it-works", get(how_it_works))
        .route("/faqs", get(faqs))
        .route("/get-started", get(get_started))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

fn session_cookie(id: Uuid) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Resolve the visitor's session, issuing a cookie when a new one starts.
async fn open_session(state: &AppState, jar: CookieJar) -> (CookieJar, SessionHandle) {
    let id = jar
        .get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok());

    let handle = state.sessions.get_or_create(id).await;
    let jar = if handle.created {
        jar.add(session_cookie(handle.id))
    } else {
        jar
    };

    (jar, handle)
}

/// Browser of a live session, without creating one.
async fn existing_browser(state: &AppState, jar: &CookieJar) -> Option<Arc<Mutex<ArticleBrowser>>> {
    let id = jar
        .get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())?;
    state.sessions.get(id).await
}

/// Partials for an unknown or expired session send htmx back to the page,
/// which mounts a fresh browser.
fn redirect_to_page() -> Response {
    (StatusCode::OK, [(HX_REDIRECT, "/daily-nuggets")]).into_response()
}

// Route handlers
pub async fn index() -> impl IntoResponse {
    HtmlTemplate(HomeTemplate {
        chrome: Chrome::new("/"),
        topics_row_1: site::marquee(site::TOPICS_ROW_1),
        topics_row_2: site::marquee(site::TOPICS_ROW_2),
    })
}

/// Page shell only; the browser panel loads itself from `/daily-nuggets/panel`.
pub async fn daily_nuggets() -> impl IntoResponse {
    HtmlTemplate(DailyNuggetsTemplate {
        chrome: Chrome::new("/daily-nuggets"),
    })
}

/// Mount the visitor's browser and render the whole panel.
pub async fn panel(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let (jar, handle) = open_session(&state, jar).await;

    browser::mount(&handle.browser, &state.client, state.article_limit).await;
    let view = handle.browser.lock().await.view();

    (jar, HtmlTemplate(BrowserPanelTemplate { view }))
}

#[derive(Deserialize)]
pub struct CategoryQuery {
    pub name: String,
}

pub async fn select_category(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<CategoryQuery>,
) -> Result<Response, AppError> {
    let Some(browser) = existing_browser(&state, &jar).await else {
        return Ok(redirect_to_page());
    };

    browser::switch_category(&browser, &state.client, &query.name, state.article_limit).await?;
    let view = browser.lock().await.view();

    Ok(HtmlTemplate(BrowserPanelTemplate { view }).into_response())
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<SearchQuery>,
) -> Response {
    let Some(browser) = existing_browser(&state, &jar).await else {
        return redirect_to_page();
    };

    let view = {
        let mut browser = browser.lock().await;
        browser.set_query(&query.q);
        browser.view()
    };

    HtmlTemplate(ResultsTemplate { view }).into_response()
}

pub async fn how_it_works() -> impl IntoResponse {
    HtmlTemplate(HowItWorksTemplate {
        chrome: Chrome::new("/how-it-works"),
        steps: STEPS,
    })
}

pub async fn faqs() -> impl IntoResponse {
    HtmlTemplate(FaqsTemplate {
        chrome: Chrome::new("/faqs"),
        faqs: FAQS,
    })
}

pub async fn get_started() -> impl IntoResponse {
    HtmlTemplate(GetStartedTemplate {
        chrome: Chrome::new("/get-started"),
        topics: site::TOPICS_ROW_1
            .iter()
            .chain(site::TOPICS_ROW_2.iter())
            .copied()
            .collect(),
    })
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}

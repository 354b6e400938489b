//! HTTP server for the site.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Form as FormBody, Query, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::services::ServeDir;

use electromania_site::{AssetPipeline, FormSlot, Notice, Page, PageState, SiteInfo, SiteRenderer};
use electromania_ui::{
    Form, FormError, FormKind, FormValues, Layout, LoggingSubmitHandler, Schema, SubmitHandler,
};

use crate::watcher::{FileWatcher, WatchEvent};
use crate::websocket::{reload_client_script, ReloadHub, ReloadMessage};

/// Client hint carrying the layout viewport width.
pub const VIEWPORT_HINT: &str = "sec-ch-viewport-width";

const RELOAD_ENDPOINT: &str = "/__reload";

const HANDLER_FAILURE: &str = "Something went wrong sending your message. Please try again.";

/// Configuration for the site server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Directory with public files (`images/...`)
    pub public_dir: PathBuf,

    /// Company details
    pub site: SiteInfo,

    /// Watch files and push reloads to the browser
    pub live_reload: bool,

    /// Extra paths to watch in live reload mode
    pub watch: Vec<PathBuf>,

    /// Open browser on start
    pub open: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            public_dir: PathBuf::from("public"),
            site: SiteInfo::default(),
            live_reload: false,
            watch: Vec::new(),
            open: false,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// Shared, read-only server state.
pub struct AppState {
    renderer: SiteRenderer,
    handler: Arc<dyn SubmitHandler>,
    reload: Option<ReloadHub>,
    css: String,
    js: String,
}

impl AppState {
    pub fn new(config: &ServerConfig, handler: Arc<dyn SubmitHandler>) -> Self {
        Self {
            renderer: SiteRenderer::new(config.site.clone(), "/").with_live_reload(config.live_reload),
            handler,
            reload: config.live_reload.then(ReloadHub::new),
            css: AssetPipeline::generate_css(),
            js: AssetPipeline::generate_js(),
        }
    }
}

/// Site server.
pub struct SiteServer {
    config: ServerConfig,
    handler: Arc<dyn SubmitHandler>,
}

impl SiteServer {
    /// Create a server that logs form submissions.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            handler: Arc::new(LoggingSubmitHandler),
        }
    }

    /// Replace the form submission handler.
    pub fn with_handler(mut self, handler: Arc<dyn SubmitHandler>) -> Self {
        self.handler = handler;
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router without binding.
    pub fn router(&self) -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::new(&self.config, Arc::clone(&self.handler)));
        (build_router(Arc::clone(&state), &self.config), state)
    }

    /// Bind and serve until the process stops.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ServerError::InvalidAddress(format!("{}:{}", self.config.host, self.config.port))
            })?;

        let (app, state) = self.router();

        if let Some(hub) = state.reload.clone() {
            let mut paths = vec![self.config.public_dir.clone()];
            paths.extend(self.config.watch.iter().cloned());

            let (watcher, mut rx) =
                FileWatcher::new(&paths).map_err(|e| ServerError::WatchError(e.to_string()))?;

            tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    handle_watch_event(&hub, event);
                }
                // Keep watcher alive
                drop(watcher);
            });
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        tracing::info!("Serving {} at http://{}", self.config.site.title, addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            if let Err(e) = open::that(&url) {
                tracing::warn!("Failed to open browser: {}", e);
            }
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let mut app = Router::new()
        .route("/", get(page_handler))
        .route("/about", get(page_handler))
        .route("/contact", get(page_handler).post(contact_handler))
        .route("/subscribe", post(subscribe_handler))
        .route("/assets/main.css", get(css_handler))
        .route("/assets/main.js", get(js_handler));

    if state.reload.is_some() {
        app = app
            .route(RELOAD_ENDPOINT, get(ws_handler))
            .route("/__reload.js", get(reload_script_handler));
    }

    app.nest_service("/images", ServeDir::new(config.public_dir.join("images")))
        .fallback(page_handler)
        .with_state(state)
}

fn handle_watch_event(hub: &ReloadHub, event: WatchEvent) {
    match &event {
        WatchEvent::ConfigChanged(path) => {
            tracing::warn!("{} changed; restart the server to apply it", path.display());
        }
        WatchEvent::PublicChanged(path) => tracing::info!("Changed: {}", path.display()),
        WatchEvent::PublicRemoved(path) => tracing::info!("Removed: {}", path.display()),
    }

    hub.send(ReloadMessage::Reload {
        path: Some(event.path().display().to_string()),
    });
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// `open` renders the mobile menu expanded
    pub menu: Option<String>,
}

/// Resolve the layout from the viewport width client hint.
pub fn layout_from_headers(headers: &HeaderMap) -> Layout {
    let width = headers
        .get(VIEWPORT_HINT)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|w| w.is_finite() && *w >= 0.0)
        .map(|w| w as u32);
    Layout::from_hint(width)
}

/// Handler for GET pages and unknown routes.
pub async fn page_handler(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    let page = Page::from_path(uri.path());
    let mut ui = PageState {
        layout: layout_from_headers(&headers),
        ..PageState::default()
    };
    if query.menu.as_deref() == Some("open") {
        ui.navbar.toggle();
    }

    let status = if page == Page::NotFound {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    render(&state, page, &ui, status)
}

/// Handler for POST /contact.
pub async fn contact_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    FormBody(fields): FormBody<HashMap<String, String>>,
) -> Response {
    handle_submission(&state, FormKind::Contact, &headers, fields)
}

/// Handler for POST /subscribe.
pub async fn subscribe_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    FormBody(fields): FormBody<HashMap<String, String>>,
) -> Response {
    handle_submission(&state, FormKind::Newsletter, &headers, fields)
}

fn handle_submission(
    state: &AppState,
    kind: FormKind,
    headers: &HeaderMap,
    fields: HashMap<String, String>,
) -> Response {
    let slot = fields
        .get("slot")
        .and_then(|s| FormSlot::parse(s))
        .filter(|slot| slot.kind() == kind)
        .unwrap_or(match kind {
            FormKind::Contact => FormSlot::Contact,
            FormKind::Newsletter => FormSlot::Footer,
        });

    let page = match fields.get("return_to").map(|p| Page::from_path(p)) {
        Some(page) if slot != FormSlot::Contact && page != Page::NotFound => page,
        _ => match slot {
            FormSlot::Contact => Page::Contact,
            FormSlot::Hero | FormSlot::Footer => Page::Home,
        },
    };

    let values: FormValues = fields.into_iter().collect();
    let mut ui = PageState {
        layout: layout_from_headers(headers),
        ..PageState::default()
    };
    let form = ui.form_mut(slot);
    *form = Form::with_values(Schema::for_kind(kind), values);

    let status = match form.submit(state.handler.as_ref()) {
        Ok(_) => {
            *form = Form::new(Schema::for_kind(kind));
            ui.notice = Some(Notice::success(slot));
            StatusCode::OK
        }
        Err(FormError::Invalid(errors)) => {
            tracing::debug!(form = kind.as_str(), errors = errors.len(), "Submission rejected");
            StatusCode::UNPROCESSABLE_ENTITY
        }
        Err(FormError::Handler(e)) => {
            tracing::error!(
                form = kind.as_str(),
                handler = state.handler.name(),
                "Submit handler failed: {}",
                e
            );
            ui.notice = Some(Notice::failure(slot, HANDLER_FAILURE));
            StatusCode::BAD_GATEWAY
        }
    };

    render(state, page, &ui, status)
}

fn render(state: &AppState, page: Page, ui: &PageState, status: StatusCode) -> Response {
    match state.renderer.render(page, ui) {
        Ok(html) => {
            let mut response = (status, Html(html)).into_response();
            let headers = response.headers_mut();
            headers.insert("accept-ch", HeaderValue::from_static("Sec-CH-Viewport-Width"));
            headers.insert(header::VARY, HeaderValue::from_static("Sec-CH-Viewport-Width"));
            response
        }
        Err(e) => {
            tracing::error!("{}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

async fn css_handler(State(state): State<Arc<AppState>>) -> Response {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], state.css.clone()).into_response()
}

async fn js_handler(State(state): State<Arc<AppState>>) -> Response {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        state.js.clone(),
    )
        .into_response()
}

/// Handler for the live reload WebSocket endpoint.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    match state.reload.clone() {
        Some(hub) => ws.on_upgrade(move |socket| handle_ws(socket, hub)),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn handle_ws(mut socket: WebSocket, hub: ReloadHub) {
    let mut rx = hub.subscribe();

    if send_json(&mut socket, &ReloadMessage::Connected).await.is_err() {
        return;
    }

    while let Ok(msg) = rx.recv().await {
        if send_json(&mut socket, &msg).await.is_err() {
            break;
        }
    }
}

async fn send_json(socket: &mut WebSocket, msg: &ReloadMessage) -> Result<(), ()> {
    let json = serde_json::to_string(msg).map_err(|_| ())?;
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}

async fn reload_script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        reload_client_script(RELOAD_ENDPOINT),
    )
}

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    serve, Json, Router,
};
use minijinja::{path_loader, Environment};
use minijinja_autoreload::AutoReloader;
use serde::Serialize;
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::constants;
use crate::error::SuggestionError;
use crate::models::{NameSuggestion, SuggestionRequest};
use crate::service::SuggestionService;
use crate::session::Step;

#[derive(Serialize)]
struct GenerateNamesResponse {
    names: Vec<NameSuggestion>,
}

// What the index template needs to render one step of the form
#[derive(Serialize)]
struct StepView {
    index: usize,
    field: &'static str,
    label: &'static str,
    hint: Option<&'static str>,
}

// Shared application state
#[derive(Clone)]
pub struct AppState {
    templates: Arc<AutoReloader>,
    service: SuggestionService,
}

impl AppState {
    pub fn new(service: SuggestionService, templates_dir: impl Into<String>) -> Self {
        Self {
            templates: Arc::new(create_minijinja_env(templates_dir.into())),
            service,
        }
    }
}

// Minijinja Environment setup
fn create_minijinja_env(templates_dir: String) -> AutoReloader {
    AutoReloader::new(move |notifier| {
        // Create the loader *inside* the closure
        let mut env = Environment::new();
        env.set_loader(path_loader(&templates_dir));
        notifier.watch_path(&templates_dir, true);
        Ok(env)
    })
}

async fn index_handler(State(state): State<AppState>) -> Response {
    let steps: Vec<StepView> = Step::ALL
        .iter()
        .map(|step| StepView {
            index: step.index(),
            field: step.field(),
            label: step.label(),
            hint: step.hint(),
        })
        .collect();

    // Acquire env, get template, and render within the same block
    let rendered = state.templates.acquire_env().and_then(|env| {
        env.get_template("index.html").and_then(|tmpl| {
            tmpl.render(minijinja::context! {
                title => "Creative Baby Name Finder",
                steps => steps,
                last_step => Step::LAST.index(),
            })
        })
    });

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to get or render template: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("Internal Server Error: {}", e)),
            )
                .into_response()
        }
    }
}

fn failure_response(e: SuggestionError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
        .into_response()
}

async fn generate_names_handler(
    State(state): State<AppState>,
    payload: Result<Json<SuggestionRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Rejected generate-names payload: {}", rejection);
            return failure_response(SuggestionError::GenerationFailed);
        }
    };

    match state.service.suggest(&request).await {
        Ok(names) => Json(GenerateNamesResponse { names }).into_response(),
        Err(e) => failure_response(e),
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Build the application router.
pub fn router(state: AppState, static_dir: &str) -> Router {
    // Serve static files from the configured directory
    let static_files_service = ServeDir::new(static_dir).not_found_service(tower::service_fn(
        |_req: Request<Body>| async {
            Ok::<_, std::convert::Infallible>(
                (StatusCode::NOT_FOUND, "Not Found").into_response(),
            )
        },
    ));

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/generate-names", post(generate_names_handler))
        .nest_service("/static", static_files_service)
        .with_state(state)
        .layer(TraceLayer::new_for_http()) // Add request logging
}

pub async fn start_web_server(port: u16, service: SuggestionService) -> Result<()> {
    let state = AppState::new(service, constants::TEMPLATES_DIR.as_str());
    let app = router(state, constants::STATIC_DIR.as_str());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Web server listening on http://{}", addr);

    // Bind using tokio::net::TcpListener
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind to address {}", addr))?;

    serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")?;

    info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {:?}", e);
        // Keep serving; the process can still be killed.
        std::future::pending::<()>().await;
    }
    info!("Ctrl-C received, initiating shutdown...");
}

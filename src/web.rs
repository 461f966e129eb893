//! Web front end: serves rendered forecast reports over HTTP
//!
//! This layer reads forecast documents from disk and hands them to the
//! report engine; it owns no forecast logic of its own.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Path as UrlPath, State},
    http::StatusCode,
    response::Html,
    routing::get,
};
use chrono::Utc;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

use crate::config::GridcastConfig;
use crate::models::ModelRun;
use crate::render;
use crate::report::{Report, ReportConfig, build_report};

struct AppState {
    config: GridcastConfig,
    report_config: ReportConfig,
}

/// Run the forecast web server until shutdown
pub async fn run(config: GridcastConfig) -> Result<()> {
    let report_config = config.report_config()?;
    let port = config.server.port;
    let state = Arc::new(AppState {
        config,
        report_config,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(latest_page))
        .route("/text", get(text_report))
        .route("/snow", get(snow_page))
        .route("/location/{name}", get(location_block))
        .route("/{hour}", get(hour_page))
        .layer(cors)
        .with_state(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Forecast server running at http://localhost:{port}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Load a forecast document from the configured directory. `hour` selects a
/// specific model cycle; `None` follows the `lastRun` marker.
pub fn load_run(forecast_dir: &Path, hour: Option<&str>) -> Result<ModelRun> {
    let hour = match hour {
        Some(hour) => hour.to_string(),
        None => std::fs::read_to_string(forecast_dir.join("lastRun"))
            .with_context(|| format!("Failed to read lastRun marker in {}", forecast_dir.display()))?
            .trim()
            .to_string(),
    };

    let path = forecast_dir.join(format!("hrrr-{hour}.json"));
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read forecast document {}", path.display()))?;

    Ok(ModelRun::from_json(&text)?)
}

fn build(state: &AppState, hour: Option<&str>) -> Result<(ModelRun, Report)> {
    let run = load_run(Path::new(&state.config.data.forecast_dir), hour)?;
    let report = build_report(&run, &state.report_config, Utc::now())?;
    Ok((run, report))
}

fn page_title(run: &ModelRun, state: &AppState) -> String {
    let issued = run.base_time.with_timezone(&state.report_config.time_zone);
    format!("{} Forecast", issued.format("%m/%d/%Y %-I:%M %p"))
}

fn valid_hour(hour: &str) -> bool {
    !hour.is_empty() && hour.chars().all(|c| c.is_ascii_digit())
}

async fn latest_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, StatusCode> {
    render_html_page(&state, None)
}

async fn hour_page(
    State(state): State<Arc<AppState>>,
    UrlPath(hour): UrlPath<String>,
) -> Result<Html<String>, StatusCode> {
    if !valid_hour(&hour) {
        return Err(StatusCode::NOT_FOUND);
    }
    render_html_page(&state, Some(&hour))
}

fn render_html_page(state: &AppState, hour: Option<&str>) -> Result<Html<String>, StatusCode> {
    let (run, report) = build(state, hour).map_err(|err| {
        error!("report build failed: {err:#}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Html(render::html::render_page(
        &report,
        &page_title(&run, state),
    )))
}

async fn text_report(State(state): State<Arc<AppState>>) -> Result<String, StatusCode> {
    let (_, report) = build(&state, None).map_err(|err| {
        error!("report build failed: {err:#}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(render::text::render(&report))
}

async fn snow_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, StatusCode> {
    let run = load_run(Path::new(&state.config.data.forecast_dir), None).map_err(|err| {
        error!("forecast load failed: {err:#}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Html(render::snow::render_page(
        &run,
        Utc::now(),
        state.report_config.time_zone,
    )))
}

async fn location_block(
    State(state): State<Arc<AppState>>,
    UrlPath(name): UrlPath<String>,
) -> Result<String, StatusCode> {
    if !state.report_config.expose_blocks {
        return Err(StatusCode::NOT_FOUND);
    }

    let (_, report) = build(&state, None).map_err(|err| {
        error!("report build failed: {err:#}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    report
        .block(&name)
        .map(render::text::render_block)
        .ok_or(StatusCode::NOT_FOUND)
}

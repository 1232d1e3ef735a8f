use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{rejection::RawFormRejection, RawForm, RawQuery, State},
    http::StatusCode,
    response::{Html, Redirect},
    routing::get,
    Router,
};
use pokeapi_client::PokeApiClient;
use server_api::{load_pokedex, load_selected, read_form, submit_form, ApiContext, QueryParams};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::PokedexForm,
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod views;

use app_state::AppState;
use config::load_settings;

const MAX_FORM_BYTES: usize = 16 * 1024;

type PageError = (StatusCode, Html<String>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = load_settings();
    let source = PokeApiClient::new(&settings.pokeapi_base_url)?;
    info!(
        base_url = %source.base_url(),
        listing_limit = settings.listing_limit,
        "using upstream pokeapi"
    );
    let api = ApiContext {
        source: Arc::new(source),
        listing_limit: settings.listing_limit,
    };

    let app = build_router(Arc::new(AppState { api }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(pokedex_page).post(submit_pokedex))
        .route("/selected", get(selected_page).post(submit_selected))
        .layer(RequestBodyLimitLayer::new(MAX_FORM_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn pokedex_page(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, PageError> {
    let query = QueryParams::parse(query.as_deref().unwrap_or_default());
    let page = load_pokedex(&state.api, &query).await.map_err(failure)?;
    Ok(Html(views::render_pokedex(&page)))
}

async fn selected_page(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, PageError> {
    let query = QueryParams::parse(query.as_deref().unwrap_or_default());
    let page = load_selected(&state.api, &query).await.map_err(failure)?;
    Ok(Html(views::render_selected(&page)))
}

async fn submit_pokedex(
    RawQuery(query): RawQuery,
    body: Result<RawForm, RawFormRejection>,
) -> Result<Redirect, PageError> {
    redirect_after_submit("/", query, posted_form(body)?)
}

async fn submit_selected(
    RawQuery(query): RawQuery,
    body: Result<RawForm, RawFormRejection>,
) -> Result<Redirect, PageError> {
    redirect_after_submit("/selected", query, posted_form(body)?)
}

/// A body that is not a urlencoded form reads as an empty one; only an
/// unreadable body (too large, aborted) fails the request.
fn posted_form(body: Result<RawForm, RawFormRejection>) -> Result<PokedexForm, PageError> {
    match body {
        Ok(RawForm(bytes)) => Ok(read_form(&String::from_utf8_lossy(&bytes))),
        Err(RawFormRejection::InvalidFormContentType(rejection)) => {
            warn!(%rejection, "form posted without a urlencoded body");
            Ok(PokedexForm::default())
        }
        Err(rejection) => {
            let status = rejection.status();
            warn!(%rejection, %status, "unreadable form body");
            Err((status, Html(views::render_failure("Invalid request"))))
        }
    }
}

fn redirect_after_submit(
    path: &str,
    query: Option<String>,
    form: PokedexForm,
) -> Result<Redirect, PageError> {
    let query = QueryParams::parse(query.as_deref().unwrap_or_default());
    let location = submit_form(path, &query, form).map_err(failure)?;
    Ok(Redirect::to(&location))
}

fn failure(err: ApiError) -> PageError {
    let (status, title) = match err.code {
        ErrorCode::Validation => (StatusCode::BAD_REQUEST, "Invalid request"),
        ErrorCode::NotFound => (StatusCode::NOT_FOUND, "Pokémon not found"),
        ErrorCode::Upstream => (StatusCode::BAD_GATEWAY, "Upstream unavailable"),
        ErrorCode::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
    };
    warn!(code = ?err.code, message = %err.message, %status, "request failed");
    (status, Html(views::render_failure(title)))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;

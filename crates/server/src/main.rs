use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Path, Query, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{
        CaseStudyDetail, CaseStudySummary, ContactRequest, ContactResponse, ProjectDetail,
        ProjectsResponse, SiteResponse, SkillGroupView, TimelineView,
    },
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::{ApiContext, ExperienceQuery, ProjectsQuery};
use app_state::AppState;
use config::{build_outbox, load_catalog, load_settings};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let catalog = load_catalog(&settings)?;
    let outbox = build_outbox(&settings, &catalog)?;
    info!(
        site = %catalog.site().name,
        projects = catalog.projects().len(),
        experiences = catalog.experiences().len(),
        "content ready"
    );

    let state = AppState {
        api: ApiContext {
            catalog: Arc::new(catalog),
            outbox,
        },
        contact_body_limit_bytes: settings.contact_body_limit_bytes,
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let limit = state.contact_body_limit_bytes;
    let contact = Router::new()
        .route("/api/contact", post(http_submit_contact))
        .layer(RequestBodyLimitLayer::new(limit))
        .layer(middleware::map_response(move |response: Response| async move {
            oversized_as_api_error(response, limit)
        }));

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/site", get(http_site))
        .route("/api/projects", get(http_list_projects))
        .route("/api/projects/:slug", get(http_project_detail))
        .route("/api/case-studies", get(http_list_case_studies))
        .route("/api/case-studies/:slug", get(http_case_study_detail))
        .route("/api/experience", get(http_experience))
        .route("/api/skills", get(http_skills))
        .merge(contact)
        .with_state(state)
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorCode::Delivery => StatusCode::BAD_GATEWAY,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(error: ApiError) -> (StatusCode, Json<ApiError>) {
    (status_for(error.code), Json(error))
}

/// Contact payload whose extraction failures come back as `ApiError`.
struct ContactJson(ContactRequest);

#[async_trait]
impl<S> FromRequest<S> for ContactJson
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ApiError>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<ContactRequest>::from_request(req, state).await {
            Ok(Json(body)) => Ok(Self(body)),
            Err(rejection) => Err(reject(body_rejection(&rejection))),
        }
    }
}

fn body_rejection(rejection: &JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(ErrorCode::PayloadTooLarge, rejection.body_text())
    } else {
        ApiError::new(ErrorCode::BadRequest, rejection.body_text())
    }
}

// The limit layer answers a too-large Content-Length before any extractor runs.
fn oversized_as_api_error(response: Response, limit_bytes: usize) -> Response {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .is_some_and(|value| value.as_bytes().starts_with(b"application/json"));
    if response.status() != StatusCode::PAYLOAD_TOO_LARGE || is_json {
        return response;
    }
    reject(ApiError::payload_too_large(limit_bytes)).into_response()
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_site(State(state): State<Arc<AppState>>) -> Json<SiteResponse> {
    Json(api::site_summary(&state.api))
}

async fn http_list_projects(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ProjectsQuery>,
) -> Json<ProjectsResponse> {
    Json(api::list_projects(&state.api, &q))
}

async fn http_project_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<ProjectDetail> {
    api::project_detail(&state.api, &slug)
        .map(Json)
        .map_err(reject)
}

async fn http_list_case_studies(State(state): State<Arc<AppState>>) -> Json<Vec<CaseStudySummary>> {
    Json(api::list_case_studies(&state.api))
}

async fn http_case_study_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<CaseStudyDetail> {
    api::case_study_detail(&state.api, &slug)
        .map(Json)
        .map_err(reject)
}

async fn http_experience(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ExperienceQuery>,
) -> Json<TimelineView> {
    Json(api::experience_timeline(&state.api, &q))
}

async fn http_skills(State(state): State<Arc<AppState>>) -> Json<Vec<SkillGroupView>> {
    Json(api::skill_groups(&state.api))
}

async fn http_submit_contact(
    State(state): State<Arc<AppState>>,
    ContactJson(req): ContactJson,
) -> ApiResult<ContactResponse> {
    api::submit_contact(&state.api, req)
        .await
        .map(Json)
        .map_err(|error| {
            if !matches!(error.code, ErrorCode::Validation) {
                warn!(code = ?error.code, "contact submission failed");
            }
            reject(error)
        })
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;

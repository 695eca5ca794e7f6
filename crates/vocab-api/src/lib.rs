//! # vocab-api
//!
//! HTTP API for the vocabulary backend used by the browser extension.
//!
//! The binary in `main.rs` wires Postgres repositories into [`build_app`];
//! tests wire the in-memory store instead.

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;
pub mod telemetry;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use vocab_core::{PartOfSpeechClassifier, Translator};
use vocab_db::Repositories;

pub use config::{AllowedOrigins, ServerConfig};
pub use error::ApiError;
pub use services::{IntakePipeline, StatsService};

use handlers::{cheatsheets, translate, user, words};

/// Request bodies above this size are rejected with 413.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub intake: IntakePipeline,
    pub stats: StatsService,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        translator: Arc<dyn Translator>,
        classifier: Arc<dyn PartOfSpeechClassifier>,
        translate_timeout: Duration,
    ) -> Self {
        let intake = IntakePipeline::new(
            repos.words.clone(),
            repos.page_visits.clone(),
            translator,
            classifier,
            translate_timeout,
        );
        let stats = StatsService::new(repos.words.clone(), repos.page_visits.clone());
        Self {
            repos,
            intake,
            stats,
        }
    }
}

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vocab API",
        description = "Vocabulary tracking backend for the language-learning browser extension"
    ),
    components(schemas(
        vocab_core::WordEntry,
        vocab_core::Category,
        vocab_core::PartOfSpeech,
        vocab_core::ListWordsResponse,
        vocab_core::Settings,
        vocab_core::UpdateSettingsRequest,
        vocab_core::UserStats,
        vocab_core::ProgressSeries,
        vocab_core::CategoryBreakdown,
        vocab_core::CreateCheatsheetRequest,
        vocab_core::CheatsheetSummary,
        vocab_core::Cheatsheet,
    )),
    tags(
        (name = "Words", description = "Word intake and vocabulary queries"),
        (name = "User", description = "Sync, statistics and settings"),
        (name = "Cheatsheets", description = "Printable word collections"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;

fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let allow_origin = match origins {
        AllowedOrigins::Any => AllowOrigin::any(),
        AllowedOrigins::List(list) => AllowOrigin::list(list.clone()),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Build the application router with all routes and middleware.
pub fn build_app(state: AppState, origins: &AllowedOrigins) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Words
        .route("/api/words", get(words::list_words))
        .route("/api/words/process", post(words::process_words))
        .route("/api/words/known", post(words::mark_known))
        .route("/api/words/review", post(words::add_for_review))
        .route("/api/words/recent", get(words::recent_words))
        .route("/api/words/categories", get(words::category_breakdown))
        .route("/api/words/:id", axum::routing::delete(words::delete_word))
        .route("/api/words/:id/toggle-status", post(words::toggle_status))
        .route("/api/translate", post(translate::translate))
        // User
        .route("/api/user/sync", post(user::sync_known_words))
        .route("/api/user/stats", get(user::get_stats))
        .route("/api/user/progress", get(user::get_progress))
        .route(
            "/api/user/settings",
            get(user::get_settings).put(user::update_settings),
        )
        .route("/api/user/language", post(user::set_language))
        .route("/api/user/data", get(user::get_user_data))
        // Cheatsheets
        .route(
            "/api/cheatsheets",
            get(cheatsheets::list_cheatsheets).post(cheatsheets::create_cheatsheet),
        )
        .route(
            "/api/cheatsheets/:id",
            get(cheatsheets::get_cheatsheet).delete(cheatsheets::delete_cheatsheet),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer(origins))
        .layer(CatchPanicLayer::new())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

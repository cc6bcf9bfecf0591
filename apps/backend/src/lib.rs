pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use flashcard_core::algorithm::score_banded::ScoreBanded;
use flashcard_core::SpacedRepetitionAlgorithm;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::{CardStore, Database};
use crate::services::grader::{Grader, OpenAiJudge};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CardStore>,
    pub grader: Arc<Grader>,
    pub algorithm: Arc<dyn SpacedRepetitionAlgorithm>,
}

impl AppState {
    /// State using the default score-banded scheduler
    pub fn new(store: Arc<dyn CardStore>, grader: Grader) -> Self {
        Self {
            store,
            grader: Arc::new(grader),
            algorithm: Arc::new(ScoreBanded::default()),
        }
    }
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(health_check))
        .route("/insert-card", post(routes::cards::insert))
        .route("/insert-cards", post(routes::cards::insert_many))
        .route("/update-card", post(routes::cards::update))
        .route("/delete-card", post(routes::cards::delete))
        .route("/eval-card", post(routes::eval::evaluate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let rubric = config.load_rubric()?;
    tracing::info!(model = %config.grader_model, "Initializing grader...");
    let grader = Grader::new(Arc::new(OpenAiJudge::from_config(&config)), rubric);

    let state = AppState::new(Arc::new(db), grader);
    let app = router(state);

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

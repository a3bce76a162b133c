//! Gymtrack server entry point: environment, logging, pool, migrations,
//! router, serve.

use anyhow::Result;
use axum::{
    routing::{delete, get, post},
    Router,
};
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gymtrack::config::Config;
use gymtrack::routes::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gymtrack=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting gymtrack server on {}:{}", config.host, config.port);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState {
        pool: pool.clone(),
        jwt_secret: config.jwt_secret.clone(),
    };

    let api_routes = Router::new()
        .route("/health", get(routes::health_check))
        .route("/exercises", get(routes::list_exercises))
        // Routine repository
        .route(
            "/routines",
            get(routes::list_routines).post(routes::create_routine),
        )
        .route(
            "/routines/{id}",
            get(routes::get_routine)
                .patch(routes::update_routine)
                .delete(routes::delete_routine),
        )
        .route(
            "/routines/{id}/assignments",
            get(routes::list_routine_assignments).post(routes::create_assignment),
        )
        .route("/assignments/{id}", delete(routes::delete_assignment))
        // Schedule resolver
        .route("/schedule/week", get(routes::week_schedule))
        .route("/schedule/today", get(routes::today_schedule))
        // Session lifecycle
        .route("/sessions/start", post(routes::start_session))
        .route("/sessions/{id}", get(routes::get_session))
        .route("/sessions/{id}/exercises", post(routes::record_exercise))
        .route("/sessions/{id}/complete", post(routes::complete_session))
        // Progress aggregation
        .route("/history", get(routes::get_history))
        .route("/progress", get(routes::get_progress))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

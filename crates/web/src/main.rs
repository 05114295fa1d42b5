use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod assets;
mod config;
mod error;
mod features;


use assets::AssetStore;
use config::Config;

/// App state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub assets: AssetStore,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        features::events::handlers::list_events,
        features::events::handlers::get_event,
        features::events::handlers::create_event,
        features::events::handlers::update_event,
        features::events::handlers::delete_event,
        features::events::handlers::upload_logo,
        features::participants::handlers::register_participant,
        features::participants::handlers::list_participants,
        features::participants::handlers::update_participant,
        features::participants::handlers::delete_participant,
        features::results::handlers::record_results,
        features::results::handlers::list_results,
        features::results::handlers::delete_results_group,
    ),
    components(
        schemas(
            storage::dto::event::CreateEventRequest,
            storage::dto::event::UpdateEventRequest,
            storage::dto::event::EventResponse,
            storage::dto::participant::RegisterParticipantRequest,
            storage::dto::participant::UpdateParticipantRequest,
            storage::dto::participant::ParticipantResponse,
            storage::dto::result::RecordResultsRequest,
            storage::dto::result::ResultItem,
            storage::dto::result::ResultResponse,
        )
    ),
    tags(
        (name = "events", description = "Event registry endpoints"),
        (name = "participants", description = "Participant registration endpoints"),
        (name = "results", description = "Race result endpoints"),
    )
)]
struct ApiDoc;

fn app(state: AppState) -> Router {
    let assets_root = state.assets.root().to_path_buf();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/events", features::routes())
        .with_state(state)
        .nest_service("/assets", ServeDir::new(assets_root))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .init();

    tracing::info!("Starting event registration API");

    let config = Config::from_env().context("Failed to load API configuration")?;

    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed");

    let state = AppState {
        db,
        assets: AssetStore::new(&config.assets_dir),
    };

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    tracing::info!("Listening on http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    axum::serve(listener, app(state))
        .await
        .context("Server error")?;

    Ok(())
}

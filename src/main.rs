//! Biblion Server - Library Catalog Management System
//!
//! A Rust REST API server for managing a library catalog.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblion_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("biblion_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Biblion Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Initialize Redis connection (session store)
    let redis_service = biblion_server::services::redis::RedisService::new(&config.redis.url)
        .await
        .expect("Failed to connect to Redis");

    tracing::info!("Connected to Redis");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(
        repository,
        config.session.clone(),
        config.registry.clone(),
        redis_service,
    )
    .expect("Failed to create services");

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        .route("/auth/logout", post(api::auth::logout))
        // Books
        .route("/books", get(api::books::list_books))
        .route("/books", post(api::books::create_book))
        .route("/books/:id", get(api::books::get_book))
        .route("/books/:id", put(api::books::update_book))
        .route("/books/:id", delete(api::books::delete_book))
        // Authors
        .route("/authors", get(api::authors::list_authors))
        .route("/authors", post(api::authors::create_author))
        .route("/authors/:id", get(api::authors::get_author))
        .route("/authors/:id", put(api::authors::update_author))
        .route("/authors/:id", delete(api::authors::delete_author))
        // Publishers
        .route("/publishers", get(api::publishers::list_publishers))
        .route("/publishers", post(api::publishers::create_publisher))
        .route("/publishers/:id", get(api::publishers::get_publisher))
        .route("/publishers/:id", put(api::publishers::update_publisher))
        .route("/publishers/:id", delete(api::publishers::delete_publisher))
        // Categories
        .route("/categories", get(api::taxonomies::list_categories))
        .route("/categories", post(api::taxonomies::create_category))
        .route("/categories/:id", get(api::taxonomies::get_category))
        .route("/categories/:id", put(api::taxonomies::update_category))
        .route("/categories/:id", delete(api::taxonomies::delete_category))
        // Languages
        .route("/languages", get(api::taxonomies::list_languages))
        .route("/languages", post(api::taxonomies::create_language))
        .route("/languages/:id", get(api::taxonomies::get_language))
        .route("/languages/:id", put(api::taxonomies::update_language))
        .route("/languages/:id", delete(api::taxonomies::delete_language))
        // Formats
        .route("/formats", get(api::taxonomies::list_formats))
        .route("/formats", post(api::taxonomies::create_format))
        .route("/formats/:id", get(api::taxonomies::get_format))
        .route("/formats/:id", put(api::taxonomies::update_format))
        .route("/formats/:id", delete(api::taxonomies::delete_format))
        // Translators
        .route("/translators", get(api::translators::list_translators))
        .route("/translators", post(api::translators::create_translator))
        .route("/translators/:id", get(api::translators::get_translator))
        .route("/translators/:id", put(api::translators::update_translator))
        .route("/translators/:id", delete(api::translators::delete_translator))
        // Contributor roles
        .route("/roles", get(api::roles::list_roles))
        .route("/roles", post(api::roles::create_role))
        .route("/roles/:id", get(api::roles::get_role))
        .route("/roles/:id", put(api::roles::update_role))
        .route("/roles/:id", delete(api::roles::delete_role))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users", post(api::users::create_user))
        .route("/users/:id", get(api::users::get_user))
        .route("/users/:id", put(api::users::update_user))
        .route("/users/:id", delete(api::users::delete_user))
        // Penalty rules
        .route("/penalty-rules", get(api::penalties::list_penalty_rules))
        .route("/penalty-rules", post(api::penalties::create_penalty_rule))
        .route("/penalty-rules/:id", get(api::penalties::get_penalty_rule))
        .route("/penalty-rules/:id", put(api::penalties::update_penalty_rule))
        .route("/penalty-rules/:id", delete(api::penalties::delete_penalty_rule))
        // Audit trail
        .route("/audit", get(api::audit::list_audit))
        .route("/audit/:id", get(api::audit::get_audit_entry))
        // ISBN registry
        .route("/registry/lookup", get(api::registry::lookup))
        .route("/registry/import", post(api::registry::import))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

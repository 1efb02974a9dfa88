use axum::routing::{delete, get, post};
use axum::Router;
use losthere_match::{api, create_pool, AppConfig, ChatService, StorageService, SubmissionService};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Local-time log format
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    let config = AppConfig::from_env();
    info!("Starting server with config: {:?}", config);

    let pool = create_pool(&config.database.url).await?;
    sqlx::migrate!().run(&pool).await?;
    info!("Database pool created, migrations applied");

    let submissions = Arc::new(SubmissionService::new(
        pool.clone(),
        config.matching.clone(),
    ));
    let chats = Arc::new(ChatService::new(pool.clone()));
    let storage = Arc::new(StorageService::new(pool));

    let report_routes = Router::new()
        .route(
            "/api/reports",
            post(api::submit_report).get(api::list_reports),
        )
        .route("/api/reports/:id", delete(api::delete_report))
        .route("/api/notifications", get(api::list_notifications))
        .with_state(submissions);

    let chat_routes = Router::new()
        .route("/api/reports/:id/chat", post(api::start_chat))
        .route("/api/chats", get(api::list_threads))
        .route("/api/chats/:id", get(api::open_thread))
        .route("/api/chats/:id/messages", post(api::send_message))
        .with_state(chats);

    let storage_routes = Router::new()
        .route("/api/export", get(api::export_data))
        .route("/api/storage/clear", post(api::clear_storage))
        .with_state(storage);

    let app = Router::new()
        .route("/health", get(api::health_check))
        .merge(report_routes)
        .merge(chat_routes)
        .merge(storage_routes)
        .layer(ServiceBuilder::new());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST   /api/reports           - submit a lost/found report");
    info!("  GET    /api/reports           - report history");
    info!("  POST   /api/reports/:id/chat  - start a chat for a matched report");
    info!("  GET    /api/export            - download the data snapshot");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use ats_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let api = Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/api/candidates",
            post(routes::candidate_routes::register_candidate),
        )
        .route(
            "/api/candidates/upload",
            post(routes::candidate_routes::upload_resume),
        )
        .route(
            "/api/candidates/:id",
            get(routes::candidate_routes::get_candidate)
                .put(routes::candidate_routes::update_candidate),
        );

    info!("Serving uploads from: {}", config.uploads_dir);

    let app = api
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(&config.uploads_dir),
        )
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

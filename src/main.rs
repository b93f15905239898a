// Video API Server - CRUD endpoint over a table-backed or in-memory store

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use video_api::{
    app_state::AppState,
    config::Config,
    video_resource::{create_video_router, UpdateMode},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize application state (store backend + resource)
    let app_state = AppState::new(config).await?;

    let video_router = create_video_router(app_state.video_resource.clone());

    // Build main application router
    let app = Router::new()
        .merge(video_router)
        .layer(CorsLayer::permissive());

    // Start server
    let addr = app_state.config.server_address();
    println!("🚀 Video API server starting on http://{}", addr);
    println!("📋 API:");
    println!("  GET    /video/{{video_id}}  - Fetch a video");
    println!("  POST   /video/{{video_id}}  - Create a video");
    match app_state.video_resource.update_mode() {
        UpdateMode::Partial => {
            println!("  PATCH  /video/{{video_id}}  - Update fields of a video")
        }
        UpdateMode::Replace => println!("  PUT    /video/{{video_id}}  - Replace a video"),
    }
    println!("  DELETE /video/{{video_id}}  - Delete a video");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

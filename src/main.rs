use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use std::net::TcpListener;
use todo_server::auth::handlers::{signin, signup};
use todo_server::todos::handlers::{create_todo, get_todo, list_todos, update_todo};
use todo_server::{health_check, not_found, AppError, AppState, Settings};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[actix_web::main]
async fn main() -> todo_server::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();

    // Load configuration
    let config = Settings::new()?;
    info!("Configuration loaded successfully");

    info!("Starting server at {}:{}", config.server.host, config.server.port);

    // Initialize application state
    let state = AppState::new(config.clone()).await?;
    let state = web::Data::new(state);

    // Create and bind TCP listener
    let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))?;

    let workers = config.server.workers as usize;
    let cors_settings = config.cors.clone();
    let server_state = state.clone();

    // Start HTTP server
    HttpServer::new(move || {
        let cors = if cors_settings.enabled {
            let cors_config = Cors::default();

            // Apply specific CORS rules based on configuration
            let cors_config = if cors_settings.allow_any_origin {
                cors_config
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
            } else {
                // More restrictive CORS for production use
                cors_config
                    .allowed_origin("http://localhost:8080")
                    .allowed_origin("http://127.0.0.1:8080")
                    .allowed_methods(vec!["GET", "POST", "PUT"])
                    .allowed_headers(vec!["Authorization", "Content-Type"])
            };

            cors_config.max_age(cors_settings.max_age as usize)
        } else {
            // CORS disabled - use most restrictive settings
            Cors::default()
        };

        App::new()
            .wrap(cors)
            .app_data(server_state.clone())
            .route("/health", web::get().to(health_check))
            .route("/auth/signup", web::post().to(signup))
            .route("/auth/signin", web::post().to(signin))
            .route("/api/todos", web::get().to(list_todos))
            .route("/api/todos", web::post().to(create_todo))
            .route("/api/todos/{id}", web::get().to(get_todo))
            .route("/api/todos/{id}", web::put().to(update_todo))
            .default_service(web::route().to(not_found))
    })
    .listen(listener)?
    .workers(workers)
    .run()
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    state.shutdown().await?;

    Ok(())
}

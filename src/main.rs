mod api;
mod database;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let database_url = env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set");

    log::info!("🚀 Starting Utility Bill Service...");
    log::info!("📊 Database: {}", database_url);

    // Initialize MongoDB connection (pings the store; the process does
    // not serve traffic if this fails)
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");
    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone())
            )
            // Liveness + health check
            .route("/", web::get().to(api::health::index))
            .route("/health", web::get().to(api::health::health_check))
            // Users: create-or-detect only
            .route("/users", web::post().to(api::users::create_user))
            // Recent bills dashboard view
            .route("/recent-bills", web::get().to(api::bills::recent_bills))
            // Bills CRUD
            .service(
                web::scope("/bills")
                    .route("", web::get().to(api::bills::list_bills))
                    .route("", web::post().to(api::bills::create_bill))
                    .route("/{id}", web::get().to(api::bills::get_bill))
                    .route("/{id}", web::put().to(api::bills::update_bill))
                    .route("/{id}", web::delete().to(api::bills::delete_bill))
            )
            // Payments
            .service(
                web::scope("/payments")
                    .route("", web::post().to(api::payments::create_payment))
                    .route("", web::get().to(api::payments::list_payments))
                    .route("/{id}", web::patch().to(api::payments::update_payment))
                    .route("/{id}", web::delete().to(api::payments::delete_payment))
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}

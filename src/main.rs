// src/main.rs
use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, middleware, web};
use anyhow::Context;
use log::info;
use std::sync::Arc;
use std::time::Duration;

mod errors;
mod handlers;
mod models;
mod prompt;
mod services;
mod styles;

use crate::handlers::{cancel_stylize, json_error_handler, stylize};
use crate::services::{ContentAnalyzer, GenerationClient, ImageProcessor, SketchAnalyzer};

const DEFAULT_SPACE_URL: &str = "https://sweetpotatoman-sdxl-turbo-img2img-cpu.hf.space";

// Sketch payloads arrive as inline data URLs, so the JSON limit has to be
// far above the actix default.
const JSON_PAYLOAD_LIMIT: usize = 50 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<dyn ContentAnalyzer>,
    generation: Arc<GenerationClient>,
    image_processor: Arc<ImageProcessor>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting sketch-stylizer service...");

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);
    let space_url =
        std::env::var("GENERATION_SPACE_URL").unwrap_or_else(|_| DEFAULT_SPACE_URL.to_string());
    let timeout_secs: u64 = std::env::var("GENERATION_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(120);
    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());

    let generation = Arc::new(
        GenerationClient::new(space_url, Duration::from_secs(timeout_secs))
            .context("failed to initialize generation client")?,
    );
    let analyzer: Arc<dyn ContentAnalyzer> = Arc::new(SketchAnalyzer::new());
    let image_processor = Arc::new(ImageProcessor::new());

    let app_state = AppState {
        analyzer,
        generation,
        image_processor,
    };

    info!("Starting HTTP server on 0.0.0.0:{port}");

    HttpServer::new(move || {
        let cors = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .fold(
                Cors::default()
                    .allowed_methods(vec!["GET", "POST"])
                    .allow_any_header()
                    .supports_credentials(),
                |cors, origin| cors.allowed_origin(origin),
            );

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(
                web::JsonConfig::default()
                    .limit(JSON_PAYLOAD_LIMIT)
                    .error_handler(json_error_handler),
            )
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api/stylize")
                    .route("", web::post().to(stylize))
                    .route("/cancel", web::post().to(cancel_stylize)),
            )
            .route("/health", web::get().to(health_check))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await?;

    Ok(())
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "sketch-stylizer",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now()
    }))
}

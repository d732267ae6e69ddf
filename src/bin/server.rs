//! animus HTTP server binary.
//!
//! Starts an axum HTTP server exposing character sessions to a chat front
//! end.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `GOOGLE_API_KEY` / `GEMINI_API_KEY` — generation backend credentials
//! - `ANIMUS_MODEL` — generation model id (default: gemini-1.5-pro-latest)
//! - `TTS_URL` — optional speech-synthesis endpoint
//! - `RUST_LOG` — tracing filter (default: "info")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use std::sync::Arc;

use animus::server::{app_router, AppState};
use animus::speech::{HttpSynthesizer, TextToSpeech};
use animus::utilities::config::Settings;
use animus::GeminiClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,animus=debug".into()),
        )
        .init();

    let settings = Settings::from_env();
    if settings.api_key.is_none() {
        tracing::warn!(
            "no GOOGLE_API_KEY/GEMINI_API_KEY set — chat turns will fail until one is configured"
        );
    }

    let generator = Arc::new(GeminiClient::new(
        settings.model.clone(),
        settings.api_key.clone(),
    ));

    let synthesizer: Option<Arc<dyn TextToSpeech>> = settings
        .tts_url
        .as_deref()
        .map(|url| Arc::new(HttpSynthesizer::new(url)) as Arc<dyn TextToSpeech>);
    if synthesizer.is_none() {
        tracing::info!("TTS_URL not set — speech synthesis disabled");
    }

    let state = AppState::new(generator, synthesizer);
    let app = app_router(state);

    let bind_addr = format!("0.0.0.0:{}", settings.port);
    tracing::info!(model = %settings.model, "animus server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health               — liveness probe");
    tracing::info!("  POST /characters           — configure a character session");
    tracing::info!("  GET  /characters/:id       — profile + mood snapshot");
    tracing::info!("  POST /characters/:id/chat  — one conversation turn");
    tracing::info!("  POST /characters/:id/speak — synthesize speech");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server failed");
}

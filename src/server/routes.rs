//! Axum route handlers for the character chat server.
//!
//! Each configured character lives in its own session: one explicitly owned
//! [`AICharacter`] behind a per-session mutex, looked up by id. The lock is
//! held for the whole turn (prompt → generation → memory recording), which
//! serializes concurrent requests against the same character while leaving
//! other sessions untouched.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::character::profile::{CharacterProfile, ProfileConfig};
use crate::character::AICharacter;
use crate::llm::TextGeneration;
use crate::memory::TurnRecord;
use crate::personality::emotion::EmotionalState;
use crate::personality::style::StyleDescriptor;
use crate::speech::{TextToSpeech, VoiceParams};

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Live character sessions, one owned instance each.
    sessions: Arc<DashMap<Uuid, Arc<Mutex<AICharacter>>>>,
    /// The text-generation backend.
    generator: Arc<dyn TextGeneration>,
    /// Optional speech-synthesis engine; `None` disables the speak route.
    synthesizer: Option<Arc<dyn TextToSpeech>>,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn TextGeneration>,
        synthesizer: Option<Arc<dyn TextToSpeech>>,
    ) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            generator,
            synthesizer,
        }
    }

    /// Look up a session's character, cloning the handle out of the map so
    /// no map shard lock is held across an await.
    fn session(&self, id: Uuid) -> Option<Arc<Mutex<AICharacter>>> {
        self.sessions.get(&id).map(|entry| entry.value().clone())
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/characters", post(create_character_handler))
        .route("/characters/:id", get(get_character_handler))
        .route("/characters/:id/chat", post(chat_handler))
        .route("/characters/:id/speak", post(speak_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Response to session creation.
#[derive(Debug, Serialize)]
pub struct CreateCharacterResponse {
    pub session_id: Uuid,
    /// The character's opening line (styled greeting + self-introduction).
    pub greeting: String,
    pub profile: CharacterProfile,
}

/// One conversation turn request.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// One conversation turn response.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The generation backend's reply, verbatim.
    pub reply: String,
    /// Style descriptor for the spoken/greeting layer.
    pub style: StyleDescriptor,
    pub timestamp_ms: i64,
}

/// Profile + mood snapshot for a session.
#[derive(Debug, Serialize)]
pub struct CharacterSnapshot {
    pub profile: CharacterProfile,
    pub emotional_state: EmotionalState,
    pub total_turns: usize,
}

/// Speech-synthesis request.
#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    pub text: String,
}

fn error_json(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(serde_json::json!({ "error": message.into() })))
}

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "animus",
    }))
}

/// POST /characters — validate the configuration and open a session.
async fn create_character_handler(
    State(state): State<AppState>,
    Json(config): Json<ProfileConfig>,
) -> Result<Json<CreateCharacterResponse>, (StatusCode, Json<Value>)> {
    let profile = CharacterProfile::from_config(config)
        .map_err(|e| error_json(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let character = AICharacter::new(profile);
    let greeting = character.initial_greeting();
    let profile = character.profile().clone();

    let session_id = Uuid::new_v4();
    state
        .sessions
        .insert(session_id, Arc::new(Mutex::new(character)));

    tracing::info!(%session_id, name = %profile.name, "character session created");

    Ok(Json(CreateCharacterResponse {
        session_id,
        greeting,
        profile,
    }))
}

/// GET /characters/:id — profile and mood snapshot.
async fn get_character_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CharacterSnapshot>, (StatusCode, Json<Value>)> {
    let session = state
        .session(id)
        .ok_or_else(|| error_json(StatusCode::NOT_FOUND, format!("no session {}", id)))?;

    let character = session.lock().await;
    Ok(Json(CharacterSnapshot {
        profile: character.profile().clone(),
        emotional_state: character.emotional_state(),
        total_turns: character.memory.total_turns(),
    }))
}

/// POST /characters/:id/chat — one conversation turn.
///
/// The per-turn contract, in strict order: assemble the prompt from the
/// character state, call the generation backend (failures propagate as 502
/// without touching memory), then record both sides of the exchange.
async fn chat_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<Value>)> {
    let session = state
        .session(id)
        .ok_or_else(|| error_json(StatusCode::NOT_FOUND, format!("no session {}", id)))?;

    let mut character = session.lock().await;

    let prompt = character.process_interaction(&request.message);
    let reply = state.generator.generate(&prompt).await.map_err(|e| {
        tracing::warn!(%id, error = %e, "generation backend failed");
        error_json(StatusCode::BAD_GATEWAY, e.to_string())
    })?;

    character.memory.add_memory(TurnRecord::user(&request.message));
    character.memory.add_memory(TurnRecord::assistant(&reply));

    let style = character.last_style().clone();

    Ok(Json(ChatResponse {
        reply,
        style,
        timestamp_ms: chrono::Utc::now().timestamp_millis(),
    }))
}

/// POST /characters/:id/speak — synthesize audio for a reply.
async fn speak_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SpeakRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let synthesizer = state.synthesizer.as_ref().ok_or_else(|| {
        error_json(
            StatusCode::SERVICE_UNAVAILABLE,
            "speech synthesis is not configured",
        )
    })?;

    let session = state
        .session(id)
        .ok_or_else(|| error_json(StatusCode::NOT_FOUND, format!("no session {}", id)))?;

    let params = {
        let character = session.lock().await;
        VoiceParams::for_profile(character.profile())
    };

    let audio = synthesizer
        .synthesize(&request.text, &params)
        .await
        .map_err(|e| {
            tracing::warn!(%id, error = %e, "speech synthesis failed");
            error_json(StatusCode::BAD_GATEWAY, e.to_string())
        })?;

    Ok(([(header::CONTENT_TYPE, "audio/wav")], audio))
}

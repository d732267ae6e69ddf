//! HTTP surface for character sessions.
//!
//! Exposes the character engine to a chat front end: configure a character,
//! run conversation turns against it, and optionally synthesize speech.
//!
//! # Endpoints
//!
//! - `GET  /health`               — Liveness probe
//! - `POST /characters`           — Configure a character, open a session
//! - `GET  /characters/:id`       — Profile + mood snapshot
//! - `POST /characters/:id/chat`  — One conversation turn
//! - `POST /characters/:id/speak` — Synthesize speech for a reply

pub mod routes;

pub use routes::{app_router, AppState};

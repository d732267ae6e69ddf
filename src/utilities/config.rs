//! Environment-backed runtime settings for the binaries.

/// Runtime settings, read once at process start.
///
/// All values come from the environment (a `.env` file is loaded first by
/// the binaries):
///
/// - `GOOGLE_API_KEY` / `GEMINI_API_KEY` — generation backend credentials
/// - `ANIMUS_MODEL` — generation model id (default `gemini-1.5-pro-latest`)
/// - `PORT` — HTTP port for the server binary (default 8080)
/// - `TTS_URL` — optional speech-synthesis endpoint; unset disables the
///   speak route
#[derive(Debug, Clone)]
pub struct Settings {
    /// Generation backend API key, if configured.
    pub api_key: Option<String>,
    /// Generation model identifier.
    pub model: String,
    /// HTTP port for the server binary.
    pub port: u16,
    /// Optional speech-synthesis endpoint.
    pub tts_url: Option<String>,
}

/// Default generation model — the one the character chat was built against.
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .ok()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok());
        let model =
            std::env::var("ANIMUS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let tts_url = std::env::var("TTS_URL").ok();

        Self {
            api_key,
            model,
            port,
            tts_url,
        }
    }
}

//! Terminal chat with a character.
//!
//! Configures a character (defaults overridable via environment), prints its
//! opening greeting, then loops: read a line, run the turn against the
//! engine, send the assembled prompt to the generation backend, print the
//! reply, and record both sides of the exchange. `quit` or `exit` leaves.
//!
//! # Environment Variables
//!
//! - `GOOGLE_API_KEY` / `GEMINI_API_KEY` — generation backend credentials
//! - `ANIMUS_MODEL` — generation model id (default: gemini-1.5-pro-latest)
//! - `ANIMUS_NAME` — character name (default: Luna)
//! - `ANIMUS_STYLE` — `casual` or `professional` (default: casual)

use std::collections::HashMap;
use std::io::{BufRead, Write};

use anyhow::Context;

use animus::utilities::config::Settings;
use animus::{
    AICharacter, CharacterProfile, CommunicationStyle, GeminiClient, Gender, ProfileConfig,
    TextGeneration, TurnRecord,
};

fn default_config() -> ProfileConfig {
    let name = std::env::var("ANIMUS_NAME").unwrap_or_else(|_| "Luna".to_string());
    let communication_style = match std::env::var("ANIMUS_STYLE").as_deref() {
        Ok("professional") => CommunicationStyle::Professional,
        _ => CommunicationStyle::Casual,
    };

    let mut personality_traits = HashMap::new();
    personality_traits.insert("openness".to_string(), 0.7);
    personality_traits.insert("conscientiousness".to_string(), 0.8);
    personality_traits.insert("extraversion".to_string(), 0.6);
    personality_traits.insert("agreeableness".to_string(), 0.75);
    personality_traits.insert("neuroticism".to_string(), 0.3);

    ProfileConfig {
        name,
        age: 25,
        gender: Gender::Female,
        interests: vec!["Technology".to_string(), "Science".to_string()],
        communication_style,
        personality_traits,
        speaking_style: HashMap::new(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let settings = Settings::from_env();
    let generator = GeminiClient::new(settings.model.clone(), settings.api_key.clone());

    let profile =
        CharacterProfile::from_config(default_config()).context("invalid character profile")?;
    let name = profile.name.clone();
    let mut character = AICharacter::new(profile);

    println!("{}: {}", name, character.initial_greeting());
    println!("(type 'quit' to leave)\n");

    let stdin = std::io::stdin();
    loop {
        print!("you: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "quit" | "exit") {
            break;
        }

        let prompt = character.process_interaction(input);
        match generator.generate(&prompt).await {
            Ok(reply) => {
                println!("{}: {}\n", name, reply);
                character.memory.add_memory(TurnRecord::user(input));
                character.memory.add_memory(TurnRecord::assistant(&reply));
            }
            Err(e) => {
                // Backend failures are surfaced and the turn is not
                // recorded; the conversation can simply continue.
                eprintln!("[generation failed: {}]\n", e);
            }
        }
    }

    let state = character.emotional_state();
    println!(
        "\n{} signing off (mood v={:.2} a={:.2} d={:.2}, {} turns remembered)",
        name,
        state.valence,
        state.arousal,
        state.dominance,
        character.memory.total_turns(),
    );
    Ok(())
}

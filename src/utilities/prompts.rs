//! Prompt rendering for character interactions.
//!
//! Prompts are assembled from the template slices in the embedded phrase
//! catalog and interpolated with `{placeholder}` replacement. Rendering is
//! deterministic: the same profile, context, and input always produce the
//! same prompt.

use crate::character::profile::CharacterProfile;
use crate::phrases::phrases;

/// Render the outbound generation prompt for one user turn.
///
/// Embeds the character identity (name, age, gender, background,
/// communication style), the recent-context summary, the interest list, and
/// the verbatim user input, with stay-in-character instructions. Always
/// non-empty.
pub fn interaction_prompt(
    profile: &CharacterProfile,
    context: &str,
    user_input: &str,
) -> String {
    let catalog = phrases();
    let template = [
        catalog.slice("identity"),
        catalog.slice("guidelines"),
        catalog.slice("task"),
    ]
    .concat();

    interpolate(&template, profile)
        .replace("{context}", context)
        .replace("{user_input}", user_input)
}

/// Render the character's self-introduction line from a styled greeting.
pub fn introduction_line(profile: &CharacterProfile, greeting: &str) -> String {
    phrases()
        .slice("introduction")
        .replace("{greeting}", greeting)
        .replace("{name}", &profile.name)
}

/// Replace the profile-derived placeholders in a template.
fn interpolate(template: &str, profile: &CharacterProfile) -> String {
    template
        .replace("{name}", &profile.name)
        .replace("{age}", &profile.age.to_string())
        .replace("{gender}", profile.gender.as_str())
        .replace("{background}", &profile.background)
        .replace("{style}", profile.communication_style.as_str())
        .replace("{interests}", &profile.interests.join(", "))
}

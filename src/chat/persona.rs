// Role-play system prompt for a chat participant

use once_cell::sync::Lazy;
use regex::Regex;

static PERSONA_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)You are (.+?) in a WhatsApp conversation")
        .expect("persona pattern is a valid regex")
});

/// System instruction asking the model to answer as `sender`, in their voice.
pub fn system_prompt(sender: &str) -> String {
    format!(
        "You are {sender} in a WhatsApp conversation. \
         Respond naturally in {sender}'s communication style and personality. \
         Keep responses conversational and match the tone of the chat."
    )
}

/// Recover the participant name from a system prompt built by [`system_prompt`].
pub fn participant_from_prompt(prompt: &str) -> Option<String> {
    PERSONA_PATTERN
        .captures(prompt)
        .map(|c| c[1].trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Drop a leading `"{sender}: "` the model sometimes echoes back.
pub fn strip_speaker_prefix<'a>(reply: &'a str, sender: &str) -> &'a str {
    let prefix = format!("{}: ", sender);
    reply.strip_prefix(prefix.as_str()).unwrap_or(reply)
}

// Participant discovery from a written dataset

use serde_json::Value;

use crate::chat::participant_from_prompt;

/// Unique participant names found in the system messages of parsed JSONL
/// records, in first-seen order. Records without a usable system message
/// are ignored.
pub fn extract_participants(records: &[Value]) -> Vec<String> {
    let mut participants: Vec<String> = Vec::new();

    for record in records {
        let Some(messages) = record.get("messages").and_then(Value::as_array) else {
            continue;
        };

        let name = messages
            .iter()
            .find(|m| m.get("role").and_then(Value::as_str) == Some("system"))
            .and_then(|m| m.get("content").and_then(Value::as_str))
            .and_then(participant_from_prompt);

        if let Some(name) = name {
            if !participants.contains(&name) {
                participants.push(name);
            }
        }
    }

    participants
}

// Training example construction from consecutive chat lines
//
// Every adjacent pair (i, i+1) becomes one system/user/assistant triple:
// line i is what the user said, line i+1 is what the assistant should answer.

use serde::{Deserialize, Serialize};

use super::line::ChatLine;
use super::persona::system_prompt;
use crate::config::constants::DEFAULT_SKIP_MARKER;

/// Speaker role inside a fine-tuning example
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role/content entry of an example
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleMessage {
    pub role: Role,
    pub content: String,
}

/// A single supervised fine-tuning example.
///
/// Built only by [`ExampleBuilder`], which always produces exactly three
/// messages in system → user → assistant order with non-empty content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FineTuneExample {
    pub messages: Vec<ExampleMessage>,
}

impl FineTuneExample {
    fn new(system: String, user: String, assistant: String) -> Self {
        Self {
            messages: vec![
                ExampleMessage { role: Role::System, content: system },
                ExampleMessage { role: Role::User, content: user },
                ExampleMessage { role: Role::Assistant, content: assistant },
            ],
        }
    }

    fn content_of(&self, role: Role) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == role)
            .map(|m| m.content.as_str())
    }

    pub fn system(&self) -> Option<&str> {
        self.content_of(Role::System)
    }

    pub fn user(&self) -> Option<&str> {
        self.content_of(Role::User)
    }

    pub fn assistant(&self) -> Option<&str> {
        self.content_of(Role::Assistant)
    }
}

/// Counts from one build pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Adjacent pairs examined (N - 1, or 0)
    pub pairs: usize,
    pub emitted: usize,
    pub skipped: usize,
}

/// Pairs adjacent chat lines into training examples, skipping media placeholders
#[derive(Debug, Clone)]
pub struct ExampleBuilder {
    /// Lowercased placeholder markers
    skip_markers: Vec<String>,
}

impl Default for ExampleBuilder {
    fn default() -> Self {
        Self::new([DEFAULT_SKIP_MARKER])
    }
}

impl ExampleBuilder {
    /// Create a builder that drops any pair touching one of `markers`
    /// (case-insensitive substring match).
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            skip_markers: markers
                .into_iter()
                .map(|m| m.as_ref().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// True when a message carries no usable text
    pub fn is_skippable(&self, message: &str) -> bool {
        if message.is_empty() {
            return true;
        }
        let lowered = message.to_lowercase();
        self.skip_markers.iter().any(|m| lowered.contains(m.as_str()))
    }

    pub fn build(&self, lines: &[ChatLine]) -> Vec<FineTuneExample> {
        self.build_with_stats(lines).0
    }

    pub fn build_with_stats(&self, lines: &[ChatLine]) -> (Vec<FineTuneExample>, BuildStats) {
        let mut stats = BuildStats::default();
        let mut examples = Vec::with_capacity(lines.len().saturating_sub(1));

        for pair in lines.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            stats.pairs += 1;

            if self.is_skippable(&current.message) || self.is_skippable(&next.message) {
                stats.skipped += 1;
                continue;
            }

            examples.push(FineTuneExample::new(
                system_prompt(&next.sender),
                format!("{}: {}", current.sender, current.message),
                next.message.clone(),
            ));
            stats.emitted += 1;
        }

        tracing::debug!(
            pairs = stats.pairs,
            emitted = stats.emitted,
            skipped = stats.skipped,
            "Built training examples"
        );

        (examples, stats)
    }
}

// Chat export line parser
//
// Turns WhatsApp-style export lines like
//   [26/07/23, 09:58:53] John Doe: Hello there
// into structured ChatLine records. Anything else is dropped.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Bracketed date, bracketed time, sender up to the first colon, then the rest.
/// Digits are ASCII only; `\d` would also accept other scripts' digits.
static LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[([0-9]{2}/[0-9]{2}/[0-9]{2}),\s([0-9]{2}:[0-9]{2}:[0-9]{2})\]\s([^:]+):\s(.+)$")
        .expect("line pattern is a valid regex")
});

const TIMESTAMP_FORMAT: &str = "%d/%m/%y %H:%M:%S";

/// One parsed, timestamped, attributed line from the source conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLine {
    pub date: String,
    pub time: String,
    pub sender: String,
    pub message: String,
}

impl ChatLine {
    /// Combined date and time, if the export holds a real calendar date
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let combined = format!("{} {}", self.date, self.time);
        NaiveDateTime::parse_from_str(&combined, TIMESTAMP_FORMAT).ok()
    }
}

/// Parse a single physical line. Returns `None` when the line doesn't have
/// the `[date, time] sender: message` shape.
pub fn parse_line(line: &str) -> Option<ChatLine> {
    let captures = LINE_PATTERN.captures(line.trim())?;

    Some(ChatLine {
        date: captures[1].to_string(),
        time: captures[2].to_string(),
        sender: captures[3].to_string(),
        message: captures[4].to_string(),
    })
}

/// Parse a whole export, keeping source order.
///
/// Continuation lines of wrapped messages carry no prefix, so they fail to
/// match and are dropped along with headers and blank lines.
pub fn parse_export(text: &str) -> Vec<ChatLine> {
    text.split('\n')
        .enumerate()
        .filter_map(|(index, line)| {
            let parsed = parse_line(line);
            if parsed.is_none() && !line.trim().is_empty() {
                tracing::trace!(line = index + 1, "Dropping unparsable chat line");
            }
            parsed
        })
        .collect()
}

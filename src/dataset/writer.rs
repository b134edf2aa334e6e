// JSONL dataset writer

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::chat::FineTuneExample;

/// Render examples as JSONL: one `{"messages": [...]}` object per line,
/// newline separated, no trailing newline.
pub fn to_jsonl(examples: &[FineTuneExample]) -> Result<String> {
    let lines = examples
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to serialize training example")?;

    Ok(lines.join("\n"))
}

/// Write the whole dataset with a single write, replacing any previous file.
pub fn write_dataset(examples: &[FineTuneExample], path: &Path) -> Result<()> {
    let contents = to_jsonl(examples)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create dataset directory: {}", parent.display())
        })?;
    }

    fs::write(path, contents)
        .with_context(|| format!("Failed to write dataset: {}", path.display()))?;

    tracing::debug!(path = %path.display(), examples = examples.len(), "Wrote dataset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatLine, ExampleBuilder};

    fn sample_examples() -> Vec<FineTuneExample> {
        let lines: Vec<ChatLine> = [("Alice", "Hi"), ("Bob", "Hello \"there\""), ("Alice", "bye")]
            .iter()
            .map(|(sender, message)| ChatLine {
                date: "01/01/23".into(),
                time: "10:00:00".into(),
                sender: sender.to_string(),
                message: message.to_string(),
            })
            .collect();
        ExampleBuilder::default().build(&lines)
    }

    #[test]
    fn test_record_shape() {
        let jsonl = to_jsonl(&sample_examples()[..1]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&jsonl).unwrap();

        let messages = value["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "Alice: Hi");
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[2]["content"], "Hello \"there\"");
    }

    #[test]
    fn test_no_trailing_newline() {
        let jsonl = to_jsonl(&sample_examples()).unwrap();
        assert_eq!(jsonl.lines().count(), 2);
        assert!(!jsonl.ends_with('\n'));
        assert_eq!(to_jsonl(&[]).unwrap(), "");
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("training_data.jsonl");

        write_dataset(&sample_examples(), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);

        write_dataset(&sample_examples()[..1], &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
    }
}

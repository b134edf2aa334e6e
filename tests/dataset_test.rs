// Integration tests for parsing, example building and JSONL round trips

use anyhow::Result;
use chattune::chat::{parse_export, ExampleBuilder, Role};
use chattune::dataset::{extract_participants, parse_jsonl_lenient, read_dataset, write_dataset};
use tempfile::tempdir;

const EXPORT: &str = "[01/01/23, 10:00:00] Alice: Hi\n\
                      [01/01/23, 10:00:05] Bob: Hello there\n\
                      [01/01/23, 10:00:10] Alice: immagine omessa\n\
                      [01/01/23, 10:00:15] Bob: ok";

#[test]
fn test_placeholder_scenario_yields_single_example() {
    let lines = parse_export(EXPORT);
    assert_eq!(lines.len(), 4);

    let examples = ExampleBuilder::default().build(&lines);
    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0].user(), Some("Alice: Hi"));
    assert_eq!(examples[0].assistant(), Some("Hello there"));
}

#[test]
fn test_clean_conversation_yields_n_minus_one_in_order() {
    let senders = ["Alice", "Bob", "Carla"];
    let export: String = (0..10)
        .map(|i| {
            format!(
                "[02/03/24, 12:{:02}:00] {}: message number {}\n",
                i,
                senders[i % senders.len()],
                i
            )
        })
        .collect();

    let lines = parse_export(&export);
    assert_eq!(lines.len(), 10);

    let examples = ExampleBuilder::default().build(&lines);
    assert_eq!(examples.len(), 9);
    for (i, example) in examples.iter().enumerate() {
        let roles: Vec<Role> = example.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(
            example.user(),
            Some(format!("{}: message number {}", senders[i % 3], i).as_str())
        );
        assert_eq!(
            example.assistant(),
            Some(format!("message number {}", i + 1).as_str())
        );
        assert!(example.messages.iter().all(|m| !m.content.is_empty()));
    }
}

#[test]
fn test_export_noise_is_ignored() {
    let export = "Messages and calls are end-to-end encrypted.\n\
                  [01/01/23, 10:00:00] Alice: first part\n\
                  second part of the same message\n\
                  \n\
                  [01/01/23, 10:00:05] Bob: reply: with colon";
    let lines = parse_export(export);

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].message, "first part");
    assert_eq!(lines[1].message, "reply: with colon");
}

#[test]
fn test_serialize_then_reparse_is_identical() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("training_data.jsonl");

    let export = "[01/01/23, 10:00:00] Alice: Ciao! \"quoted\" \\ backslash\n\
                  [01/01/23, 10:00:05] Bob: ünïcödé 🎉\n\
                  [01/01/23, 10:00:10] Alice: tab\there";
    let examples = ExampleBuilder::default().build(&parse_export(export));
    assert_eq!(examples.len(), 2);

    write_dataset(&examples, &path)?;
    let reread = read_dataset(&path)?;
    assert_eq!(reread, examples);

    Ok(())
}

#[test]
fn test_participants_from_written_dataset() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("training_data.jsonl");

    let export = "[01/01/23, 10:00:00] Alice: one\n\
                  [01/01/23, 10:00:05] Bob: two\n\
                  [01/01/23, 10:00:10] Alice: three";
    write_dataset(&ExampleBuilder::default().build(&parse_export(export)), &path)?;

    let data = std::fs::read_to_string(&path)?;
    // Assistant side of each example: Bob answers first, then Alice
    assert_eq!(extract_participants(&parse_jsonl_lenient(&data)), vec!["Bob", "Alice"]);

    Ok(())
}

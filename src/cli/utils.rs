//! Convenience helpers shared across command handlers.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use bingocard::{BatchManifest, Card, parse_cards};

/// Whether `path` is the `-` placeholder for stdin/stdout.
pub fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read the entire stdin stream into memory.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read from stdin")?;
    Ok(buffer)
}

/// Persist a string either to a file or stdout when `-` is provided.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if is_stdio(path) {
        io::stdout().write_all(content.as_bytes())?;
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Load cards from a text dump or JSON manifest, read from `path` or stdin (`-`).
pub fn load_cards(path: &Path) -> Result<Vec<Card>> {
    if is_stdio(path) {
        let text = read_stdin()?;
        return cards_from_str(&text).context("failed to load cards from stdin");
    }
    if !path.exists() {
        return Err(anyhow!("cards file not found: {}", path.display()));
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    cards_from_str(&text).with_context(|| format!("failed to load cards from {}", path.display()))
}

/// A manifest is a JSON object; anything else is read as a text dump.
fn cards_from_str(text: &str) -> Result<Vec<Card>> {
    if text.trim_start().starts_with('{') {
        return Ok(BatchManifest::from_json(text)?.cards);
    }
    Ok(parse_cards(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bingocard::{GeneratorConfig, format_cards, generate_batch};
    use pretty_assertions::assert_eq;

    #[test]
    fn loads_text_and_manifest() {
        let (seed, report) = generate_batch(&GeneratorConfig::new(3, 1_000), Some(4)).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let text_path = dir.path().join("cards.txt");
        write_output(&text_path, &format_cards(report.batch.cards())).unwrap();
        assert_eq!(load_cards(&text_path).unwrap(), report.batch.cards());

        let json_path = dir.path().join("cards.JSON");
        BatchManifest::from_report(&report, Some(seed))
            .save(&json_path)
            .unwrap();
        assert_eq!(load_cards(&json_path).unwrap(), report.batch.cards());
    }

    #[test]
    fn manifest_is_detected_by_content() {
        let (seed, report) = generate_batch(&GeneratorConfig::new(2, 1_000), Some(6)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bingo_cards.txt");
        let json = BatchManifest::from_report(&report, Some(seed)).to_json().unwrap();
        write_output(&path, &format!("\n  {json}")).unwrap();
        assert_eq!(load_cards(&path).unwrap(), report.batch.cards());
    }

    #[test]
    fn broken_dump_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.txt");
        write_output(&path, "1 2 3\n").unwrap();
        let err = load_cards(&path).unwrap_err();
        assert!(err.to_string().starts_with("failed to load cards from"));
        assert!(format!("{err:#}").contains("line 1: expected 5 numbers, found 3"));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_cards(&dir.path().join("nope.txt")).unwrap_err();
        assert!(err.to_string().starts_with("cards file not found"));
    }
}

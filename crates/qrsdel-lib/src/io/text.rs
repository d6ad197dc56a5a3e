use anyhow::{Context, Result};
use std::path::Path;

/// Parses beat positions, one per line.
///
/// Only the first field of a line (split on whitespace or commas) is read,
/// so `sample label` exports are accepted as well. Blank lines and lines
/// starting with `#` are skipped. The result is sorted and deduplicated.
pub fn parse_beat_indices(text: &str) -> Result<Vec<usize>> {
    let mut beats = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let field = trimmed
            .split(|ch: char| ch == ',' || ch.is_whitespace())
            .next()
            .unwrap_or(trimmed);
        let beat: usize = field
            .parse()
            .with_context(|| format!("line {}: {} is not a sample index", idx + 1, field))?;
        beats.push(beat);
    }
    if beats.is_empty() {
        anyhow::bail!("no beat annotations found");
    }
    beats.sort_unstable();
    beats.dedup();
    Ok(beats)
}

pub fn read_beat_indices(path: &Path) -> Result<Vec<usize>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_beat_indices(&text)
}

//! Indented-outline generation for the mind map
//!
//! Markdown headings map directly onto the outline when the text has them;
//! otherwise each paragraph contributes its lead sentence as a branch.

use std::sync::OnceLock;

use anyhow::Result;

static PIPELINE: OnceLock<OutlinePipeline> = OnceLock::new();

const MAX_NODES: usize = 24;
const MAX_LABEL_CHARS: usize = 48;

/// What the user sees when there is nothing to outline
pub const EMPTY_INPUT_MESSAGE: &str = "Nothing to map. The editor is empty.";

/// Generate an indented topic outline on behalf of the UI
pub fn generate(text: &str) -> Result<String, String> {
    if text.trim().is_empty() {
        return Ok(EMPTY_INPUT_MESSAGE.to_string());
    }
    let pipeline = pipeline().map_err(|e| format!("Mind map generation failed: {e}"))?;
    pipeline
        .run(text)
        .map_err(|e| format!("Mind map generation failed: {e}"))
}

fn pipeline() -> Result<&'static OutlinePipeline> {
    if let Some(p) = PIPELINE.get() {
        return Ok(p);
    }
    let built = OutlinePipeline::load()?;
    Ok(PIPELINE.get_or_init(|| built))
}

struct OutlinePipeline;

impl OutlinePipeline {
    fn load() -> Result<Self> {
        tracing::info!("Loading outline pipeline");
        Ok(Self)
    }

    fn run(&self, text: &str) -> Result<String> {
        let headings = collect_headings(text);
        let outline = if headings.is_empty() {
            self.outline_from_paragraphs(text)
        } else {
            self.outline_from_headings(&headings)
        };
        Ok(outline)
    }

    /// The first heading becomes the root; later headings indent by their
    /// level relative to it, clamped to stay inside the tree.
    fn outline_from_headings(&self, headings: &[(usize, String)]) -> String {
        let min_level = headings.iter().map(|(l, _)| *l).min().unwrap_or(1);
        let mut lines = Vec::new();
        for (i, (level, title)) in headings.iter().take(MAX_NODES).enumerate() {
            let depth = if i == 0 {
                0
            } else {
                (level - min_level).max(1)
            };
            lines.push(format!("{}{}", "  ".repeat(depth), clip(title)));
        }
        lines.join("\n")
    }

    /// Root from the opening line, one branch per paragraph lead sentence
    fn outline_from_paragraphs(&self, text: &str) -> String {
        let root = text
            .lines()
            .find(|l| !l.trim().is_empty())
            .map(|l| clip(l.trim()))
            .unwrap_or_else(|| "Notes".to_string());

        let mut lines = vec![root.clone()];
        for paragraph in text.split("\n\n") {
            let Some(lead) = lead_sentence(paragraph) else {
                continue;
            };
            let label = clip(&lead);
            if label != root && !lines.contains(&format!("  {label}")) {
                lines.push(format!("  {label}"));
            }
            if lines.len() >= MAX_NODES {
                break;
            }
        }
        lines.join("\n")
    }
}

/// Markdown headings as (level, title) pairs
fn collect_headings(text: &str) -> Vec<(usize, String)> {
    let mut headings = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim_start();
        let level = trimmed.chars().take_while(|&c| c == '#').count();
        if level == 0 || level > 6 {
            continue;
        }
        let title = trimmed[level..].trim();
        if !title.is_empty() {
            headings.push((level, title.to_string()));
        }
    }
    headings
}

fn lead_sentence(paragraph: &str) -> Option<String> {
    let flat = paragraph.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.is_empty() {
        return None;
    }
    let end = flat
        .char_indices()
        .find(|(_, c)| matches!(c, '.' | '!' | '?'))
        .map(|(i, _)| i)
        .unwrap_or(flat.len());
    Some(flat[..end].trim().to_string()).filter(|s| !s.is_empty())
}

/// Clip a label to a displayable length on a character boundary
fn clip(label: &str) -> String {
    label.chars().take(MAX_LABEL_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::parse_indented_text;

    #[test]
    fn test_empty_input_message() {
        assert_eq!(generate("  \n"), Ok(EMPTY_INPUT_MESSAGE.to_string()));
    }

    #[test]
    fn test_headings_become_outline() {
        let text = "# Biology\n## Cells\n### Organelles\n## Genetics\n";
        let outline = generate(text).unwrap();
        assert_eq!(outline, "Biology\n  Cells\n    Organelles\n  Genetics");
    }

    #[test]
    fn test_second_top_level_heading_stays_in_tree() {
        let text = "# First\n# Second\n## Child\n";
        let outline = generate(text).unwrap();
        // A sibling of the root must still indent under it so the result
        // parses as a single tree.
        let graph = parse_indented_text(&outline).unwrap();
        assert_eq!(graph.node(0).unwrap().label, "First");
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_paragraph_fallback_parses() {
        let text = "Study session notes\n\nCells are small units. They divide.\n\n\
                    Genetics covers heredity patterns.";
        let outline = generate(text).unwrap();
        let graph = parse_indented_text(&outline).unwrap();

        assert_eq!(graph.node(0).unwrap().label, "Study session notes");
        assert!(graph.node_count() >= 3);
    }

    #[test]
    fn test_labels_clipped() {
        let long = "x".repeat(200);
        let outline = generate(&long).unwrap();
        for line in outline.lines() {
            assert!(line.trim().chars().count() <= MAX_LABEL_CHARS);
        }
    }
}

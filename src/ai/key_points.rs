//! Keyphrase extraction
//!
//! Candidate phrases are runs of consecutive content words; the pipeline
//! ranks them by frequency and reports the top entries with scores.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use anyhow::Result;

static PIPELINE: OnceLock<KeyPointsPipeline> = OnceLock::new();

const MAX_RESULTS: usize = 10;
const MAX_PHRASE_WORDS: usize = 3;

/// Extract key points on behalf of the UI; returns a display string
/// either way
pub fn extract(text: &str) -> Result<String, String> {
    let pipeline = pipeline().map_err(|e| format!("Key points extraction failed: {e}"))?;
    pipeline
        .run(text)
        .map_err(|e| format!("Key points extraction failed: {e}"))
}

fn pipeline() -> Result<&'static KeyPointsPipeline> {
    if let Some(p) = PIPELINE.get() {
        return Ok(p);
    }
    let built = KeyPointsPipeline::load()?;
    Ok(PIPELINE.get_or_init(|| built))
}

struct KeyPointsPipeline {
    stopwords: HashSet<&'static str>,
}

impl KeyPointsPipeline {
    fn load() -> Result<Self> {
        tracing::info!("Loading key points pipeline");
        Ok(Self {
            stopwords: super::STOPWORDS.iter().copied().collect(),
        })
    }

    fn run(&self, text: &str) -> Result<String> {
        let phrases = self.rank_phrases(text);
        if phrases.is_empty() {
            return Ok("No key points found.".to_string());
        }

        let lines: Vec<String> = phrases
            .into_iter()
            .take(MAX_RESULTS)
            .map(|(phrase, score)| format!("- {phrase} (score: {score:.2})"))
            .collect();
        Ok(lines.join("\n"))
    }

    /// Phrases with normalized scores, best first; ties break alphabetically
    /// so output is stable
    fn rank_phrases(&self, text: &str) -> Vec<(String, f64)> {
        let mut counts: HashMap<String, (String, f64)> = HashMap::new();

        for sentence in text.split(|c: char| matches!(c, '.' | '!' | '?' | '\n')) {
            let words: Vec<&str> = sentence
                .split(|c: char| !c.is_alphanumeric() && c != '-')
                .filter(|w| !w.is_empty())
                .collect();

            // Runs of consecutive content words form the candidates.
            let mut run: Vec<&str> = Vec::new();
            for &word in words.iter().chain(std::iter::once(&"")) {
                let lower = word.to_lowercase();
                let is_content = word.len() > 2 && !self.stopwords.contains(lower.as_str());
                if is_content {
                    run.push(word);
                    continue;
                }
                self.count_run(&run, &mut counts);
                run.clear();
            }
        }

        let max_count = counts
            .values()
            .map(|(_, c)| *c)
            .fold(0.0f64, f64::max)
            .max(1.0);

        let mut ranked: Vec<(String, f64)> = counts
            .into_values()
            .map(|(display, count)| (display, count / max_count))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }

    fn count_run(&self, run: &[&str], counts: &mut HashMap<String, (String, f64)>) {
        for len in 1..=run.len().min(MAX_PHRASE_WORDS) {
            for window in run.windows(len) {
                let display = window.join(" ");
                let key = display.to_lowercase();
                // Longer phrases carry a little extra weight so that a
                // repeated bigram outranks its component words.
                let weight = 1.0 + 0.25 * (len as f64 - 1.0);
                let entry = counts.entry(key).or_insert_with(|| (display, 0.0));
                entry.1 += weight;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_reports_no_key_points() {
        assert_eq!(extract(""), Ok("No key points found.".to_string()));
        assert_eq!(
            extract("the of and a to"),
            Ok("No key points found.".to_string())
        );
    }

    #[test]
    fn test_output_format() {
        let text = "Cell membrane. Cell membrane. Cell membrane regulates transport.";
        let output = extract(text).unwrap();
        let first = output.lines().next().unwrap();
        assert!(
            first.starts_with("- ") && first.contains("(score: "),
            "unexpected line format: {first}"
        );
    }

    #[test]
    fn test_repeated_phrase_ranks_first() {
        let text = "Photosynthesis converts light. Photosynthesis needs chlorophyll. \
                    Photosynthesis sustains plants. Water helps.";
        let output = extract(text).unwrap();
        let first = output.lines().next().unwrap().to_lowercase();
        assert!(first.contains("photosynthesis"), "got: {first}");
        assert!(first.contains("(score: 1.00)"));
    }

    #[test]
    fn test_result_count_capped() {
        let mut text = String::new();
        for i in 0..40 {
            text.push_str(&format!("uniqueword{i} appears once here. "));
        }
        let output = extract(&text).unwrap();
        assert!(output.lines().count() <= MAX_RESULTS);
    }

    #[test]
    fn test_deterministic_output() {
        let text = "Mitochondria produce energy. Ribosomes build proteins.";
        assert_eq!(extract(text), extract(text));
    }
}

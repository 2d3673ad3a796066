//! Extractive text summarization
//!
//! The pipeline scores sentences by content-word frequency and keeps the
//! best ones, in document order, within length bounds derived from the
//! requested summary length.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use anyhow::Result;

static PIPELINE: OnceLock<SummarizerPipeline> = OnceLock::new();

/// Requested summary size, scaled from the input length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryLength {
    Short,
    Medium,
    Long,
}

impl SummaryLength {
    pub const ALL: [SummaryLength; 3] =
        [SummaryLength::Short, SummaryLength::Medium, SummaryLength::Long];

    pub fn label(self) -> &'static str {
        match self {
            SummaryLength::Short => "Short",
            SummaryLength::Medium => "Medium",
            SummaryLength::Long => "Long",
        }
    }
}

/// Min/max summary word counts for an input of `word_count` words
pub fn summary_bounds(word_count: usize, length: SummaryLength) -> (usize, usize) {
    let pct = |p: f64| (word_count as f64 * p) as usize;
    match length {
        SummaryLength::Short => (pct(0.1).max(10), pct(0.2).max(25)),
        SummaryLength::Medium => (pct(0.2).max(25), pct(0.5).max(75)),
        SummaryLength::Long => (pct(0.4).max(50), pct(0.8).max(150)),
    }
}

/// Summarize on behalf of the UI; returns a display string either way.
///
/// Empty input short-circuits without touching the pipeline.
pub fn summarize(text: &str, length: SummaryLength) -> Result<String, String> {
    if text.trim().is_empty() {
        return Ok("Nothing to summarize.".to_string());
    }
    let pipeline = pipeline().map_err(|e| format!("Summarization failed: {e}"))?;
    pipeline
        .run(text, length)
        .map_err(|e| format!("Summarization failed: {e}"))
}

/// Warm the pipeline in the background; failures only logged, the error
/// resurfaces on first real use
pub fn preload() {
    if let Err(e) = pipeline() {
        tracing::debug!("Summarizer preload failed: {e}");
    }
}

fn pipeline() -> Result<&'static SummarizerPipeline> {
    if let Some(p) = PIPELINE.get() {
        return Ok(p);
    }
    let built = SummarizerPipeline::load()?;
    Ok(PIPELINE.get_or_init(|| built))
}

struct SummarizerPipeline {
    stopwords: HashSet<&'static str>,
}

impl SummarizerPipeline {
    fn load() -> Result<Self> {
        tracing::info!("Loading summarization pipeline");
        Ok(Self {
            stopwords: super::STOPWORDS.iter().copied().collect(),
        })
    }

    fn run(&self, text: &str, length: SummaryLength) -> Result<String> {
        let word_count = text.split_whitespace().count();
        let (min_words, max_words) = summary_bounds(word_count, length);

        // Inputs at or below the floor come back whole.
        if word_count <= min_words {
            return Ok(text.trim().to_string());
        }

        let sentences = split_sentences(text);
        let frequencies = self.word_frequencies(text);

        let mut scored: Vec<(usize, f64)> = sentences
            .iter()
            .enumerate()
            .map(|(i, s)| (i, self.score_sentence(s, &frequencies)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut selected: Vec<usize> = Vec::new();
        let mut total = 0usize;
        for (i, _) in scored {
            let words = sentences[i].split_whitespace().count();
            if total >= min_words && total + words > max_words {
                continue;
            }
            selected.push(i);
            total += words;
            if total >= max_words {
                break;
            }
        }
        selected.sort_unstable();

        let summary = selected
            .iter()
            .map(|&i| sentences[i].as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(summary)
    }

    fn word_frequencies(&self, text: &str) -> HashMap<String, f64> {
        let mut freq = HashMap::new();
        for word in tokenize(text) {
            if !self.stopwords.contains(word.as_str()) {
                *freq.entry(word).or_insert(0.0) += 1.0;
            }
        }
        freq
    }

    /// Mean content-word frequency, damped so long sentences do not win
    /// on bulk alone
    fn score_sentence(&self, sentence: &str, frequencies: &HashMap<String, f64>) -> f64 {
        let words: Vec<String> = tokenize(sentence);
        if words.is_empty() {
            return 0.0;
        }
        let sum: f64 = words.iter().filter_map(|w| frequencies.get(w)).sum();
        sum / (words.len() as f64).sqrt()
    }
}

/// Lowercased alphanumeric tokens
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Split on terminal punctuation, keeping the punctuation with its sentence
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_text() -> String {
        let mut text = String::new();
        for i in 0..30 {
            text.push_str(&format!(
                "Cells are the basic structural unit of every organism, item {i}. "
            ));
            text.push_str("Filler sentence with padding words here. ");
        }
        text
    }

    #[test]
    fn test_bounds_formula() {
        assert_eq!(summary_bounds(1000, SummaryLength::Short), (100, 200));
        assert_eq!(summary_bounds(1000, SummaryLength::Medium), (200, 500));
        assert_eq!(summary_bounds(1000, SummaryLength::Long), (400, 800));
        // Floors dominate for tiny inputs.
        assert_eq!(summary_bounds(20, SummaryLength::Short), (10, 25));
        assert_eq!(summary_bounds(0, SummaryLength::Long), (50, 150));
    }

    #[test]
    fn test_empty_input_message() {
        assert_eq!(
            summarize("   \n", SummaryLength::Short),
            Ok("Nothing to summarize.".to_string())
        );
    }

    #[test]
    fn test_summary_respects_max_bound() {
        let text = sample_text();
        let total = text.split_whitespace().count();
        let summary = summarize(&text, SummaryLength::Short).unwrap();
        let summary_words = summary.split_whitespace().count();

        let (_, max_words) = summary_bounds(total, SummaryLength::Short);
        assert!(summary_words <= max_words, "{summary_words} > {max_words}");
        assert!(summary_words > 0);
    }

    #[test]
    fn test_short_input_returned_whole() {
        let text = "Two sentences only. Nothing to cut here.";
        assert_eq!(summarize(text, SummaryLength::Long), Ok(text.to_string()));
    }

    #[test]
    fn test_summary_keeps_document_order() {
        let text = sample_text();
        let summary = summarize(&text, SummaryLength::Medium).unwrap();
        // Sentences carry their item index; selection must not reorder them.
        let indices: Vec<usize> = summary
            .split("item ")
            .skip(1)
            .filter_map(|chunk| {
                chunk
                    .split(|c: char| !c.is_ascii_digit())
                    .next()
                    .and_then(|n| n.parse().ok())
            })
            .collect();
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        assert_eq!(indices, sorted);
    }

    #[test]
    fn test_split_sentences() {
        let s = split_sentences("One. Two! Three? Four");
        assert_eq!(s, vec!["One.", "Two!", "Three?", "Four"]);
    }
}

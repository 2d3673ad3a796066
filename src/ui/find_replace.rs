//! Find/replace bar and its match logic
//!
//! The scanning and replacement functions are kept free of UI state so they
//! can be exercised directly.

use eframe::egui;

use crate::core::document::Document;

/// Find/replace state for the active editor
#[derive(Debug, Default)]
pub struct FindReplaceState {
    pub open: bool,
    pub query: String,
    pub replacement: String,
    pub match_case: bool,
    /// Byte position to search from; advances past each found match
    position: usize,
    /// The match navigated to last, as a byte range
    current: Option<(usize, usize)>,
}

impl FindReplaceState {
    /// Advance to the next match, wrapping around; returns a status line
    pub fn find_next(&mut self, content: &str) -> String {
        if self.query.is_empty() {
            return "Enter a search term".to_string();
        }
        let matches = find_matches(content, &self.query, self.match_case);
        if matches.is_empty() {
            self.position = 0;
            self.current = None;
            return format!("No matches for \"{}\"", self.query);
        }

        let index = matches
            .iter()
            .position(|(start, _)| *start >= self.position)
            .unwrap_or(0);
        let (start, end) = matches[index];
        self.position = start + 1;
        self.current = Some((start, end));
        format!("Match {} of {}", index + 1, matches.len())
    }

    /// Replace the current match and move to the next one
    pub fn replace_current(&mut self, content: &mut String) -> String {
        let Some((start, end)) = self.current.take() else {
            return self.find_next(content);
        };
        // The buffer may have changed since the match was found.
        if !find_matches(content, &self.query, self.match_case).contains(&(start, end)) {
            self.position = 0;
            return self.find_next(content);
        }

        content.replace_range(start..end, &self.replacement);
        self.position = start + self.replacement.len();
        self.find_next(content)
    }

    /// Replace every match; returns how many were replaced
    pub fn replace_all(&mut self, content: &mut String) -> usize {
        let matches = find_matches(content, &self.query, self.match_case);
        for &(start, end) in matches.iter().rev() {
            content.replace_range(start..end, &self.replacement);
        }
        self.position = 0;
        self.current = None;
        matches.len()
    }
}

/// Non-overlapping match byte ranges of `query` in `content`
fn find_matches(content: &str, query: &str, match_case: bool) -> Vec<(usize, usize)> {
    if query.is_empty() {
        return Vec::new();
    }
    let haystack: Vec<(usize, char)> = content.char_indices().collect();
    let needle: Vec<char> = query.chars().collect();
    let mut matches = Vec::new();

    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        let matched = needle.iter().enumerate().all(|(k, &q)| {
            let c = haystack[i + k].1;
            if match_case {
                c == q
            } else {
                c.to_lowercase().eq(q.to_lowercase())
            }
        });
        if matched {
            let start = haystack[i].0;
            let end = haystack
                .get(i + needle.len())
                .map(|(b, _)| *b)
                .unwrap_or(content.len());
            matches.push((start, end));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    matches
}

/// Find/replace bar shown under the menu
pub struct FindReplaceBar;

impl FindReplaceBar {
    /// Returns a status message when an action ran
    pub fn show(
        ctx: &egui::Context,
        state: &mut FindReplaceState,
        doc: Option<&mut Document>,
    ) -> Option<String> {
        if !state.open {
            return None;
        }
        let mut message = None;

        egui::TopBottomPanel::top("find_replace_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Find:");
                ui.add(egui::TextEdit::singleline(&mut state.query).desired_width(140.0));
                ui.label("Replace:");
                ui.add(egui::TextEdit::singleline(&mut state.replacement).desired_width(140.0));
                ui.checkbox(&mut state.match_case, "Match case");

                match doc {
                    Some(doc) => {
                        if ui.button("Find Next").clicked() {
                            message = Some(state.find_next(&doc.content));
                        }
                        if ui.button("Replace").clicked() {
                            let before = doc.content.clone();
                            message = Some(state.replace_current(&mut doc.content));
                            if doc.content != before {
                                doc.modified = true;
                            }
                        }
                        if ui.button("Replace All").clicked() {
                            let n = state.replace_all(&mut doc.content);
                            if n > 0 {
                                doc.modified = true;
                            }
                            message = Some(format!("Replaced {n} occurrence(s)"));
                        }
                    }
                    None => {
                        ui.label("Find works in text tabs only");
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✕").clicked() {
                        state.open = false;
                    }
                });
            });
        });

        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_next_wraps() {
        let mut state = FindReplaceState {
            query: "ab".to_string(),
            ..Default::default()
        };
        let content = "ab cd ab";

        assert_eq!(state.find_next(content), "Match 1 of 2");
        assert_eq!(state.find_next(content), "Match 2 of 2");
        assert_eq!(state.find_next(content), "Match 1 of 2");
    }

    #[test]
    fn test_case_sensitivity() {
        let mut state = FindReplaceState {
            query: "Cell".to_string(),
            match_case: true,
            ..Default::default()
        };
        assert!(state.find_next("the cell divides").starts_with("No matches"));

        state.match_case = false;
        assert_eq!(state.find_next("the cell divides"), "Match 1 of 1");
    }

    #[test]
    fn test_replace_current_advances() {
        let mut state = FindReplaceState {
            query: "cat".to_string(),
            replacement: "dog".to_string(),
            ..Default::default()
        };
        let mut content = "cat and cat".to_string();

        state.find_next(&content);
        state.replace_current(&mut content);
        assert_eq!(content, "dog and cat");

        state.replace_current(&mut content);
        assert_eq!(content, "dog and dog");
    }

    #[test]
    fn test_replace_all_counts() {
        let mut state = FindReplaceState {
            query: "aa".to_string(),
            replacement: "b".to_string(),
            ..Default::default()
        };
        let mut content = "aaaa aa".to_string();
        // Non-overlapping: "aaaa" holds two matches, not three.
        assert_eq!(state.replace_all(&mut content), 3);
        assert_eq!(content, "bb b");
    }

    #[test]
    fn test_stale_match_is_revalidated() {
        let mut state = FindReplaceState {
            query: "x".to_string(),
            replacement: "y".to_string(),
            ..Default::default()
        };
        let mut content = "x".to_string();
        state.find_next(&content);

        // Buffer edited out from under the stored match.
        content.clear();
        content.push_str("zz");
        let status = state.replace_current(&mut content);
        assert_eq!(content, "zz");
        assert!(status.starts_with("No matches"));
    }

    #[test]
    fn test_empty_query() {
        let mut state = FindReplaceState::default();
        assert_eq!(state.find_next("anything"), "Enter a search term");
        let mut content = "anything".to_string();
        assert_eq!(state.replace_all(&mut content), 0);
    }
}

//! Autocomplete suggestions and highlight ranges

use serde::{Deserialize, Serialize};

/// A span of characters inside a title or subtitle that matched the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    /// Character offset of the first matched character
    pub location: usize,
    /// Number of matched characters
    pub length: usize,
}

impl TextRange {
    pub fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    pub fn end(&self) -> usize {
        self.location.saturating_add(self.length)
    }
}

/// A ranked completion returned by the completion backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCompletion {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub title_highlights: Vec<TextRange>,
    #[serde(default)]
    pub subtitle_highlights: Vec<TextRange>,
}

impl SearchCompletion {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            title_highlights: Vec::new(),
            subtitle_highlights: Vec::new(),
        }
    }

    pub fn with_title_highlights(mut self, ranges: Vec<TextRange>) -> Self {
        self.title_highlights = ranges;
        self
    }

    pub fn with_subtitle_highlights(mut self, ranges: Vec<TextRange>) -> Self {
        self.subtitle_highlights = ranges;
        self
    }

    /// The query text used to resolve this completion and to key the result cache.
    ///
    /// Returns `None` when the completion carries no usable text.
    pub fn natural_language_query(&self) -> Option<String> {
        let title = self.title.trim();
        let subtitle = self.subtitle.trim();

        match (title.is_empty(), subtitle.is_empty()) {
            (true, true) => None,
            (false, true) => Some(title.to_string()),
            (true, false) => Some(subtitle.to_string()),
            (false, false) => Some(format!("{} {}", title, subtitle)),
        }
    }

    pub fn title_segments(&self) -> Vec<(String, bool)> {
        highlight_segments(&self.title, &self.title_highlights)
    }

    pub fn subtitle_segments(&self) -> Vec<(String, bool)> {
        highlight_segments(&self.subtitle, &self.subtitle_highlights)
    }
}

/// Splits `text` into `(segment, matched)` pieces following `ranges`.
///
/// Ranges are measured in characters. Out-of-bounds ranges are clamped, empty
/// ranges dropped, overlapping or adjacent ranges merged.
pub fn highlight_segments(text: &str, ranges: &[TextRange]) -> Vec<(String, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let mut spans: Vec<(usize, usize)> = ranges
        .iter()
        .map(|r| (r.location.min(len), r.end().min(len)))
        .filter(|(start, end)| start < end)
        .collect();
    spans.sort_unstable();

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    let mut segments = Vec::new();
    let mut cursor = 0;
    for (start, end) in merged {
        if cursor < start {
            segments.push((chars[cursor..start].iter().collect(), false));
        }
        segments.push((chars[start..end].iter().collect(), true));
        cursor = end;
    }
    if cursor < len {
        segments.push((chars[cursor..].iter().collect(), false));
    }

    segments
}

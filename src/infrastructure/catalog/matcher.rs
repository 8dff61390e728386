//! Case-insensitive text matching measured in characters

use crate::domain::search::TextRange;

fn fold(c: char) -> char {
    // One char in, one char out so offsets stay aligned with the original text
    c.to_lowercase().next().unwrap_or(c)
}

fn folded(text: &str) -> Vec<char> {
    text.chars().map(fold).collect()
}

/// Every non-overlapping occurrence of `query` in `text`, ignoring case
pub fn match_ranges(text: &str, query: &str) -> Vec<TextRange> {
    let needle = folded(query.trim());
    if needle.is_empty() {
        return Vec::new();
    }

    let haystack = folded(text);
    let mut ranges = Vec::new();
    let mut start = 0;

    while start + needle.len() <= haystack.len() {
        if haystack[start..start + needle.len()] == needle[..] {
            ranges.push(TextRange::new(start, needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }

    ranges
}

/// Whether every whitespace-separated token of `query` occurs in `text`, ignoring case
pub fn tokens_contained(text: &str, query: &str) -> bool {
    let haystack: String = folded(text).into_iter().collect();
    let mut tokens = query.split_whitespace().peekable();

    if tokens.peek().is_none() {
        return false;
    }

    tokens.all(|token| {
        let token: String = folded(token).into_iter().collect();
        haystack.contains(&token)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_ranges_case_insensitive() {
        assert_eq!(
            match_ranges("Galata Tower", "TOW"),
            vec![TextRange::new(7, 3)]
        );
    }

    #[test]
    fn test_match_ranges_repeated_and_non_overlapping() {
        assert_eq!(
            match_ranges("aaaa", "aa"),
            vec![TextRange::new(0, 2), TextRange::new(2, 2)]
        );
        assert_eq!(
            match_ranges("Park Park", "park"),
            vec![TextRange::new(0, 4), TextRange::new(5, 4)]
        );
    }

    #[test]
    fn test_match_ranges_unicode_offsets_are_characters() {
        assert_eq!(
            match_ranges("Kadıköy Moda", "moda"),
            vec![TextRange::new(8, 4)]
        );
    }

    #[test]
    fn test_match_ranges_blank_query() {
        assert!(match_ranges("Galata", "  ").is_empty());
        assert!(match_ranges("Ga", "Galata").is_empty());
    }

    #[test]
    fn test_tokens_contained() {
        assert!(tokens_contained("Galata Tower Landmark · Beyoğlu", "galata beyoğlu"));
        assert!(tokens_contained("Galata Tower", "tower"));
        assert!(!tokens_contained("Galata Tower", "galata bridge"));
        assert!(!tokens_contained("Galata Tower", "   "));
    }
}

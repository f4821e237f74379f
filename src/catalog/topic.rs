// SYNOID Catalog - Topic Heuristic
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Derives a short display label from a free-text video title.

/// Everything from this character onward is channel/series decoration.
const DECORATION_SEPARATOR: char = '|';

/// Titles with more words than this are cut down to `TOPIC_WORDS`.
const SHORT_TITLE_WORDS: usize = 2;
const TOPIC_WORDS: usize = 3;

/// Whitespace as title text is split on: Unicode `White_Space` plus the
/// ASCII information separators U+001C..=U+001F.
fn is_title_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Guess a topic keyword from a video title.
///
/// 1. Drop everything from the first `|`.
/// 2. Keep only ASCII letters, ASCII digits and whitespace.
/// 3. Return the first three words when there are more than two,
///    otherwise the cleaned title trimmed but otherwise untouched.
pub fn guess_topic(title: &str) -> String {
    let head = match title.find(DECORATION_SEPARATOR) {
        Some(idx) => &title[..idx],
        None => title,
    };

    let cleaned: String = head
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || is_title_space(c))
        .collect();
    let trimmed = cleaned.trim_matches(is_title_space);

    let words: Vec<&str> = trimmed
        .split(is_title_space)
        .filter(|w| !w.is_empty())
        .collect();
    if words.len() > SHORT_TITLE_WORDS {
        words[..TOPIC_WORDS].join(" ")
    } else {
        trimmed.to_string()
    }
}

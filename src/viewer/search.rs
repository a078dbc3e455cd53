//! Search & highlight engine
//!
//! Pure functions over the current search term. Matching is a literal,
//! case-insensitive scan: the query is never compiled into a pattern, so
//! characters like `(`, `*` or `[` only ever match themselves.

use crate::content::Section;
use serde::Serialize;

/// A run of text that either matched the query or did not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub content: &'a str,
    pub is_match: bool,
}

impl<'a> Segment<'a> {
    fn plain(content: &'a str) -> Self {
        Self {
            content,
            is_match: false,
        }
    }

    fn matched(content: &'a str) -> Self {
        Self {
            content,
            is_match: true,
        }
    }
}

/// Filter sections whose title or id contains `query`, case-insensitively
///
/// A blank query returns every section. Registry order is preserved.
pub fn filter_sections<'a>(sections: &'a [Section], query: &str) -> Vec<&'a Section> {
    if query.trim().is_empty() {
        return sections.iter().collect();
    }

    let needle = fold(query);
    sections
        .iter()
        .filter(|s| contains_folded(s.title, &needle) || contains_folded(s.id, &needle))
        .collect()
}

/// Split `text` into matching and non-matching segments
///
/// Segments alternate non-match / match and always start and end with a
/// non-match segment, which may be empty. Concatenating every `content`
/// reproduces `text` exactly.
pub fn highlight_matches<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    if query.trim().is_empty() {
        return vec![Segment::plain(text)];
    }

    let needle = fold(query);
    if needle.is_empty() {
        return vec![Segment::plain(text)];
    }

    let mut segments = Vec::new();
    let mut last = 0;
    while let Some((start, end)) = find_folded(text, &needle, last) {
        segments.push(Segment::plain(&text[last..start]));
        segments.push(Segment::matched(&text[start..end]));
        last = end;
    }
    segments.push(Segment::plain(&text[last..]));
    segments
}

fn fold(s: &str) -> Vec<char> {
    s.chars().flat_map(char::to_lowercase).collect()
}

fn contains_folded(haystack: &str, needle: &[char]) -> bool {
    needle.is_empty() || find_folded(haystack, needle, 0).is_some()
}

/// Byte range of the first match at or after `from`
fn find_folded(text: &str, needle: &[char], from: usize) -> Option<(usize, usize)> {
    text[from..]
        .char_indices()
        .find_map(|(offset, _)| {
            let start = from + offset;
            match_at(text, start, needle).map(|end| (start, end))
        })
}

/// End byte index if `needle` matches `text` starting at `start`
///
/// A match must end on a char boundary of `text`; a needle that ends halfway
/// through a multi-char lowercase expansion does not match.
fn match_at(text: &str, start: usize, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, ch) in text[start..].char_indices() {
        for lower in ch.to_lowercase() {
            if matched >= needle.len() || needle[matched] != lower {
                return None;
            }
            matched += 1;
        }
        if matched == needle.len() {
            return Some(start + offset + ch.len_utf8());
        }
    }
    None
}

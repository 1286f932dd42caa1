//! Article search helpers: containment matching, snippet extraction, and
//! match-field classification.
//!
//! Search is a case-insensitive substring match over title, summary, and
//! content. The store does the filtering (`ILIKE`); this module derives the
//! per-result preview fields. All positions are counted in characters so a
//! snippet never splits a multi-byte character.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Characters of context kept on each side of a match.
pub const DEFAULT_SNIPPET_RADIUS: usize = 150;

/// Marker added where a snippet has been cut.
const ELLIPSIS: &str = "...";

static MARKUP_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which article field a search term was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Title,
    Summary,
    Content,
    Unknown,
}

/// The three searchable text fields of an article.
#[derive(Debug, Clone, Copy)]
pub struct SearchableText<'a> {
    pub title: &'a str,
    pub summary: Option<&'a str>,
    pub content: Option<&'a str>,
}

/// Preview fields computed for one search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPreview {
    pub snippet: String,
    pub match_field: MatchField,
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Lowercase `text` character by character, remembering which source
/// character produced each folded character.
fn fold(text: &str) -> (Vec<char>, Vec<usize>) {
    let mut folded = Vec::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    for (idx, ch) in text.chars().enumerate() {
        for lower in ch.to_lowercase() {
            folded.push(lower);
            origin.push(idx);
        }
    }
    (folded, origin)
}

/// Character range `[start, end)` in `text` of the first case-insensitive
/// occurrence of `term`.
///
/// The range covers the source characters, which can be fewer than the
/// term's characters when lowercasing expands one of them.
pub fn find_match_span(text: &str, term: &str) -> Option<(usize, usize)> {
    let needle: Vec<char> = term.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Some((0, 0));
    }

    let (haystack, origin) = fold(text);
    if needle.len() > haystack.len() {
        return None;
    }

    haystack
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
        .map(|pos| (origin[pos], origin[pos + needle.len() - 1] + 1))
}

/// Character index of the first case-insensitive occurrence of `term` in `text`.
///
/// An empty term matches at position 0.
pub fn find_case_insensitive(text: &str, term: &str) -> Option<usize> {
    find_match_span(text, term).map(|(start, _)| start)
}

/// Case-insensitive substring test.
pub fn contains_case_insensitive(text: &str, term: &str) -> bool {
    find_case_insensitive(text, term).is_some()
}

/// Escape `%`, `_` and `\` so a user term matches literally inside `LIKE`.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Build the `%term%` containment pattern bound into `ILIKE` queries.
pub fn containment_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

// ---------------------------------------------------------------------------
// Snippets
// ---------------------------------------------------------------------------

/// Replace every `<...>` tag with a space, collapse whitespace runs, and trim.
///
/// ```
/// use kb_core::search::strip_markup;
/// assert_eq!(strip_markup("<p>Hello <b>world</b></p>"), "Hello world");
/// ```
pub fn strip_markup(markup: &str) -> String {
    let without_tags = MARKUP_TAG_RE.replace_all(markup, " ");
    WHITESPACE_RUN_RE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Cut a window of `radius` characters either side of the first match of `term`.
///
/// Ellipses mark the ends that were cut. When `term` is absent the first
/// `2 * radius` characters are returned as they are.
///
/// ```
/// use kb_core::search::extract_window;
/// assert_eq!(
///     extract_window("0123456789ABCDEFGHIJ", "ABC", 3),
///     "...789ABCDEF..."
/// );
/// ```
pub fn extract_window(text: &str, term: &str, radius: usize) -> String {
    let chars: Vec<char> = text.chars().collect();

    let Some((match_start, match_end)) = find_match_span(text, term) else {
        return chars.iter().take(radius.saturating_mul(2)).collect();
    };

    let start = match_start.saturating_sub(radius);
    let end = match_end.saturating_add(radius).min(chars.len());

    let mut snippet = String::with_capacity(end - start + 2 * ELLIPSIS.len());
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.extend(&chars[start..end]);
    if end < chars.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

/// Pick the preview snippet for a hit: title, then summary, then cleaned content.
///
/// Falls back to the raw summary (or empty) when nothing contains the term.
pub fn build_snippet(fields: &SearchableText<'_>, term: &str, radius: usize) -> String {
    if contains_case_insensitive(fields.title, term) {
        return fields.title.to_string();
    }

    if let Some(summary) = fields
        .summary
        .filter(|summary| contains_case_insensitive(summary, term))
    {
        return extract_window(summary, term, radius);
    }

    if let Some(content) = fields.content {
        let cleaned = strip_markup(content);
        if contains_case_insensitive(&cleaned, term) {
            return extract_window(&cleaned, term, radius);
        }
    }

    fields.summary.unwrap_or_default().to_string()
}

/// First field (title, summary, content) containing `term`.
///
/// Content is tested as stored, markup included.
pub fn classify_match(fields: &SearchableText<'_>, term: &str) -> MatchField {
    if contains_case_insensitive(fields.title, term) {
        MatchField::Title
    } else if fields
        .summary
        .is_some_and(|summary| contains_case_insensitive(summary, term))
    {
        MatchField::Summary
    } else if fields
        .content
        .is_some_and(|content| contains_case_insensitive(content, term))
    {
        MatchField::Content
    } else {
        MatchField::Unknown
    }
}

/// Compute both preview fields for a hit using the default radius.
pub fn preview(fields: &SearchableText<'_>, term: &str) -> SearchPreview {
    SearchPreview {
        snippet: build_snippet(fields, term, DEFAULT_SNIPPET_RADIUS),
        match_field: classify_match(fields, term),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn fields<'a>(
        title: &'a str,
        summary: Option<&'a str>,
        content: Option<&'a str>,
    ) -> SearchableText<'a> {
        SearchableText {
            title,
            summary,
            content,
        }
    }

    // -- find_case_insensitive ----------------------------------------------

    #[test]
    fn find_ignores_case() {
        assert_eq!(find_case_insensitive("Hello World", "WORLD"), Some(6));
        assert_eq!(find_case_insensitive("Hello World", "xyz"), None);
    }

    #[test]
    fn find_returns_char_index_for_multibyte_text() {
        // Each Hebrew letter is two bytes in UTF-8.
        assert_eq!(find_case_insensitive("שלום עולם", "עולם"), Some(5));
    }

    #[test]
    fn find_maps_expanding_lowercase_back_to_source_index() {
        // 'İ' lowercases to two chars; the match after it must still point
        // at the right source character.
        assert_eq!(find_case_insensitive("İab", "ab"), Some(1));
    }

    #[test]
    fn find_empty_term_matches_start() {
        assert_eq!(find_case_insensitive("anything", ""), Some(0));
    }

    #[test]
    fn find_term_longer_than_text() {
        assert_eq!(find_case_insensitive("ab", "abc"), None);
    }

    // -- escape_like --------------------------------------------------------

    #[test]
    fn escape_like_escapes_metacharacters() {
        assert_eq!(escape_like(r"50%_off\now"), r"50\%\_off\\now");
        assert_eq!(containment_pattern("agent"), "%agent%");
    }

    // -- strip_markup -------------------------------------------------------

    #[test]
    fn strip_markup_removes_tags_and_collapses_whitespace() {
        assert_eq!(strip_markup("<p>Hello <b>world</b></p>"), "Hello world");
    }

    #[test]
    fn strip_markup_collapses_newlines_and_tabs() {
        assert_eq!(
            strip_markup("<div>\n\tline one</div>\n<div>line   two</div>"),
            "line one line two"
        );
    }

    #[test]
    fn strip_markup_leaves_plain_text_untouched() {
        assert_eq!(strip_markup("plain text"), "plain text");
    }

    // -- extract_window -----------------------------------------------------

    #[test]
    fn window_cuts_both_sides() {
        assert_eq!(
            extract_window("0123456789ABCDEFGHIJ", "ABC", 3),
            "...789ABCDEF..."
        );
    }

    #[test]
    fn window_at_end_has_no_trailing_ellipsis() {
        assert_eq!(extract_window("0123456789ABCDEFGHIJ", "HIJ", 3), "...EFGHIJ");
    }

    #[test]
    fn window_at_start_has_no_leading_ellipsis() {
        assert_eq!(extract_window("0123456789ABCDEFGHIJ", "012", 3), "012345...");
    }

    #[test]
    fn window_covering_whole_text_is_unmarked() {
        assert_eq!(extract_window("short text", "text", 150), "short text");
    }

    #[test]
    fn window_keeps_original_casing() {
        assert_eq!(extract_window("xxAgentxx", "agent", 1), "...xAgentx...");
    }

    #[test]
    fn window_without_match_returns_prefix() {
        assert_eq!(extract_window("abcdefghij", "zzz", 2), "abcd");
    }

    #[test]
    fn window_counts_characters_not_bytes() {
        assert_eq!(extract_window("אבגדהוזחטי", "ה", 1), "...דהו...");
    }

    #[test]
    fn window_ends_at_matched_source_char_when_folding_expands() {
        // "İ" lowercases to "i\u{307}", so a two-char term matches one source char.
        assert_eq!(extract_window("xxİyy", "i\u{307}", 0), "...İ...");
        assert_eq!(extract_window("xxİyy", "i\u{307}", 1), "...xİy...");
    }

    #[test]
    fn match_span_covers_source_chars() {
        assert_eq!(find_match_span("Hello World", "world"), Some((6, 11)));
        assert_eq!(find_match_span("xxİyy", "i\u{307}"), Some((2, 3)));
        assert_eq!(find_match_span("abc", ""), Some((0, 0)));
        assert_eq!(find_match_span("abc", "z"), None);
    }

    // -- build_snippet ------------------------------------------------------

    #[test]
    fn title_match_returns_full_title() {
        let f = fields("Setup Guide", Some("guide summary"), Some("guide"));
        assert_eq!(build_snippet(&f, "GUIDE", 3), "Setup Guide");
    }

    #[test]
    fn summary_match_returns_window() {
        let f = fields("Title", Some("0123456789ABCDEFGHIJ"), None);
        assert_eq!(build_snippet(&f, "abc", 3), "...789ABCDEF...");
    }

    #[test]
    fn content_match_is_stripped_of_markup() {
        let f = fields(
            "Setup Guide",
            None,
            Some("<p>Install the <b>agent</b> first</p>"),
        );
        let snippet = build_snippet(&f, "agent", DEFAULT_SNIPPET_RADIUS);
        assert_eq!(snippet, "Install the agent first");
        assert!(!snippet.contains('<'));
    }

    #[test]
    fn term_split_by_markup_falls_back_to_summary() {
        // Tags become spaces, so "ag<b>ent" cleans to "ag ent".
        let f = fields("Title", Some("the summary"), Some("ag<b>ent</b>"));
        assert_eq!(build_snippet(&f, "agent", 10), "the summary");
    }

    #[test]
    fn no_match_without_summary_is_empty() {
        let f = fields("Title", None, None);
        assert_eq!(build_snippet(&f, "absent", 10), "");
    }

    // -- classify_match -----------------------------------------------------

    #[test]
    fn classify_prefers_title_then_summary_then_content() {
        let all = fields("agent", Some("agent"), Some("agent"));
        assert_matches!(classify_match(&all, "AGENT"), MatchField::Title);

        let summary_and_content = fields("x", Some("agent"), Some("agent"));
        assert_matches!(
            classify_match(&summary_and_content, "agent"),
            MatchField::Summary
        );

        let content_only = fields("x", Some("y"), Some("<i>agent</i>"));
        assert_matches!(classify_match(&content_only, "agent"), MatchField::Content);
    }

    #[test]
    fn classify_reports_unknown_when_nothing_matches() {
        let f = fields("x", None, None);
        assert_matches!(classify_match(&f, "agent"), MatchField::Unknown);
    }

    #[test]
    fn classify_is_independent_of_snippet_choice() {
        // Raw content holds the term, cleaned content does not.
        let f = fields("x", Some("summary"), Some("<b>agent</b>"));
        let p = preview(&f, "<b>agent");
        assert_eq!(p.match_field, MatchField::Content);
        assert_eq!(p.snippet, "summary");
    }

    #[test]
    fn match_field_serializes_lowercase() {
        let json = serde_json::to_string(&MatchField::Content).unwrap();
        assert_eq!(json, "\"content\"");
        let back: MatchField = serde_json::from_str("\"unknown\"").unwrap();
        assert_eq!(back, MatchField::Unknown);
    }

    // -- preview ------------------------------------------------------------

    #[test]
    fn preview_scenario_content_hit() {
        let f = fields(
            "Setup Guide",
            None,
            Some("<p>Install the <b>agent</b> first</p>"),
        );
        let p = preview(&f, "agent");
        assert_eq!(p.match_field, MatchField::Content);
        assert!(p.snippet.contains("agent"));
        assert!(!p.snippet.contains("<b>"));
    }

    #[test]
    fn preview_is_deterministic() {
        let f = fields("Guide", Some("long summary about agents"), None);
        assert_eq!(preview(&f, "agent"), preview(&f, "agent"));
    }
}

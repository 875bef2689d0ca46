//! Word-token extraction.
//!
//! Walks `\c`, `\v` and `\w ...\w*` markers in document order and yields one
//! token per word, tagged with the current chapter/verse and any Strong's
//! ids found in the word's attributes. Tokens outside a chapter/verse
//! context are dropped.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::vocabulary::strongs;

/// One word token from the USFM source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub chapter: u32,
    pub verse: u32,
    /// Surface text as rendered in the translation.
    pub surface: String,
    /// Normalized Strong's ids attributed to this word. May be empty.
    pub strongs: Vec<String>,
}

/// Chapter, verse and word markers, in document order.
static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\\c\s+(\d+)|\\v\s+(\d+)|\\w\s(.+?)\\w\*").expect("Invalid marker regex")
});

/// `strong="H1234,G5678"` attributes; prefixed forms like `x-strong=` match
/// the same suffix.
static STRONG_ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"strong="([^"]*)""#).expect("Invalid strong attribute regex"));

/// Extract word tokens from raw USFM text.
pub fn tokenize(usfm: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chapter = 0u32;
    let mut verse = 0u32;

    for caps in MARKER_RE.captures_iter(usfm) {
        if let Some(c) = caps.get(1) {
            chapter = c.as_str().parse().unwrap_or(0);
            verse = 0;
        } else if let Some(v) = caps.get(2) {
            verse = v.as_str().parse().unwrap_or(0);
        } else if let Some(w) = caps.get(3) {
            if chapter == 0 || verse == 0 {
                continue;
            }
            let body = w.as_str();
            let (surface, attrs) = match body.split_once('|') {
                Some((s, a)) => (s, a),
                None => (body, ""),
            };
            let surface = surface.trim();
            if surface.is_empty() {
                continue;
            }
            tokens.push(Token {
                chapter,
                verse,
                surface: surface.to_string(),
                strongs: parse_strong_ids(attrs),
            });
        }
    }

    tokens
}

/// Pull every valid Strong's id out of a word's attribute string.
///
/// Ids inside one attribute value may be separated by commas, whitespace or
/// `|`. Anything that does not normalize to the id shape is discarded.
fn parse_strong_ids(attrs: &str) -> Vec<String> {
    let mut ids = Vec::new();
    for caps in STRONG_ATTR_RE.captures_iter(attrs) {
        for raw in caps[1].split(|c: char| c == ',' || c == '|' || c.is_whitespace()) {
            // attribute values sometimes carry a language prefix (`b:H3068`)
            let raw = raw.rsplit(':').next().unwrap_or(raw);
            if let Some(id) = strongs::normalize(raw) {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"\id GEN
\c 1
\p
\v 1 \w In|x-occurrence="1" x-occurrences="1"\w* \w the|strong="H9000"\w* \w beginning|strong="H7225"\w*
\v 2 \w God|strong="H430"\w* \w created|strong="H1254a"\w*
\c 2
\v 1 \w heavens|x-strong="H8064"\w*
"#;

    #[test]
    fn test_tokenize_tracks_chapter_and_verse() {
        let tokens = tokenize(SAMPLE);
        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens[0].surface, "In");
        assert_eq!((tokens[0].chapter, tokens[0].verse), (1, 1));
        assert_eq!((tokens[5].chapter, tokens[5].verse), (2, 1));
    }

    #[test]
    fn test_tokenize_normalizes_strongs() {
        let tokens = tokenize(SAMPLE);
        assert!(tokens[0].strongs.is_empty());
        assert_eq!(tokens[3].strongs, vec!["H430"]);
        assert_eq!(tokens[4].strongs, vec!["H1254a"]);
        // x-strong= prefix accepted
        assert_eq!(tokens[5].strongs, vec!["H8064"]);
    }

    #[test]
    fn test_tokens_outside_verse_context_dropped() {
        let usfm = r#"\w orphan|strong="H1"\w* \c 1 \w still orphan|strong="H2"\w* \v 1 \w kept|strong="H3"\w*"#;
        let tokens = tokenize(usfm);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].surface, "kept");
    }

    #[test]
    fn test_multiple_ids_in_one_attribute() {
        let ids = parse_strong_ids(r#"strong="H1254,G2316 H430""#);
        assert_eq!(ids, vec!["H1254", "G2316", "H430"]);
    }

    #[test]
    fn test_invalid_ids_discarded() {
        let ids = parse_strong_ids(r#"strong="X999,H123,,b:H3068""#);
        assert_eq!(ids, vec!["H123", "H3068"]);
    }
}

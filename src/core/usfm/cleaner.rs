//! Markup stripping and verse splitting.
//!
//! Produces the clean English text used by the verse scanner. The strip
//! passes run in a fixed order, each applied globally before the next, so
//! the output is stable for any interleaving of alignment markup.

use once_cell::sync::Lazy;
use regex::Regex;

/// `\w surface|attrs\w*` -> `surface` (attrs optional).
static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\w ([^|\\]*?)(?:\|[^\\]*)?\\w\*").expect("Invalid word regex"));

/// Alignment start/end milestones.
static ZALN_S_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\zaln-s[^*]*\*").expect("Invalid zaln-s regex"));
static ZALN_E_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\zaln-e\\\*").expect("Invalid zaln-e regex"));

/// Keyword start/end milestones.
static K_S_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\k-s[^*]*\*").expect("Invalid k-s regex"));
static K_E_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\k-e\\\*").expect("Invalid k-e regex"));

/// Three or more consecutive newlines.
static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("Invalid blank regex"));

/// A lingering `|attr...` immediately before the next marker.
static DANGLING_ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\|[^\\]*(\\)").expect("Invalid dangling attr regex"));

/// Poetry / paragraph / translation-section markers.
static Q_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\q[a-z0-9]*(?: |$)").expect("Invalid q marker regex"));
static P_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\p(?: |$)").expect("Invalid p marker regex"));
static TS_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\ts\\\*").expect("Invalid ts marker regex"));

/// Footnotes, including their body.
static FOOTNOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\\f .*?\\f\*").expect("Invalid footnote regex"));

/// Chapter/verse markers for splitting.
static CV_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\([cv])\s*(\d+)").expect("Invalid chapter/verse regex"));

/// Strip all alignment and structural markup, leaving `\c`/`\v` markers and
/// plain verse text, one marker per line.
pub fn clean(usfm: &str) -> String {
    let mut text = WORD_RE.replace_all(usfm, "$1").into_owned();
    text = ZALN_S_RE.replace_all(&text, "").into_owned();
    text = ZALN_E_RE.replace_all(&text, "").into_owned();
    text = K_S_RE.replace_all(&text, "").into_owned();
    text = K_E_RE.replace_all(&text, "").into_owned();
    text = BLANK_RUN_RE.replace_all(&text, "\n\n").into_owned();
    text = DANGLING_ATTR_RE.replace_all(&text, "$1").into_owned();
    text = text.replace('\n', " ");
    text = text.replace("\\v ", "\n\\v ");
    text = text.replace("\\c ", "\n\\c ");
    text = Q_MARKER_RE.replace_all(&text, " ").into_owned();
    text = P_MARKER_RE.replace_all(&text, " ").into_owned();
    text = TS_MARKER_RE.replace_all(&text, " ").into_owned();
    text = FOOTNOTE_RE.replace_all(&text, " ").into_owned();
    text = text.replace(['{', '}'], "");

    match text.find("\\c ") {
        Some(start) => text[start..].to_string(),
        None => text,
    }
}

/// One verse of clean text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    pub chapter: u32,
    pub verse: u32,
    /// Verse body with whitespace collapsed.
    pub text: String,
}

/// Split cleaned text into verses.
///
/// Walks `\c`/`\v` markers in order; each verse body runs up to the next
/// marker. Verses before the first chapter marker are dropped.
pub fn verses(cleaned: &str) -> Vec<Verse> {
    let mut out = Vec::new();
    let mut chapter = 0u32;

    let matches: Vec<(usize, usize, char, u32)> = CV_RE
        .captures_iter(cleaned)
        .filter_map(|caps| {
            let m = caps.get(0)?;
            let kind = caps[1].chars().next()?;
            let num: u32 = caps[2].parse().ok()?;
            Some((m.start(), m.end(), kind, num))
        })
        .collect();

    for (i, &(_, end, kind, num)) in matches.iter().enumerate() {
        match kind {
            'c' => chapter = num,
            'v' => {
                if chapter == 0 {
                    continue;
                }
                let tail_end = matches
                    .get(i + 1)
                    .map(|&(start, ..)| start)
                    .unwrap_or(cleaned.len());
                let body = collapse_whitespace(&cleaned[end..tail_end]);
                out.push(Verse {
                    chapter,
                    verse: num,
                    text: body,
                });
            }
            _ => {}
        }
    }

    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

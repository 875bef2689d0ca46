//! Strong's Pivot Index
//!
//! Inverts the vocabulary into two lookup maps: `singles` (one Strong's id,
//! registered under both its full form and its base) and `sequences`
//! (multi-lemma phrases, keyed by the base of their first id, longest first).
//! Articles without Strong's data contribute to neither map but are kept
//! around for disambiguation.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::Vocabulary;

/// `H` = Hebrew, `G` = Greek; optional final letter disambiguates homographs.
static STRONG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[HG]\d+[a-f]?$").expect("Invalid Strong's id regex"));

/// Normalize a raw Strong's id to uppercase letter + digits + lowercase
/// suffix. Returns `None` for anything that does not match the id shape.
pub fn normalize(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let mut chars = raw.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    let rest = chars.as_str();
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let candidate = format!(
        "{letter}{}{}",
        &rest[..digits_end],
        rest[digits_end..].to_ascii_lowercase()
    );
    STRONG_RE.is_match(&candidate).then_some(candidate)
}

/// Strip the homograph letter, if any: `H0430a` -> `H0430`.
pub fn base(sid: &str) -> &str {
    sid.strip_suffix(|c: char| c.is_ascii_lowercase())
        .unwrap_or(sid)
}

/// Whether the id carries a homograph letter.
pub fn has_homograph_suffix(sid: &str) -> bool {
    base(sid).len() != sid.len()
}

/// One multi-lemma phrase registered under its first id's base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceEntry {
    /// Article path the phrase belongs to.
    pub article: String,
    /// The phrase's Strong's bases, in order. Always length >= 2.
    pub bases: Vec<String>,
}

impl SequenceEntry {
    /// Number of lemmas in the phrase.
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

/// The inverted index: Strong's id -> candidate articles.
#[derive(Debug, Default)]
pub struct StrongsIndex {
    /// Single-lemma lookups. Each id is registered under both its full form
    /// and its base. Values are article paths in lexicographic order.
    singles: HashMap<String, Vec<String>>,
    /// Phrase lookups keyed by the base of the first id, longest first.
    sequences: HashMap<String, Vec<SequenceEntry>>,
    /// Articles with no Strong's data at all.
    unkeyed: Vec<String>,
}

impl StrongsIndex {
    /// Build the index from a loaded vocabulary.
    ///
    /// The vocabulary iterates in lexicographic path order, so candidate
    /// lists and sequence tie order are deterministic across runs.
    pub fn build(vocab: &Vocabulary) -> Self {
        let mut index = Self::default();

        for article in vocab.iter() {
            if article.strongs.is_empty() {
                index.unkeyed.push(article.path.clone());
                continue;
            }
            for seq in &article.strongs {
                match seq.as_slice() {
                    [] => {}
                    [sid] => {
                        index.register_single(sid, &article.path);
                        let b = base(sid);
                        if b != sid {
                            index.register_single(b, &article.path);
                        }
                    }
                    _ => {
                        let entry = SequenceEntry {
                            article: article.path.clone(),
                            bases: seq.iter().map(|s| base(s).to_string()).collect(),
                        };
                        index
                            .sequences
                            .entry(entry.bases[0].clone())
                            .or_default()
                            .push(entry);
                    }
                }
            }
        }

        // Longest phrase wins; stable sort keeps article order on ties.
        for entries in index.sequences.values_mut() {
            entries.sort_by_key(|e| std::cmp::Reverse(e.len()));
        }

        log::debug!(
            "Strong's index: {} single keys, {} sequence heads, {} unkeyed articles",
            index.singles.len(),
            index.sequences.len(),
            index.unkeyed.len()
        );
        index
    }

    fn register_single(&mut self, sid: &str, article: &str) {
        let entry = self.singles.entry(sid.to_string()).or_default();
        if !entry.iter().any(|a| a == article) {
            entry.push(article.to_string());
        }
    }

    /// Candidate articles for a single Strong's id.
    ///
    /// Looks up the full form first; when that yields nothing and the id
    /// carries a homograph letter, falls back to the base.
    pub fn singles_for(&self, sid: &str) -> &[String] {
        if let Some(articles) = self.singles.get(sid) {
            if !articles.is_empty() {
                return articles;
            }
        }
        if has_homograph_suffix(sid) {
            if let Some(articles) = self.singles.get(base(sid)) {
                return articles;
            }
        }
        &[]
    }

    /// Phrase entries whose first lemma has the given base, longest first.
    pub fn sequences_for(&self, first_base: &str) -> &[SequenceEntry] {
        self.sequences
            .get(first_base)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Articles with no Strong's data; they only ever participate in
    /// disambiguation.
    pub fn unkeyed(&self) -> &[String] {
        &self.unkeyed
    }
}

//! Term Trie
//!
//! A case-insensitive, word-boundary-aware prefix trie over the expanded
//! term dictionary. Nodes live in a flat arena; terminal payloads are small
//! ordered entry lists. Matches extend across hyphens and apostrophes before
//! boundary testing.

use std::collections::HashMap;

/// One payload stored at a terminal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermEntry {
    /// The headword this variant belongs to.
    pub term: String,
    /// Articles that carry the headword, in lexicographic path order.
    pub articles: Vec<String>,
    /// 0 = original headword, 1 = morphological variant.
    pub priority: u8,
}

#[derive(Debug, Default)]
struct Node {
    children: HashMap<char, usize>,
    /// Indices into `TermTrie::entries`.
    entries: Vec<usize>,
}

/// A hit returned by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieMatch {
    pub term: String,
    pub articles: Vec<String>,
    /// Surface text over the extended span, original casing.
    pub matched_text: String,
    /// Length of the raw trie hit; the scanner advances by this.
    pub original_len: usize,
    /// Length after hyphen/apostrophe extension; for display.
    pub extended_len: usize,
    pub priority: u8,
}

/// Verse text prepared for scanning: original characters plus their
/// lowercase counterparts, index-aligned.
#[derive(Debug)]
pub struct VerseChars {
    original: Vec<char>,
    lower: Vec<char>,
}

impl VerseChars {
    pub fn new(text: &str) -> Self {
        let original: Vec<char> = text.chars().collect();
        let lower: Vec<char> = original
            .iter()
            .map(|c| c.to_lowercase().next().unwrap_or(*c))
            .collect();
        Self { original, lower }
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// Original character at `idx`.
    pub fn char_at(&self, idx: usize) -> char {
        self.original[idx]
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.original[start..end].iter().collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '\u{2018}')
}

fn is_extender(c: char) -> bool {
    c == '-' || is_apostrophe(c)
}

/// Whether the position between `idx - 1` and `idx` is a word boundary.
fn boundary_before(chars: &VerseChars, idx: usize) -> bool {
    idx == 0 || !is_word_char(chars.original[idx - 1])
}

/// Whether the position between `idx - 1` and `idx` ends a word.
fn boundary_after(chars: &VerseChars, idx: usize) -> bool {
    idx >= chars.len() || !is_word_char(chars.original[idx])
}

/// The trie. Keys are lowercased at insertion; scanning matches against the
/// lowercased verse and reports original-cased text.
#[derive(Debug)]
pub struct TermTrie {
    nodes: Vec<Node>,
    entries: Vec<TermEntry>,
}

impl Default for TermTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl TermTrie {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            entries: Vec::new(),
        }
    }

    /// Number of distinct payload entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Register `text` as a lookup key for `(term, article, priority)`.
    ///
    /// The same key inserted for another article merges into the existing
    /// entry when term and priority agree, keeping article order stable.
    pub fn insert(&mut self, text: &str, term: &str, article: &str, priority: u8) {
        let key = text.to_lowercase();
        if key.is_empty() {
            return;
        }

        let mut node_idx = 0;
        for c in key.chars() {
            node_idx = match self.nodes[node_idx].children.get(&c) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node_idx].children.insert(c, next);
                    next
                }
            };
        }

        // Terms differing only in case name the same surface; merge them so
        // every article sharing the key lands in one entry.
        for &entry_idx in &self.nodes[node_idx].entries {
            let entry = &mut self.entries[entry_idx];
            if entry.term.eq_ignore_ascii_case(term) && entry.priority == priority {
                if !entry.articles.iter().any(|a| a == article) {
                    entry.articles.push(article.to_string());
                }
                return;
            }
        }

        let entry_idx = self.entries.len();
        self.entries.push(TermEntry {
            term: term.to_string(),
            articles: vec![article.to_string()],
            priority,
        });
        self.nodes[node_idx].entries.push(entry_idx);
    }

    /// All boundary-valid matches starting at `start`, longest extended span
    /// first, originals before variants.
    pub fn matches_at(&self, chars: &VerseChars, start: usize) -> Vec<TrieMatch> {
        let mut raw: Vec<(usize, &[usize])> = Vec::new();

        let mut node_idx = 0;
        let mut pos = start;
        while pos < chars.len() {
            match self.nodes[node_idx].children.get(&chars.lower[pos]) {
                Some(&next) => {
                    node_idx = next;
                    pos += 1;
                    if !self.nodes[node_idx].entries.is_empty() {
                        raw.push((pos - start, &self.nodes[node_idx].entries));
                    }
                }
                None => break,
            }
        }

        let mut matches = Vec::new();
        for (len, entry_indices) in raw {
            let (ext_start, ext_end) = extend_span(chars, start, start + len);
            if !boundary_before(chars, ext_start) || !boundary_after(chars, ext_end) {
                continue;
            }
            for &entry_idx in entry_indices {
                let entry = &self.entries[entry_idx];
                matches.push(TrieMatch {
                    term: entry.term.clone(),
                    articles: entry.articles.clone(),
                    matched_text: chars.slice(ext_start, ext_end),
                    original_len: len,
                    extended_len: ext_end - ext_start,
                    priority: entry.priority,
                });
            }
        }

        matches.sort_by(|a, b| {
            b.extended_len
                .cmp(&a.extended_len)
                .then(a.priority.cmp(&b.priority))
        });
        matches
    }
}

/// Extend a raw span across hyphens and apostrophes.
///
/// Backward: a single `-` or apostrophe immediately preceded by a word
/// character pulls in the whole preceding word. Forward: each `-` or
/// apostrophe followed by a word character pulls in the following word; a
/// trailing apostrophe with no word character after it is still included
/// (possessive `s'`).
fn extend_span(chars: &VerseChars, start: usize, end: usize) -> (usize, usize) {
    let mut s = start;
    if s >= 2 && is_extender(chars.original[s - 1]) && is_word_char(chars.original[s - 2]) {
        let mut back = s - 2;
        while back > 0 && is_word_char(chars.original[back - 1]) {
            back -= 1;
        }
        s = back;
    }

    let mut e = end;
    while e < chars.len() && is_extender(chars.original[e]) {
        if e + 1 < chars.len() && is_word_char(chars.original[e + 1]) {
            e += 2;
            while e < chars.len() && is_word_char(chars.original[e]) {
                e += 1;
            }
        } else if is_apostrophe(chars.original[e]) {
            e += 1;
            break;
        } else {
            break;
        }
    }

    (s, e)
}

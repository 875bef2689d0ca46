//! English-first generation.
//!
//! Scans each verse of the clean English text with the term trie and emits
//! one row per hit. Greedy resolution: at each start position the longest,
//! then highest-priority match wins, and the scanner advances past the
//! unextended length so later matches can begin inside an extended tail.

use std::collections::HashMap;

use crate::core::morphology;
use crate::core::rows::{self, IdGenerator, Row};
use crate::core::trie::{TermTrie, TrieMatch, VerseChars};
use crate::core::usfm;
use crate::core::vocabulary::Vocabulary;

use super::build_trie;

/// The English-first pipeline. The trie is built once per invocation and
/// read-only afterwards.
pub struct EnglishFirstPipeline<'a> {
    vocab: &'a Vocabulary,
    trie: TermTrie,
    ids: IdGenerator,
}

impl<'a> EnglishFirstPipeline<'a> {
    pub fn new(vocab: &'a Vocabulary) -> Self {
        Self::with_ids(vocab, IdGenerator::new())
    }

    /// Pipeline with an injected ID generator (seeded in tests).
    pub fn with_ids(vocab: &'a Vocabulary, ids: IdGenerator) -> Self {
        Self {
            vocab,
            trie: build_trie(vocab),
            ids,
        }
    }

    /// Generate rows for a whole USFM book, verse by verse in canonical
    /// order. `OrigWords` carries the English surface; the driver hands the
    /// result to the companion services afterwards.
    pub fn generate(&mut self, usfm_text: &str) -> Vec<Row> {
        let cleaned = usfm::clean(usfm_text);
        let verses = usfm::verses(&cleaned);

        let mut out = Vec::new();
        for verse in &verses {
            self.scan_verse(verse.chapter, verse.verse, &verse.text, &mut out);
        }
        log::info!("English-first scan produced {} rows", out.len());
        out
    }

    fn scan_verse(&mut self, chapter: u32, verse: u32, text: &str, out: &mut Vec<Row>) {
        let chars = VerseChars::new(text);
        let mut occurrences: HashMap<String, u32> = HashMap::new();
        let mut pos = 0;

        while pos < chars.len() {
            let matches = self.trie.matches_at(&chars, pos);
            let Some(best) = matches.into_iter().next() else {
                pos += 1;
                continue;
            };

            let advance = best.original_len;
            out.push(self.emit_row(chapter, verse, best, &mut occurrences));
            pos += advance;
        }
    }

    fn emit_row(
        &mut self,
        chapter: u32,
        verse: u32,
        m: TrieMatch,
        occurrences: &mut HashMap<String, u32>,
    ) -> Row {
        let primary = preferred_article(&m);
        let tags = self
            .vocab
            .get(&primary)
            .map(|a| a.category.tag().to_string())
            .unwrap_or_default();

        let count = occurrences
            .entry(m.matched_text.clone())
            .and_modify(|c| *c += 1)
            .or_insert(1);

        let variant_of = if is_known_inflection(&m.matched_text, &m.term) {
            String::new()
        } else {
            m.term.clone()
        };

        Row {
            reference: format!("{chapter}:{verse}"),
            id: self.ids.next_id(),
            tags,
            orig_words: m.matched_text.clone(),
            occurrence: *count,
            twlink: rows::tw_link(&primary),
            variant_of,
            disambiguation: rows::format_disambiguation(&m.articles),
            ..Default::default()
        }
    }
}

/// Choose the primary article for a hit.
///
/// Shared-term hits keep the whole article list for disambiguation; the
/// first article wins except for the god/falsegod pair, where the surface's
/// capitalization decides.
fn preferred_article(m: &TrieMatch) -> String {
    if m.matched_text.eq_ignore_ascii_case("god")
        && m.articles.iter().any(|a| a == "kt/god")
        && m.articles.iter().any(|a| a == "kt/falsegod")
    {
        let capitalized = m
            .matched_text
            .chars()
            .next()
            .is_some_and(|c| c.is_uppercase());
        return if capitalized {
            "kt/god".to_string()
        } else {
            "kt/falsegod".to_string()
        };
    }
    m.articles.first().cloned().unwrap_or_default()
}

/// Whether the surface is the headword itself or one of its documented
/// inflections (plural, depluralized, `-ed`/`-ing`, irregular forms),
/// compared case-insensitively.
fn is_known_inflection(surface: &str, term: &str) -> bool {
    let eq = |candidate: &str| surface.eq_ignore_ascii_case(candidate);
    if eq(term) {
        return true;
    }
    morphology::plurals_of(term).iter().any(|p| eq(p))
        || morphology::depluralized_of(term).iter().any(|d| eq(d))
        || morphology::verb_inflections_of(term).iter().any(|f| eq(f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vocabulary::Category;

    fn vocab_of(entries: &[(Category, &str, &[&str])]) -> Vocabulary {
        let mut vocab = Vocabulary::default();
        for (category, slug, terms) in entries {
            vocab.insert(Vocabulary::article(*category, slug, terms, &[]));
        }
        vocab
    }

    fn pipeline(vocab: &Vocabulary) -> EnglishFirstPipeline<'_> {
        EnglishFirstPipeline::with_ids(vocab, IdGenerator::with_seed(1))
    }

    const USFM_HEAD: &str = "\\c 1\n\\v 1 ";

    #[test]
    fn test_basic_keyterm_match() {
        let vocab = vocab_of(&[(Category::KeyTerm, "god", &["God"])]);
        let mut pipeline = pipeline(&vocab);
        let rows = pipeline.generate(&format!("{USFM_HEAD}In the beginning God created"));

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.reference, "1:1");
        assert_eq!(row.tags, "keyterm");
        assert_eq!(row.orig_words, "God");
        assert_eq!(row.occurrence, 1);
        assert_eq!(row.twlink, "rc://*/tw/dict/bible/kt/god");
        assert_eq!(row.variant_of, "");
        assert_eq!(row.disambiguation, "");
    }

    #[test]
    fn test_occurrence_counting() {
        let vocab = vocab_of(&[(Category::KeyTerm, "grace", &["grace"])]);
        let mut pipeline = pipeline(&vocab);
        let rows = pipeline.generate(&format!("{USFM_HEAD}grace upon grace"));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].orig_words, "grace");
        assert_eq!(rows[0].occurrence, 1);
        assert_eq!(rows[1].occurrence, 2);
    }

    #[test]
    fn test_inflection_suppresses_variant_column() {
        let vocab = vocab_of(&[(Category::KeyTerm, "love", &["love"])]);
        let mut pipeline = pipeline(&vocab);
        let rows = pipeline.generate(&format!("{USFM_HEAD}we are loving"));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].orig_words, "loving");
        assert_eq!(rows[0].variant_of, "");
    }

    #[test]
    fn test_god_falsegod_case_rule() {
        let vocab = vocab_of(&[
            (Category::KeyTerm, "god", &["God"]),
            (Category::KeyTerm, "falsegod", &["god"]),
        ]);
        let mut pipeline = pipeline(&vocab);
        let rows = pipeline.generate(&format!("{USFM_HEAD}He is God, not a god"));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].orig_words, "God");
        assert_eq!(rows[0].twlink, "rc://*/tw/dict/bible/kt/god");
        assert_eq!(rows[1].orig_words, "god");
        assert_eq!(rows[1].twlink, "rc://*/tw/dict/bible/kt/falsegod");
        for row in &rows {
            assert_eq!(row.disambiguation, "(kt/falsegod, kt/god)");
        }
    }

    #[test]
    fn test_hyphen_extension_row() {
        let vocab = vocab_of(&[(Category::KeyTerm, "god", &["God"])]);
        let mut pipeline = pipeline(&vocab);
        let rows = pipeline.generate(&format!("{USFM_HEAD}a God-fearing man"));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].orig_words, "God-fearing");
        assert_eq!(rows[0].reference, "1:1");
        // beyond plural/-ed/-ing, so the headword is recorded
        assert_eq!(rows[0].variant_of, "God");
    }

    #[test]
    fn test_possessive_extension_row() {
        let vocab = vocab_of(&[(Category::KeyTerm, "prophet", &["prophet"])]);
        let mut pipeline = pipeline(&vocab);
        let rows = pipeline.generate(&format!("{USFM_HEAD}the prophets' message"));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].orig_words, "prophets'");
    }

    #[test]
    fn test_verse_order_and_ids_unique() {
        let vocab = vocab_of(&[
            (Category::KeyTerm, "grace", &["grace"]),
            (Category::KeyTerm, "love", &["love"]),
        ]);
        let mut pipeline = pipeline(&vocab);
        let usfm = "\\c 1\n\\v 1 grace and love\n\\v 2 love and grace\n\\c 2\n\\v 1 grace";
        let rows = pipeline.generate(usfm);

        assert_eq!(rows.len(), 5);
        let refs: Vec<&str> = rows.iter().map(|r| r.reference.as_str()).collect();
        assert_eq!(refs, vec!["1:1", "1:1", "1:2", "1:2", "2:1"]);
        // in-verse order follows surface position
        assert_eq!(rows[0].orig_words, "grace");
        assert_eq!(rows[1].orig_words, "love");
        assert_eq!(rows[2].orig_words, "love");
        assert_eq!(rows[3].orig_words, "grace");

        let mut ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }
}

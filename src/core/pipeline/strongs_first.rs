//! Strong's-first generation.
//!
//! Walks USFM word tokens in document order. Multi-lemma phrases are tried
//! first (longest wins, consuming their tokens); remaining tokens emit one
//! row per `(Strong's id, article)` pair from the singles map. A later
//! refinement pass runs every row through the article selector and routes
//! rows without a match to the no-match output.

use std::collections::HashMap;

use crate::core::rows::{self, IdGenerator, Row};
use crate::core::selector::{ArticleSelector, SelectOutcome};
use crate::core::usfm::{self, Token};
use crate::core::vocabulary::{strongs, Vocabulary};

use super::GeneratedOutput;

/// Draft rows plus the Strong's id each row was emitted for, keyed by row
/// ID. The driver round-trips `rows` through the companion services before
/// refinement.
#[derive(Debug, Default)]
pub struct StrongsFirstDraft {
    pub rows: Vec<Row>,
    sids: HashMap<String, String>,
    /// Rows emitted for a multi-lemma phrase. The exact lemma alignment
    /// outweighs surface evidence, so refinement leaves them untouched.
    sequence_ids: std::collections::HashSet<String>,
}

impl StrongsFirstDraft {
    /// The Strong's id recorded for a row.
    pub fn sid_of(&self, row_id: &str) -> Option<&str> {
        self.sids.get(row_id).map(String::as_str)
    }
}

/// The Strong's-first pipeline.
pub struct StrongsFirstPipeline<'a> {
    vocab: &'a Vocabulary,
    index: &'a strongs::StrongsIndex,
    ids: IdGenerator,
}

impl<'a> StrongsFirstPipeline<'a> {
    pub fn new(vocab: &'a Vocabulary, index: &'a strongs::StrongsIndex) -> Self {
        Self::with_ids(vocab, index, IdGenerator::new())
    }

    /// Pipeline with an injected ID generator (seeded in tests).
    pub fn with_ids(
        vocab: &'a Vocabulary,
        index: &'a strongs::StrongsIndex,
        ids: IdGenerator,
    ) -> Self {
        Self { vocab, index, ids }
    }

    /// Emit draft rows for a whole USFM book.
    ///
    /// `OrigWords` and the GL columns both carry the English surface at this
    /// point; the converter replaces `OrigWords` later.
    pub fn generate(&mut self, usfm_text: &str) -> StrongsFirstDraft {
        let tokens = usfm::tokenize(usfm_text);
        let mut draft = StrongsFirstDraft::default();
        let mut occurrences: HashMap<(u32, u32, String), u32> = HashMap::new();

        let mut i = 0;
        while i < tokens.len() {
            let token = &tokens[i];

            if let Some((entry_article, sid, len)) = self.sequence_at(&tokens, i) {
                let surface = tokens[i..i + len]
                    .iter()
                    .map(|t| t.surface.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                let id = self.emit(
                    &mut draft,
                    token,
                    &surface,
                    &entry_article,
                    &sid,
                    &mut occurrences,
                );
                draft.sequence_ids.insert(id);
                i += len;
                continue;
            }

            for sid in &token.strongs {
                let articles = self.index.singles_for(sid).to_vec();
                for article in articles {
                    self.emit(
                        &mut draft,
                        token,
                        &token.surface,
                        &article,
                        sid,
                        &mut occurrences,
                    );
                }
            }
            i += 1;
        }

        rows::duplicate_gl_columns(&mut draft.rows);
        log::info!("Strong's-first walk produced {} draft rows", draft.rows.len());
        draft
    }

    /// Longest phrase starting at `tokens[i]` whose lemma bases line up with
    /// the following tokens of the same verse. Returns the phrase's article,
    /// the Strong's id that keyed it and the number of tokens consumed.
    fn sequence_at(&self, tokens: &[Token], i: usize) -> Option<(String, String, usize)> {
        let token = &tokens[i];
        for sid in &token.strongs {
            for entry in self.index.sequences_for(strongs::base(sid)) {
                let len = entry.len();
                if i + len > tokens.len() {
                    continue;
                }
                let window = &tokens[i..i + len];
                let same_verse = window
                    .iter()
                    .all(|t| t.chapter == token.chapter && t.verse == token.verse);
                if !same_verse {
                    continue;
                }
                let aligned = window.iter().zip(&entry.bases).all(|(t, want)| {
                    t.strongs.iter().any(|s| strongs::base(s) == want)
                });
                if aligned {
                    return Some((entry.article.clone(), sid.clone(), len));
                }
            }
        }
        None
    }

    fn emit(
        &mut self,
        draft: &mut StrongsFirstDraft,
        token: &Token,
        surface: &str,
        article_path: &str,
        sid: &str,
        occurrences: &mut HashMap<(u32, u32, String), u32>,
    ) -> String {
        let tags = self
            .vocab
            .get(article_path)
            .map(|a| a.category.tag().to_string())
            .unwrap_or_default();

        let key = (token.chapter, token.verse, surface.to_string());
        let count = occurrences.entry(key).and_modify(|c| *c += 1).or_insert(1);

        let id = self.ids.next_id();
        draft.sids.insert(id.clone(), sid.to_string());
        draft.rows.push(Row {
            reference: format!("{}:{}", token.chapter, token.verse),
            id: id.clone(),
            tags,
            orig_words: surface.to_string(),
            occurrence: *count,
            twlink: rows::tw_link(article_path),
            ..Default::default()
        });
        id
    }

    /// Refine every draft row through the selector, updating `TWLink`,
    /// `Tags`, `Variant of` and `Disambiguation`. Rows without a match move
    /// to the no-match output with the tried candidate list.
    pub fn refine(
        &self,
        draft: StrongsFirstDraft,
        selector: &ArticleSelector<'_>,
    ) -> GeneratedOutput {
        let mut output = GeneratedOutput::default();

        for mut row in draft.rows {
            if draft.sequence_ids.contains(&row.id) {
                output.rows.push(row);
                continue;
            }
            let Some(sid) = draft.sids.get(&row.id) else {
                output.no_match.push(row);
                continue;
            };
            let phrase = if row.gl_quote.is_empty() {
                row.orig_words.clone()
            } else {
                row.gl_quote.clone()
            };

            match selector.select(&phrase, sid) {
                SelectOutcome::Match(sel) => {
                    row.tags = self
                        .vocab
                        .get(&sel.article)
                        .map(|a| a.category.tag().to_string())
                        .unwrap_or_default();
                    row.twlink = rows::tw_link(&sel.article);
                    row.variant_of = if sel.is_variant {
                        sel.matched_term.clone()
                    } else {
                        String::new()
                    };
                    row.disambiguation = rows::format_disambiguation(&sel.disambiguation);
                    output.rows.push(row);
                }
                SelectOutcome::NoMatch { tried } => {
                    row.disambiguation = if tried.is_empty() {
                        String::new()
                    } else {
                        format!("({})", tried.join(", "))
                    };
                    output.no_match.push(row);
                }
            }
        }

        log::info!(
            "Refinement kept {} rows, routed {} to no-match",
            output.rows.len(),
            output.no_match.len()
        );
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vocabulary::{strongs::StrongsIndex, Category};

    fn vocab() -> Vocabulary {
        let mut vocab = Vocabulary::default();
        vocab.insert(Vocabulary::article(
            Category::KeyTerm,
            "god",
            &["God"],
            &[&["H430"], &["G2316"]],
        ));
        vocab.insert(Vocabulary::article(
            Category::KeyTerm,
            "grace",
            &["grace"],
            &[&["G5485"]],
        ));
        vocab.insert(Vocabulary::article(
            Category::Other,
            "burntoffering",
            &["burnt offering"],
            &[&["H5930", "H5927"]],
        ));
        vocab
    }

    const USFM: &str = r#"\c 1
\v 1 \w God|strong="H430"\w* \w gives|strong="H5414"\w* \w grace|strong="G5485"\w*
\v 2 \w burnt|strong="H5930"\w* \w offering|strong="H5927"\w*
"#;

    #[test]
    fn test_generate_emits_singles_and_sequences() {
        let vocab = vocab();
        let index = StrongsIndex::build(&vocab);
        let mut pipeline =
            StrongsFirstPipeline::with_ids(&vocab, &index, IdGenerator::with_seed(3));
        let draft = pipeline.generate(USFM);

        assert_eq!(draft.rows.len(), 3);
        assert_eq!(draft.rows[0].orig_words, "God");
        assert_eq!(draft.rows[0].twlink, "rc://*/tw/dict/bible/kt/god");
        assert_eq!(draft.rows[1].orig_words, "grace");
        // the two-lemma phrase combined into one surface
        assert_eq!(draft.rows[2].orig_words, "burnt offering");
        assert_eq!(draft.rows[2].reference, "1:2");
        assert_eq!(
            draft.rows[2].twlink,
            "rc://*/tw/dict/bible/other/burntoffering"
        );
    }

    #[test]
    fn test_generate_fills_gl_columns_with_surface() {
        let vocab = vocab();
        let index = StrongsIndex::build(&vocab);
        let mut pipeline =
            StrongsFirstPipeline::with_ids(&vocab, &index, IdGenerator::with_seed(3));
        let draft = pipeline.generate(USFM);

        for row in &draft.rows {
            assert_eq!(row.gl_quote, row.orig_words);
            assert_eq!(row.gl_occurrence, row.occurrence.to_string());
        }
    }

    #[test]
    fn test_tokens_without_strongs_skipped() {
        let vocab = vocab();
        let index = StrongsIndex::build(&vocab);
        let mut pipeline =
            StrongsFirstPipeline::with_ids(&vocab, &index, IdGenerator::with_seed(3));
        let draft =
            pipeline.generate("\\c 1\n\\v 1 \\w the\\w* \\w God|strong=\"H430\"\\w*");

        assert_eq!(draft.rows.len(), 1);
        assert_eq!(draft.rows[0].orig_words, "God");
    }

    #[test]
    fn test_sequence_not_matched_across_verses() {
        let vocab = vocab();
        let index = StrongsIndex::build(&vocab);
        let mut pipeline =
            StrongsFirstPipeline::with_ids(&vocab, &index, IdGenerator::with_seed(3));
        let usfm = "\\c 1\n\\v 1 \\w burnt|strong=\"H5930\"\\w*\n\\v 2 \\w offering|strong=\"H5927\"\\w*";
        let draft = pipeline.generate(usfm);

        // no combined row; the head lemma still resolves via singles if
        // registered, which it is not here, so only unmatched tokens remain
        assert!(draft.rows.iter().all(|r| r.orig_words != "burnt offering"));
    }

    #[test]
    fn test_refine_updates_links_and_routes_no_match() {
        let vocab = vocab();
        let index = StrongsIndex::build(&vocab);
        let mut pipeline =
            StrongsFirstPipeline::with_ids(&vocab, &index, IdGenerator::with_seed(3));
        let selector = ArticleSelector::new(&vocab, &index, false);

        let usfm = "\\c 1\n\\v 1 \\w God|strong=\"H430\"\\w* \\w mercy|strong=\"G5485\"\\w*";
        let draft = pipeline.generate(usfm);
        assert_eq!(draft.rows.len(), 2);

        let output = pipeline.refine(draft, &selector);
        // "God" matches kt/god; "mercy" cannot match the term "grace"
        assert_eq!(output.rows.len(), 1);
        assert_eq!(output.rows[0].twlink, "rc://*/tw/dict/bible/kt/god");
        assert_eq!(output.no_match.len(), 1);
        assert_eq!(output.no_match[0].orig_words, "mercy");
        assert_eq!(output.no_match[0].disambiguation, "(kt/grace)");
    }

    #[test]
    fn test_occurrence_counting_per_verse() {
        let vocab = vocab();
        let index = StrongsIndex::build(&vocab);
        let mut pipeline =
            StrongsFirstPipeline::with_ids(&vocab, &index, IdGenerator::with_seed(3));
        let usfm = "\\c 1\n\\v 1 \\w grace|strong=\"G5485\"\\w* \\w grace|strong=\"G5485\"\\w*\n\\v 2 \\w grace|strong=\"G5485\"\\w*";
        let draft = pipeline.generate(usfm);

        assert_eq!(draft.rows.len(), 3);
        assert_eq!(draft.rows[0].occurrence, 1);
        assert_eq!(draft.rows[1].occurrence, 2);
        // counter resets per verse
        assert_eq!(draft.rows[2].occurrence, 1);
    }
}

//! Generation Pipelines
//!
//! Two entry points sharing the vocabulary, pivot index, morphology and row
//! machinery: English-first (scan clean verse text with the trie) and
//! Strong's-first (walk USFM tokens and resolve their lemma attributions).

pub mod english_first;
pub mod strongs_first;

use thiserror::Error;

use crate::core::morphology::{self, ExpandOptions};
use crate::core::rows::{Row, RowError};
use crate::core::trie::TermTrie;
use crate::core::vocabulary::{Category, Vocabulary, VocabularyError};

pub use english_first::EnglishFirstPipeline;
pub use strongs_first::{StrongsFirstDraft, StrongsFirstPipeline};

/// Unified error type for pipeline runs.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Book code not in the canon.
    #[error("Unknown book code: {0}")]
    UnknownBook(String),

    /// Vocabulary could not be loaded or indexed.
    #[error("Vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),

    /// TSV round-trip failure.
    #[error("Row error: {0}")]
    Row(#[from] RowError),
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Output of a pipeline run: main rows plus rows that found no article.
#[derive(Debug, Default)]
pub struct GeneratedOutput {
    pub rows: Vec<Row>,
    pub no_match: Vec<Row>,
}

/// Build the scan trie from the vocabulary: every headword at priority 0,
/// every morphological variant at priority 1.
pub fn build_trie(vocab: &Vocabulary) -> TermTrie {
    let mut trie = TermTrie::new();
    for article in vocab.iter() {
        let opts = ExpandOptions {
            is_name: article.category == Category::Name,
        };
        for term in &article.terms {
            if term.is_empty() {
                continue;
            }
            trie.insert(term, term, &article.path, 0);
            for variant in morphology::expand_term(term, &opts) {
                trie.insert(&variant, term, &article.path, 1);
            }
        }
    }
    log::debug!("Built term trie with {} entries", trie.entry_count());
    trie
}

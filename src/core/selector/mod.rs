//! Candidate-Article Selection
//!
//! Given an English phrase and a Strong's id, pick the best vocabulary
//! article: build the candidate set from the Strong's pivot, prioritize by
//! English-surface evidence, run each candidate through four match stages,
//! and tie-break deterministically. Also computes the variant flag and the
//! disambiguation set.

use regex::Regex;

use crate::core::morphology;
use crate::core::vocabulary::{strongs::StrongsIndex, Article, Category, Vocabulary};

/// The stage at which a term matched the phrase. Earlier is stronger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchStage {
    /// Case-sensitive whole-word match.
    Exact,
    /// Case-insensitive whole-word match.
    ExactCi,
    /// Case-sensitive term prefix anchored at a word or dash start.
    PrefixBoundary,
    /// Case-insensitive stripped-form match with an inflectional tail.
    StrippedCi,
}

/// A successful selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Chosen article path.
    pub article: String,
    pub stage: MatchStage,
    /// The headword that produced the match.
    pub matched_term: String,
    /// Whether the match is a morphological variant that survives the
    /// suppression test.
    pub is_variant: bool,
    /// Every plausible article for this phrase, lexicographically sorted.
    /// Length > 1 means the row is ambiguous.
    pub disambiguation: Vec<String>,
}

/// Outcome of a selection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Match(Selection),
    /// No candidate matched; `tried` is the prioritized candidate list.
    NoMatch { tried: Vec<String> },
}

/// The selector. Read-only over the vocabulary and pivot index; safe to
/// share once built.
pub struct ArticleSelector<'a> {
    vocab: &'a Vocabulary,
    index: &'a StrongsIndex,
    extended_conjugations: bool,
}

impl<'a> ArticleSelector<'a> {
    pub fn new(vocab: &'a Vocabulary, index: &'a StrongsIndex, extended_conjugations: bool) -> Self {
        Self {
            vocab,
            index,
            extended_conjugations,
        }
    }

    /// Select the best article for `glq` given the Strong's id `sid`.
    pub fn select(&self, glq: &str, sid: &str) -> SelectOutcome {
        let candidates = self.index.singles_for(sid);
        if candidates.is_empty() {
            return SelectOutcome::NoMatch { tried: Vec::new() };
        }

        let prioritized = prioritize(candidates, glq);

        let mut best: Option<(MatchStage, usize, String, &Article)> = None;
        for (idx, path) in prioritized.iter().enumerate() {
            let Some(article) = self.vocab.get(path) else {
                continue;
            };
            if let Some((stage, term)) = self.stage_match(article, glq) {
                let better = best
                    .as_ref()
                    .map(|(s, i, _, _)| (stage, idx) < (*s, *i))
                    .unwrap_or(true);
                if better {
                    best = Some((stage, idx, term, article));
                }
            }
        }

        let Some((stage, _, matched_term, article)) = best else {
            return SelectOutcome::NoMatch { tried: prioritized };
        };
        let article_path = article.path.clone();

        let is_variant =
            stage >= MatchStage::PrefixBoundary && !self.suppress_variant(article, &matched_term, glq);

        let disambiguation = self.disambiguation_set(candidates, glq);

        SelectOutcome::Match(Selection {
            article: article_path,
            stage,
            matched_term,
            is_variant,
            disambiguation,
        })
    }

    /// Earliest stage at which any of the article's terms matches `glq`,
    /// with the term that matched.
    fn stage_match(&self, article: &Article, glq: &str) -> Option<(MatchStage, String)> {
        let mut best: Option<(MatchStage, String)> = None;

        for term in &article.terms {
            if term.is_empty() {
                continue;
            }
            if let Some(stage) = self.stage_for_term(term, glq) {
                let better = best
                    .as_ref()
                    .map(|(s, _)| stage < *s)
                    .unwrap_or(true);
                if better {
                    let exact = stage == MatchStage::Exact;
                    best = Some((stage, term.clone()));
                    if exact {
                        break;
                    }
                }
            }
        }
        best
    }

    fn stage_for_term(&self, term: &str, glq: &str) -> Option<MatchStage> {
        let alternates = self.alternates(term);

        if alternates.iter().any(|alt| word_bound(alt, glq, false)) {
            return Some(MatchStage::Exact);
        }
        if alternates.iter().any(|alt| word_bound(alt, glq, true)) {
            return Some(MatchStage::ExactCi);
        }
        if prefix_bound(term, glq, false) {
            return Some(MatchStage::PrefixBoundary);
        }

        // Full strip set for the original term, y/e strips for conjugation
        // and irregular alternates.
        let mut stripped = stripped_forms(term, true);
        for alt in &alternates[1..] {
            stripped.extend(stripped_forms(alt, false));
        }
        if stripped.iter().any(|s| stripped_tail_match(s, glq)) {
            return Some(MatchStage::StrippedCi);
        }
        None
    }

    /// Alternates evaluated at stages 1 and 2. The original term is always
    /// first.
    fn alternates(&self, term: &str) -> Vec<String> {
        let mut out = vec![term.to_string()];
        out.extend(morphology::plurals_of(term));
        out.extend(morphology::irregular_forms_of(term));
        if self.extended_conjugations {
            out.extend(morphology::conjugations_of(term));
        }
        let mut seen = std::collections::HashSet::new();
        out.retain(|alt| seen.insert(alt.clone()));
        out
    }

    /// The variant flag is suppressed when the phrase already carries a
    /// known inflection of the article.
    fn suppress_variant(&self, article: &Article, matched_term: &str, glq: &str) -> bool {
        for term in &article.terms {
            if term.is_empty() {
                continue;
            }
            if word_bound(term, glq, true) {
                return true;
            }
            if morphology::plurals_of(term)
                .iter()
                .any(|p| word_bound(p, glq, true))
            {
                return true;
            }
        }
        morphology::verb_inflections_of(matched_term)
            .iter()
            .any(|form| word_bound(form, glq, true))
    }

    /// Enlarge the candidate set with unkeyed articles and keep everything
    /// that matches at any stage.
    fn disambiguation_set(&self, candidates: &[String], glq: &str) -> Vec<String> {
        let mut paths: Vec<&String> = candidates.iter().collect();
        paths.extend(self.index.unkeyed());

        let mut matched: Vec<String> = paths
            .into_iter()
            .filter_map(|path| {
                let article = self.vocab.get(path)?;
                self.stage_match(article, glq).map(|_| path.clone())
            })
            .collect();
        matched.sort();
        matched.dedup();
        matched
    }
}

/// Tier 1: slug occurs in the phrase, longest slug first. Tier 2: the rest,
/// grouped kt -> names -> other, alphabetical within each group.
fn prioritize(candidates: &[String], glq: &str) -> Vec<String> {
    let glq_lower = glq.to_lowercase();

    let slug_of = |path: &str| path.rsplit('/').next().unwrap_or(path).to_string();
    let category_rank = |path: &str| match path.split('/').next() {
        Some(seg) if seg == Category::KeyTerm.segment() => 0,
        Some(seg) if seg == Category::Name.segment() => 1,
        _ => 2,
    };

    let mut tier1: Vec<&String> = candidates
        .iter()
        .filter(|path| glq_lower.contains(&slug_of(path)))
        .collect();
    tier1.sort_by_key(|path| std::cmp::Reverse(slug_of(path).len()));

    let mut tier2: Vec<&String> = candidates
        .iter()
        .filter(|path| !glq_lower.contains(&slug_of(path)))
        .collect();
    tier2.sort_by_key(|path| (category_rank(path), slug_of(path)));

    tier1.into_iter().chain(tier2).cloned().collect()
}

/// `\bTERM\b`, optionally case-insensitive.
fn word_bound(term: &str, text: &str, case_insensitive: bool) -> bool {
    let flag = if case_insensitive { "(?i)" } else { "" };
    match Regex::new(&format!(r"{flag}\b{}\b", regex::escape(term))) {
        Ok(re) => re.is_match(text),
        Err(_) => false,
    }
}

/// Case-sensitive term prefix anchored at a word or dash start.
fn prefix_bound(term: &str, text: &str, case_insensitive: bool) -> bool {
    let flag = if case_insensitive { "(?i)" } else { "" };
    match Regex::new(&format!(
        r"{flag}(?:^|\b|[—–-]){}",
        regex::escape(term)
    )) {
        Ok(re) => re.is_match(text),
        Err(_) => false,
    }
}

/// A stripped form matches iff an inflectional tail follows it.
fn stripped_tail_match(stripped: &str, text: &str) -> bool {
    match Regex::new(&format!(
        r"(?i)(?:^|\b|[—–-]){}(?:ed|ing|er|est|es|ies|s|d|n|t)\b",
        regex::escape(stripped)
    )) {
        Ok(re) => re.is_match(text),
        Err(_) => false,
    }
}

/// Stripped forms of a term. `full` applies the whole drop set; otherwise
/// only the `y`/`e` drops.
fn stripped_forms(term: &str, full: bool) -> Vec<String> {
    let mut out = Vec::new();
    let mut push = |s: &str| {
        if s.chars().count() >= 2 {
            out.push(s.to_string());
        }
    };

    if let Some(stem) = term.strip_suffix('y') {
        push(stem);
    }
    if let Some(stem) = term.strip_suffix('e') {
        push(stem);
    }
    if full {
        if let Some(stem) = term.strip_suffix("ing") {
            push(stem);
        }
        if let Some(stem) = term.strip_suffix("ed") {
            push(stem);
        }
        if let Some(stem) = term.strip_suffix("es") {
            push(stem);
        }
        if term.ends_with('s') && !term.ends_with("ss") {
            push(&term[..term.len() - 1]);
        }
    }
    out
}

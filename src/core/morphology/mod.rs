//! English Inflection Rules
//!
//! Pure, deterministic generation of inflectional variants: plural,
//! depluralized, past tense, present participle, irregular verb forms and
//! capitalized alternates. Multi-word headwords inflect only their last
//! whitespace-separated token; the head is preserved verbatim.

pub mod irregular;

pub use irregular::{F_PLURAL_EXCEPTIONS, IRREGULAR_PLURALS, IRREGULAR_VERBS};

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// How a headword is expanded into trie variants.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpandOptions {
    /// Proper-name article: no pluralization or depluralization, only
    /// capitalized alternates.
    pub is_name: bool,
}

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c.to_ascii_lowercase())
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !is_vowel(c)
}

/// Split a term into `(head, last word)`.
fn split_last(term: &str) -> (Option<&str>, &str) {
    match term.rfind(char::is_whitespace) {
        Some(idx) => (Some(term[..idx].trim_end()), term[idx + 1..].trim_start()),
        None => (None, term),
    }
}

fn rejoin(head: Option<&str>, last: &str) -> String {
    match head {
        Some(h) => format!("{h} {last}"),
        None => last.to_string(),
    }
}

/// Uppercase the first letter if it is a lowercase ASCII letter.
pub fn capitalize_first(word: &str) -> Option<String> {
    let first = word.chars().next()?;
    if !first.is_ascii_lowercase() {
        return None;
    }
    let mut out = String::with_capacity(word.len());
    out.push(first.to_ascii_uppercase());
    out.push_str(&word[first.len_utf8()..]);
    Some(out)
}

/// Match the capitalization of `pattern`'s first letter onto `word`.
fn match_case(word: &str, pattern: &str) -> String {
    if pattern.chars().next().is_some_and(|c| c.is_uppercase()) {
        capitalize_first(word).unwrap_or_else(|| word.to_string())
    } else {
        word.to_string()
    }
}

/// Consonant-vowel-consonant ending, final consonant not `w`/`x`/`y`, and
/// the stem does not end in a suffix that never doubles.
fn doubles_final_consonant(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < 3 {
        return false;
    }
    let [c1, c2, c3] = [chars[chars.len() - 3], chars[chars.len() - 2], chars[chars.len() - 1]];
    if !(is_consonant(c1) && is_vowel(c2) && is_consonant(c3)) {
        return false;
    }
    if matches!(c3.to_ascii_lowercase(), 'w' | 'x' | 'y') {
        return false;
    }
    let lower = word.to_lowercase();
    !["er", "en", "or", "on", "al"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
}

// ============================================================================
// Single-word rules
// ============================================================================

fn pluralize_word(word: &str) -> Vec<String> {
    let lower = word.to_lowercase();
    let mut out = Vec::new();

    if let Some(plural) = irregular::irregular_plural(&lower) {
        out.push(match_case(plural, word));
    } else if lower.len() >= 2
        && lower.ends_with('y')
        && is_consonant(lower.chars().nth(lower.len() - 2).unwrap_or('a'))
    {
        out.push(format!("{}ies", &word[..word.len() - 1]));
    } else if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        out.push(format!("{word}es"));
    } else if lower.ends_with("fe") {
        out.push(format!("{}ves", &word[..word.len() - 2]));
    } else if lower.ends_with('f') && !F_PLURAL_EXCEPTIONS.contains(&lower.as_str()) {
        out.push(format!("{}ves", &word[..word.len() - 1]));
    } else if lower.ends_with('o') {
        out.push(format!("{word}es"));
    } else {
        out.push(format!("{word}s"));
    }

    // plain +s fallback, always
    let fallback = format!("{word}s");
    if !out.contains(&fallback) {
        out.push(fallback);
    }
    out
}

fn depluralize_word(word: &str) -> Vec<String> {
    let lower = word.to_lowercase();
    let mut out = Vec::new();

    if lower.ends_with("ies") && lower.len() > 3 {
        out.push(format!("{}y", &word[..word.len() - 3]));
    }
    if lower.ends_with("es") {
        let stem = &lower[..lower.len() - 2];
        if stem.ends_with('s')
            || stem.ends_with('x')
            || stem.ends_with('z')
            || stem.ends_with("ch")
            || stem.ends_with("sh")
        {
            out.push(word[..word.len() - 2].to_string());
        }
    } else if lower.ends_with('s') && !lower.ends_with("ss") {
        out.push(word[..word.len() - 1].to_string());
    }
    out
}

fn past_tense_word(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.ends_with('e') {
        return format!("{word}d");
    }
    if lower.len() >= 2
        && lower.ends_with('y')
        && is_consonant(lower.chars().nth(lower.len() - 2).unwrap_or('a'))
    {
        return format!("{}ied", &word[..word.len() - 1]);
    }
    if doubles_final_consonant(&lower) {
        let last = word.chars().last().unwrap_or_default();
        return format!("{word}{last}ed");
    }
    format!("{word}ed")
}

fn participle_word(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.ends_with("ie") {
        return format!("{}ying", &word[..word.len() - 2]);
    }
    if lower.ends_with("ee") {
        return format!("{word}ing");
    }
    if lower.ends_with('e') {
        return format!("{}ing", &word[..word.len() - 1]);
    }
    if doubles_final_consonant(&lower) {
        let last = word.chars().last().unwrap_or_default();
        return format!("{word}{last}ing");
    }
    format!("{word}ing")
}

fn irregular_forms_word(word: &str) -> Vec<String> {
    let lower = word.to_lowercase();
    match irregular::verb_base(&lower) {
        Some(base) => irregular::verb_forms(base)
            .map(|forms| {
                forms
                    .iter()
                    .filter(|f| **f != lower)
                    .map(|f| f.to_string())
                    .collect()
            })
            .unwrap_or_default(),
        None => Vec::new(),
    }
}

// ============================================================================
// Term-level API (last word only)
// ============================================================================

/// Plural variants of a headword.
pub fn plurals_of(term: &str) -> Vec<String> {
    let (head, last) = split_last(term);
    pluralize_word(last)
        .into_iter()
        .map(|w| rejoin(head, &w))
        .collect()
}

/// Possible singulars of a headword.
pub fn depluralized_of(term: &str) -> Vec<String> {
    let (head, last) = split_last(term);
    depluralize_word(last)
        .into_iter()
        .map(|w| rejoin(head, &w))
        .collect()
}

/// Rule-generated past tense of a headword.
pub fn past_tense_of(term: &str) -> String {
    let (head, last) = split_last(term);
    rejoin(head, &past_tense_word(last))
}

/// Rule-generated present participle of a headword.
pub fn participle_of(term: &str) -> String {
    let (head, last) = split_last(term);
    rejoin(head, &participle_word(last))
}

/// All irregular verb forms of a headword whose last word is a known form.
pub fn irregular_forms_of(term: &str) -> Vec<String> {
    let (head, last) = split_last(term);
    irregular_forms_word(last)
        .into_iter()
        .map(|w| rejoin(head, &w))
        .collect()
}

/// Verb inflections used for the variant-flag suppression test:
/// `-ed`, `-ing` and irregular forms of the term.
pub fn verb_inflections_of(term: &str) -> Vec<String> {
    let irregular = irregular_forms_of(term);
    if !irregular.is_empty() {
        return dedupe(irregular);
    }
    dedupe(vec![past_tense_of(term), participle_of(term)])
}

/// The richer conjugation set: 3rd person, past, participle and irregular
/// forms. Used by the selector when extended conjugations are enabled.
pub fn conjugations_of(term: &str) -> Vec<String> {
    let mut out = plurals_of(term);
    let irregular = irregular_forms_of(term);
    if irregular.is_empty() {
        out.push(past_tense_of(term));
        out.push(participle_of(term));
    }
    out.extend(irregular);
    dedupe(out)
}

/// Whether verb-like `-ed`/`-ing` generation is suppressed for this term.
fn verb_forms_suppressed(last: &str) -> bool {
    irregular::VERB_SUPPRESSED_NOUNS.contains(&last)
}

/// Expand a headword into its full variant set (the original excluded).
pub fn expand_term(term: &str, opts: &ExpandOptions) -> Vec<String> {
    let (_, last) = split_last(term);
    let mut variants: Vec<String> = Vec::new();

    if opts.is_name {
        // Proper names keep their surface shape; only the capitalized
        // alternate is admitted.
        if let Some(cap) = capitalize_first(term) {
            variants.push(cap);
        }
        return dedupe_excluding(variants, term);
    }

    variants.extend(plurals_of(term));
    variants.extend(depluralized_of(term));

    let irregular = irregular_forms_of(term);
    let is_irregular_verb = !irregular.is_empty();
    variants.extend(irregular);

    // Rule conjugation only where neither the irregular table nor the noun
    // list already decides the verb forms.
    if !is_irregular_verb && !verb_forms_suppressed(last) {
        variants.push(past_tense_of(term));
        variants.push(participle_of(term));
    }

    // Capitalized alternates of every lowercase-initial variant, and of the
    // term itself.
    let mut capitalized: Vec<String> = variants
        .iter()
        .filter_map(|v| capitalize_first(v))
        .collect();
    if let Some(cap) = capitalize_first(term) {
        capitalized.push(cap);
    }
    variants.extend(capitalized);

    dedupe_excluding(variants, term)
}

fn dedupe(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items.into_iter().filter(|i| seen.insert(i.clone())).collect()
}

fn dedupe_excluding(items: Vec<String>, original: &str) -> Vec<String> {
    dedupe(items).into_iter().filter(|i| i != original).collect()
}

//! Vocabulary Archive Loader
//!
//! Parses the Translation Words archive (a ZIP of `bible/<category>/<slug>.md`
//! files) into an `article -> {terms, strong-sequences}` map. Only the first
//! line of each article file matters: a comma-separated headword list,
//! optionally prefixed with `#` and optionally carrying trailing
//! parenthetical qualifiers.

pub mod error;
pub mod strongs;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::{BufRead, BufReader, Cursor};

use serde::Deserialize;

pub use error::{VocabularyError, VocabularyResult};

/// Article category, taken from the middle path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// `kt/` — key terms.
    KeyTerm,
    /// `names/` — proper names.
    Name,
    /// `other/` — everything else.
    Other,
}

impl Category {
    /// Parse a path segment into a category.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "kt" => Some(Self::KeyTerm),
            "names" => Some(Self::Name),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Path segment for this category.
    pub fn segment(&self) -> &'static str {
        match self {
            Self::KeyTerm => "kt",
            Self::Name => "names",
            Self::Other => "other",
        }
    }

    /// The `Tags` column value for rows linked to this category.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::KeyTerm => "keyterm",
            Self::Name => "name",
            Self::Other => "",
        }
    }
}

/// One controlled-vocabulary article.
#[derive(Debug, Clone)]
pub struct Article {
    /// Primary key: `category/slug`, e.g. `kt/god`.
    pub path: String,
    pub category: Category,
    /// Last path segment, lower-kebab.
    pub slug: String,
    /// English headwords, de-duplicated case-insensitively, longest first
    /// with stable tie-break on original order.
    pub terms: Vec<String>,
    /// Strong's id sequences. Length-1 entries key single-lemma lookups;
    /// length-2+ entries key phrase lookups.
    pub strongs: Vec<Vec<String>>,
}

impl Article {
    fn new(category: Category, slug: &str) -> Self {
        Self {
            path: format!("{}/{}", category.segment(), slug),
            category,
            slug: slug.to_string(),
            terms: Vec::new(),
            strongs: Vec::new(),
        }
    }
}

/// The loaded vocabulary, keyed by article path.
///
/// Backed by a `BTreeMap` so that iteration is lexicographic and every
/// downstream index is deterministic.
#[derive(Debug, Default, Clone)]
pub struct Vocabulary {
    articles: BTreeMap<String, Article>,
}

/// One entry of the Strong's companion source (`tw_strongs_list`).
#[derive(Debug, Deserialize)]
struct StrongsListEntry {
    #[serde(default, alias = "article.terms")]
    terms: Vec<String>,
    #[serde(default)]
    strongs: Vec<Vec<String>>,
}

impl Vocabulary {
    /// Load articles from the raw bytes of the vocabulary ZIP archive.
    ///
    /// Entries whose path does not contain a `bible/<category>/<slug>.md`
    /// suffix are skipped. Articles with an empty headword list are retained;
    /// they participate in disambiguation.
    pub fn from_zip(bytes: &[u8]) -> VocabularyResult<Self> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut articles = BTreeMap::new();

        for i in 0..archive.len() {
            let entry = archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            let Some((category, slug)) = parse_article_path(&name) else {
                continue;
            };

            let mut reader = BufReader::new(entry);
            let mut first_line = String::new();
            reader
                .read_line(&mut first_line)
                .map_err(|e| VocabularyError::entry(format!("{name}: {e}")))?;

            let mut article = Article::new(category, &slug);
            article.terms = parse_headword_line(&first_line);
            articles.insert(article.path.clone(), article);
        }

        log::info!("Loaded {} vocabulary articles", articles.len());
        Ok(Self { articles })
    }

    /// Merge the richer Strong's companion source into the vocabulary.
    ///
    /// The source is a JSON object `article-path -> {terms, strongs}`.
    /// Articles already loaded from the archive keep their headwords and gain
    /// the Strong's sequences; articles present only in the source are
    /// created with the source's terms.
    pub fn merge_strongs_list(&mut self, json: &[u8]) -> VocabularyResult<()> {
        let entries: HashMap<String, StrongsListEntry> = serde_json::from_slice(json)?;
        let mut merged = 0usize;

        for (path, entry) in entries {
            let Some((category, slug)) = split_article_path(&path) else {
                log::warn!("Skipping malformed article path in Strong's list: {path}");
                continue;
            };

            let normalized: Vec<Vec<String>> = entry
                .strongs
                .iter()
                .map(|seq| {
                    seq.iter()
                        .filter_map(|raw| strongs::normalize(raw))
                        .collect::<Vec<_>>()
                })
                .filter(|seq: &Vec<String>| !seq.is_empty())
                .collect();

            let article = self
                .articles
                .entry(format!("{}/{}", category.segment(), slug))
                .or_insert_with(|| Article::new(category, &slug));
            if article.terms.is_empty() && !entry.terms.is_empty() {
                article.terms = order_terms(entry.terms);
            }
            article.strongs = normalized;
            merged += 1;
        }

        log::info!("Merged Strong's data for {merged} articles");
        Ok(())
    }

    /// Look up an article by its `category/slug` path.
    pub fn get(&self, path: &str) -> Option<&Article> {
        self.articles.get(path)
    }

    /// Whether the vocabulary contains the given article path.
    pub fn contains(&self, path: &str) -> bool {
        self.articles.contains_key(path)
    }

    /// Iterate articles in lexicographic path order.
    pub fn iter(&self) -> impl Iterator<Item = &Article> {
        self.articles.values()
    }

    /// Number of loaded articles.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Whether no articles are loaded.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Insert or replace an article. Used by tests and fixture builders.
    pub fn insert(&mut self, article: Article) {
        self.articles.insert(article.path.clone(), article);
    }

    /// Build an article from parts. Convenience for fixtures.
    pub fn article(
        category: Category,
        slug: &str,
        terms: &[&str],
        strongs: &[&[&str]],
    ) -> Article {
        let mut article = Article::new(category, slug);
        article.terms = order_terms(terms.iter().map(|t| t.to_string()).collect());
        article.strongs = strongs
            .iter()
            .map(|seq| {
                seq.iter()
                    .filter_map(|raw| strongs::normalize(raw))
                    .collect()
            })
            .collect();
        article
    }
}

/// Extract `(category, slug)` from an archive entry path.
///
/// Archives usually carry a top-level directory (`en_tw/bible/kt/god.md`), so
/// the `bible/` segment is located anywhere in the path.
fn parse_article_path(entry_name: &str) -> Option<(Category, String)> {
    let segments: Vec<&str> = entry_name.split('/').collect();
    let bible_idx = segments.iter().position(|s| *s == "bible")?;
    if segments.len() != bible_idx + 3 {
        return None;
    }
    let category = Category::from_segment(segments[bible_idx + 1])?;
    let file = segments[bible_idx + 2];
    let slug = file.strip_suffix(".md")?;
    if slug.is_empty() {
        return None;
    }
    Some((category, slug.to_string()))
}

/// Split a `category/slug` article path.
fn split_article_path(path: &str) -> Option<(Category, String)> {
    let (cat, slug) = path.split_once('/')?;
    if slug.is_empty() || slug.contains('/') {
        return None;
    }
    Some((Category::from_segment(cat)?, slug.to_string()))
}

/// Parse the first line of an article file into its headword list.
///
/// Strips a leading `#`, splits on commas, trims, and drops trailing
/// parenthetical qualifiers (`Joseph (OT)` -> `Joseph`).
fn parse_headword_line(line: &str) -> Vec<String> {
    let line = line.trim().trim_start_matches('#').trim();
    let raw: Vec<String> = line
        .split(',')
        .map(strip_parenthetical)
        .filter(|t| !t.is_empty())
        .collect();
    order_terms(raw)
}

/// Remove a trailing ` (...)` qualifier from a headword.
fn strip_parenthetical(term: &str) -> String {
    let term = term.trim();
    if term.ends_with(')') {
        if let Some(open) = term.rfind('(') {
            return term[..open].trim_end().to_string();
        }
    }
    term.to_string()
}

/// De-duplicate case-insensitively (first wins) and sort longest first with a
/// stable tie-break on original order.
fn order_terms(terms: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique: Vec<String> = Vec::new();
    for term in terms {
        if seen.insert(term.to_lowercase()) {
            unique.push(term);
        }
    }
    unique.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));
    unique
}

//! Output Rows
//!
//! The row record, the TSV codec (tab-separated, `\n` terminated, no
//! quoting), the 4-character row ID generator and the helpers that merge
//! companion-service columns back into rows.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Final column order of the output TSV.
pub const HEADER: [&str; 10] = [
    "Reference",
    "ID",
    "Tags",
    "OrigWords",
    "Occurrence",
    "TWLink",
    "GLQuote",
    "GLOccurrence",
    "Variant of",
    "Disambiguation",
];

/// Columns sent to the companion services.
pub const SERVICE_HEADER: [&str; 6] = [
    "Reference",
    "ID",
    "Tags",
    "OrigWords",
    "Occurrence",
    "TWLink",
];

/// Errors from TSV round-trips.
#[derive(Debug, Error)]
pub enum RowError {
    /// A TSV line had too few columns.
    #[error("Malformed TSV row: {0}")]
    Malformed(String),

    /// A service response row references an unknown ID.
    #[error("Unknown row ID in service response: {0}")]
    UnknownId(String),

    /// A required column is missing from a TSV header.
    #[error("Missing column in TSV header: {0}")]
    MissingColumn(&'static str),
}

/// Result type alias for row operations.
pub type RowResult<T> = Result<T, RowError>;

/// One output row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// `C:V`.
    pub reference: String,
    /// Four characters: lowercase letter + three lowercase alphanumerics.
    pub id: String,
    /// `keyterm`, `name` or empty.
    pub tags: String,
    /// Original-language phrase after conversion; English surface before.
    pub orig_words: String,
    /// In-verse count of `orig_words`.
    pub occurrence: u32,
    /// `rc://*/tw/dict/bible/<article>`.
    pub twlink: String,
    /// English surface, filled by the add-GL-quote service or the fallback.
    pub gl_quote: String,
    /// In-verse count of `gl_quote`; empty until filled.
    pub gl_occurrence: String,
    /// The matched headword when the surface is a deeper variant.
    pub variant_of: String,
    /// `(art1, art2, ...)` when more than one article is plausible.
    pub disambiguation: String,
}

impl Row {
    fn to_line(&self) -> String {
        [
            self.reference.as_str(),
            self.id.as_str(),
            self.tags.as_str(),
            self.orig_words.as_str(),
            &self.occurrence.to_string(),
            self.twlink.as_str(),
            self.gl_quote.as_str(),
            self.gl_occurrence.as_str(),
            self.variant_of.as_str(),
            self.disambiguation.as_str(),
        ]
        .join("\t")
    }

    fn to_service_line(&self) -> String {
        [
            self.reference.as_str(),
            self.id.as_str(),
            self.tags.as_str(),
            self.orig_words.as_str(),
            &self.occurrence.to_string(),
            self.twlink.as_str(),
        ]
        .join("\t")
    }
}

/// The `TWLink` value for an article path.
pub fn tw_link(article_path: &str) -> String {
    format!("rc://*/tw/dict/bible/{article_path}")
}

/// Format a disambiguation set: lexicographically sorted, parenthesized.
/// Empty and singleton sets format to the empty string.
pub fn format_disambiguation(paths: &[String]) -> String {
    if paths.len() < 2 {
        return String::new();
    }
    let mut sorted: Vec<&str> = paths.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    format!("({})", sorted.join(", "))
}

/// Serialize rows in the final column order.
pub fn to_tsv(rows: &[Row]) -> String {
    let mut out = HEADER.join("\t");
    out.push('\n');
    for row in rows {
        out.push_str(&row.to_line());
        out.push('\n');
    }
    out
}

/// Serialize the six service-input columns.
pub fn to_service_tsv(rows: &[Row]) -> String {
    let mut out = SERVICE_HEADER.join("\t");
    out.push('\n');
    for row in rows {
        out.push_str(&row.to_service_line());
        out.push('\n');
    }
    out
}

/// Locate required columns in a service response header.
fn column_indices(
    header: &str,
    wanted: &[&'static str],
) -> RowResult<Vec<usize>> {
    let fields: Vec<&str> = header.split('\t').collect();
    wanted
        .iter()
        .map(|name| {
            fields
                .iter()
                .position(|f| f == name)
                .ok_or(RowError::MissingColumn(name))
        })
        .collect()
}

fn field<'l>(parts: &[&'l str], idx: usize, line: &str) -> RowResult<&'l str> {
    parts
        .get(idx)
        .copied()
        .ok_or_else(|| RowError::Malformed(line.to_string()))
}

/// Merge `GLQuote`/`GLOccurrence` from an add-GL-quote response into the
/// rows, matching by ID. The response may reorder columns; the header
/// decides.
pub fn merge_gl_columns(rows: &mut [Row], response_tsv: &str) -> RowResult<()> {
    let mut lines = response_tsv.lines();
    let header = lines
        .next()
        .ok_or_else(|| RowError::Malformed("empty service response".to_string()))?;
    let idx = column_indices(header, &["ID", "GLQuote", "GLOccurrence"])?;

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split('\t').collect();
        let id = field(&parts, idx[0], line)?;
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RowError::UnknownId(id.to_string()))?;
        row.gl_quote = field(&parts, idx[1], line)?.to_string();
        row.gl_occurrence = field(&parts, idx[2], line)?.to_string();
    }
    Ok(())
}

/// Replace `OrigWords`/`Occurrence` with the converter's original-language
/// phrases, matching by ID.
pub fn apply_ol_conversion(rows: &mut [Row], response_tsv: &str) -> RowResult<()> {
    let mut lines = response_tsv.lines();
    let header = lines
        .next()
        .ok_or_else(|| RowError::Malformed("empty converter response".to_string()))?;
    let idx = column_indices(header, &["ID", "OrigWords", "Occurrence"])?;

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split('\t').collect();
        let id = field(&parts, idx[0], line)?;
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RowError::UnknownId(id.to_string()))?;
        row.orig_words = field(&parts, idx[1], line)?.to_string();
        row.occurrence = field(&parts, idx[2], line)?.parse().unwrap_or(row.occurrence);
    }
    Ok(())
}

/// Copy `OrigWords`/`Occurrence` into the GL columns. The recovery path when
/// the add-GL-quote service is unavailable, and the initial state of the
/// Strong's-first pipeline.
pub fn duplicate_gl_columns(rows: &mut [Row]) {
    for row in rows {
        row.gl_quote = row.orig_words.clone();
        row.gl_occurrence = row.occurrence.to_string();
    }
}

const ID_FIRST: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const ID_REST: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generator of run-unique 4-character row IDs.
///
/// Uniform random draws with collision retry; at typical corpus sizes the
/// expected number of draws per ID stays just above one.
#[derive(Debug)]
pub struct IdGenerator {
    rng: StdRng,
    used: HashSet<String>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            used: HashSet::new(),
        }
    }

    /// Seeded generator for reproducible test runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            used: HashSet::new(),
        }
    }

    /// Draw a fresh ID: one lowercase letter, then three lowercase
    /// alphanumerics.
    pub fn next_id(&mut self) -> String {
        loop {
            let mut id = String::with_capacity(4);
            id.push(ID_FIRST[self.rng.gen_range(0..ID_FIRST.len())] as char);
            for _ in 0..3 {
                id.push(ID_REST[self.rng.gen_range(0..ID_REST.len())] as char);
            }
            if self.used.insert(id.clone()) {
                return id;
            }
        }
    }
}

//! External collaborators.
//!
//! Everything that leaves the process lives here: HTTP fetches for the
//! vocabulary archive and USFM books, the companion quote services, and the
//! archive cache. The core pipelines consume already-materialized bytes and
//! never touch the network.

pub mod cache;
pub mod error;
pub mod fetch;
pub mod quotes;

pub use cache::{ArchiveCache, MemoryCache, NoCache};
pub use error::{ServiceError, ServiceResult};
pub use fetch::Fetcher;
pub use quotes::{HttpQuoteService, QuoteService};

use crate::core::rows::{self, Row};

/// English-first post-processing: convert `OrigWords` to the original
/// language, then append the GL columns.
///
/// Each service failure recovers independently: a failed conversion leaves
/// the English phrases in place, a failed quote call duplicates
/// `OrigWords`/`Occurrence` into the GL columns.
pub async fn finalize_english_first(rows: &mut Vec<Row>, service: &dyn QuoteService) {
    match service.convert_to_ol(&rows::to_service_tsv(rows)).await {
        Ok(response) => {
            if let Err(e) = rows::apply_ol_conversion(rows, &response) {
                log::warn!("Converter response rejected: {e} — keeping English phrases");
            }
        }
        Err(e) => {
            log::warn!("GL-to-OL conversion failed: {e} — keeping English phrases");
        }
    }

    match service.add_gl_quotes(&rows::to_service_tsv(rows)).await {
        Ok(response) => {
            if let Err(e) = rows::merge_gl_columns(rows, &response) {
                log::warn!("Quote response rejected: {e} — duplicating OrigWords");
                rows::duplicate_gl_columns(rows);
            }
        }
        Err(e) => {
            log::warn!("add-GL-quote failed: {e} — duplicating OrigWords");
            rows::duplicate_gl_columns(rows);
        }
    }
}

/// Strong's-first post-processing: append the GL columns, copy them into
/// `OrigWords`/`Occurrence`, then convert `OrigWords` to the original
/// language. The selector refinement runs afterwards, in the pipeline.
pub async fn finalize_strongs_first(rows: &mut Vec<Row>, service: &dyn QuoteService) {
    match service.add_gl_quotes(&rows::to_service_tsv(rows)).await {
        Ok(response) => {
            if let Err(e) = rows::merge_gl_columns(rows, &response) {
                log::warn!("Quote response rejected: {e} — keeping surface text");
            }
        }
        Err(e) => {
            log::warn!("add-GL-quote failed: {e} — keeping surface text");
        }
    }

    for row in rows.iter_mut() {
        if !row.gl_quote.is_empty() {
            row.orig_words = row.gl_quote.clone();
            if let Ok(count) = row.gl_occurrence.parse() {
                row.occurrence = count;
            }
        }
    }

    match service.convert_to_ol(&rows::to_service_tsv(rows)).await {
        Ok(response) => {
            if let Err(e) = rows::apply_ol_conversion(rows, &response) {
                log::warn!("Converter response rejected: {e} — keeping English phrases");
            }
        }
        Err(e) => {
            log::warn!("GL-to-OL conversion failed: {e} — keeping English phrases");
        }
    }
}

//! USFM Scanning
//!
//! A light tokenizer over alignment-annotated USFM. Two outputs depending on
//! pipeline mode: word tokens carrying chapter/verse and Strong's
//! attributions, or clean verse text with all alignment markup stripped.

pub mod cleaner;
pub mod tokenizer;

pub use cleaner::{clean, verses, Verse};
pub use tokenizer::{tokenize, Token};

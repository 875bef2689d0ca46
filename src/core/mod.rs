pub mod books;
pub mod logging;

// Vocabulary archive loading + Strong's pivot index
pub mod vocabulary;

// USFM scanning: word tokens with Strong's attributions, clean verse text
pub mod usfm;

// Closed-rule English inflection (plural, -ed, -ing, irregular verbs)
pub mod morphology;

// Word-boundary-aware prefix trie over the expanded term dictionary
pub mod trie;

// Four-stage candidate-article selection
pub mod selector;

// Output rows: TSV codec, IDs, disambiguation formatting
pub mod rows;

// The two generation pipelines (English-first and Strong's-first)
pub mod pipeline;

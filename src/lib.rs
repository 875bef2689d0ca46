/// twlgen - Translation Words Link generator
///
/// Core library that links occurrences of English surface text in a
/// reference translation to controlled-vocabulary articles, keyed by
/// Strong's lemma attributions.

pub mod config;
pub mod core;
pub mod services;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

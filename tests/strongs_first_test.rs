//! End-to-end Strong's-first generation: token walk -> draft rows ->
//! selector refinement -> main and no-match outputs.

use twlgen::core::pipeline::StrongsFirstPipeline;
use twlgen::core::rows::IdGenerator;
use twlgen::core::selector::ArticleSelector;
use twlgen::core::vocabulary::{strongs::StrongsIndex, Category, Vocabulary};

fn fixture_vocab() -> Vocabulary {
    let mut vocab = Vocabulary::default();
    vocab.insert(Vocabulary::article(
        Category::KeyTerm,
        "god",
        &["God"],
        &[&["H430"], &["G2316"]],
    ));
    vocab.insert(Vocabulary::article(
        Category::KeyTerm,
        "falsegod",
        &["god", "idol"],
        &[&["H430"]],
    ));
    vocab.insert(Vocabulary::article(
        Category::KeyTerm,
        "grace",
        &["grace"],
        &[&["G5485"]],
    ));
    vocab.insert(Vocabulary::article(
        Category::Name,
        "moses",
        &["Moses"],
        &[&["H4872"]],
    ));
    vocab.insert(Vocabulary::article(
        Category::Other,
        "burntoffering",
        &["burnt offering"],
        &[&["H5930", "H5927"]],
    ));
    vocab
}

fn run(
    vocab: &Vocabulary,
    usfm: &str,
) -> twlgen::core::pipeline::GeneratedOutput {
    let _ = env_logger::builder().is_test(true).try_init();
    let index = StrongsIndex::build(vocab);
    let mut pipeline = StrongsFirstPipeline::with_ids(vocab, &index, IdGenerator::with_seed(23));
    let draft = pipeline.generate(usfm);
    let selector = ArticleSelector::new(vocab, &index, false);
    pipeline.refine(draft, &selector)
}

const USFM: &str = r#"\id EXO
\c 1
\v 1 \w God|strong="H430"\w* \w spoke|strong="H1696"\w* \w to|\w* \w Moses|strong="H4872"\w*
\v 2 \w a|\w* \w burnt|strong="H5930"\w* \w offering|strong="H5927"\w* \w of|\w* \w grace|strong="G5485"\w*
"#;

#[test]
fn test_full_strongs_first_run() {
    let vocab = fixture_vocab();
    let output = run(&vocab, USFM);

    // H430 answers two articles: two rows for "God" (kt/falsegod refines to
    // kt/god on the capitalized surface), then Moses, then the sequence and
    // grace rows.
    assert!(output.rows.len() >= 4);

    let god_rows: Vec<_> = output
        .rows
        .iter()
        .filter(|r| r.orig_words == "God")
        .collect();
    assert_eq!(god_rows.len(), 2);
    for row in &god_rows {
        assert_eq!(row.reference, "1:1");
        assert_eq!(row.twlink, "rc://*/tw/dict/bible/kt/god");
        assert_eq!(row.tags, "keyterm");
    }

    let moses = output
        .rows
        .iter()
        .find(|r| r.orig_words == "Moses")
        .expect("Moses row");
    assert_eq!(moses.tags, "name");
    assert_eq!(moses.twlink, "rc://*/tw/dict/bible/names/moses");

    let offering = output
        .rows
        .iter()
        .find(|r| r.orig_words == "burnt offering")
        .expect("sequence row");
    assert_eq!(offering.reference, "1:2");
    assert_eq!(offering.twlink, "rc://*/tw/dict/bible/other/burntoffering");
}

#[test]
fn test_unmatchable_surface_routes_to_no_match() {
    let vocab = fixture_vocab();
    // G5485 maps to kt/grace, but the surface shares no stem with "grace"
    let output = run(&vocab, "\\c 1\n\\v 1 \\w kindness|strong=\"G5485\"\\w*");

    assert!(output.rows.is_empty());
    assert_eq!(output.no_match.len(), 1);
    assert_eq!(output.no_match[0].orig_words, "kindness");
    assert_eq!(output.no_match[0].disambiguation, "(kt/grace)");
}

#[test]
fn test_tokens_without_attribution_are_silent() {
    let vocab = fixture_vocab();
    let output = run(&vocab, "\\c 1\n\\v 1 \\w the\\w* \\w word\\w*");

    assert!(output.rows.is_empty());
    assert!(output.no_match.is_empty());
}

#[test]
fn test_unknown_strong_id_is_silent() {
    let vocab = fixture_vocab();
    let output = run(&vocab, "\\c 1\n\\v 1 \\w word|strong=\"H9999\"\\w*");

    assert!(output.rows.is_empty());
    assert!(output.no_match.is_empty());
}

#[test]
fn test_occurrences_contiguous_per_reference() {
    let vocab = fixture_vocab();
    let usfm = "\\c 1\n\\v 1 \\w grace|strong=\"G5485\"\\w* \\w grace|strong=\"G5485\"\\w* \\w grace|strong=\"G5485\"\\w*";
    let output = run(&vocab, usfm);

    assert_eq!(output.rows.len(), 3);
    for (i, row) in output.rows.iter().enumerate() {
        assert_eq!(row.reference, "1:1");
        assert_eq!(row.orig_words, "grace");
        assert_eq!(row.occurrence, (i + 1) as u32);
    }
}

#[test]
fn test_tags_follow_article_category() {
    let vocab = fixture_vocab();
    let output = run(&vocab, USFM);

    for row in &output.rows {
        let article = row
            .twlink
            .strip_prefix("rc://*/tw/dict/bible/")
            .expect("link prefix");
        let expected = vocab.get(article).expect("article exists").category.tag();
        assert_eq!(row.tags, expected, "tag mismatch for {article}");
    }
}

#[test]
fn test_gl_columns_carry_english_surface() {
    let vocab = fixture_vocab();
    let output = run(&vocab, USFM);

    for row in &output.rows {
        assert_eq!(row.gl_quote, row.orig_words);
        assert_eq!(row.gl_occurrence, row.occurrence.to_string());
    }
}

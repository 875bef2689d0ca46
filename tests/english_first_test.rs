//! End-to-end English-first generation: vocabulary archive -> trie scan ->
//! TSV rows, over an in-memory ZIP fixture and aligned USFM text.

use std::io::{Cursor, Write};

use twlgen::core::pipeline::EnglishFirstPipeline;
use twlgen::core::rows::{self, IdGenerator};
use twlgen::core::vocabulary::Vocabulary;

fn archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut buf);
        let options = zip::write::FileOptions::default();
        for (name, content) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }
    buf.into_inner()
}

fn fixture_vocab() -> Vocabulary {
    let bytes = archive(&[
        ("en_tw/bible/kt/god.md", "# God\n\nArticle body.\n"),
        ("en_tw/bible/kt/falsegod.md", "# god, false god, idol\n"),
        ("en_tw/bible/kt/grace.md", "# grace\n"),
        ("en_tw/bible/kt/love.md", "# love\n"),
        ("en_tw/bible/kt/prophet.md", "# prophet, prophecy\n"),
        ("en_tw/bible/names/moses.md", "# Moses\n"),
    ]);
    Vocabulary::from_zip(&bytes).unwrap()
}

fn generate(vocab: &Vocabulary, usfm: &str) -> Vec<rows::Row> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut pipeline = EnglishFirstPipeline::with_ids(vocab, IdGenerator::with_seed(11));
    pipeline.generate(usfm)
}

const ALIGNED_USFM: &str = r#"\id GEN EN_ULT
\h Genesis
\c 1
\p
\v 1 \zaln-s |x-strong="H7225"\*\w In|x-occurrence="1" x-occurrences="1"\w* \w the|x-occurrence="1" x-occurrences="1"\w* \w beginning|x-occurrence="1" x-occurrences="1"\w*\zaln-e\* \zaln-s |x-strong="H430"\*\w God|x-occurrence="1" x-occurrences="1"\w*\zaln-e\* \w created|x-occurrence="1" x-occurrences="1"\w*
\v 2 \w grace|x-occurrence="1" x-occurrences="2"\w* \w upon|x-occurrence="1" x-occurrences="1"\w* \w grace|x-occurrence="2" x-occurrences="2"\w*
"#;

#[test]
fn test_generation_from_aligned_usfm() {
    let vocab = fixture_vocab();
    let rows = generate(&vocab, ALIGNED_USFM);

    // 1:1 God, 1:2 grace x2
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].reference, "1:1");
    assert_eq!(rows[0].orig_words, "God");
    assert_eq!(rows[0].tags, "keyterm");
    assert_eq!(rows[0].twlink, "rc://*/tw/dict/bible/kt/god");

    assert_eq!(rows[1].reference, "1:2");
    assert_eq!(rows[1].orig_words, "grace");
    assert_eq!(rows[1].occurrence, 1);
    assert_eq!(rows[2].occurrence, 2);
}

#[test]
fn test_god_and_falsegod_split_by_case() {
    let vocab = fixture_vocab();
    let rows = generate(&vocab, "\\c 1\n\\v 1 He is God, not a god");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].orig_words, "God");
    assert_eq!(rows[0].twlink, "rc://*/tw/dict/bible/kt/god");
    assert_eq!(rows[1].orig_words, "god");
    assert_eq!(rows[1].twlink, "rc://*/tw/dict/bible/kt/falsegod");
    for row in &rows {
        assert_eq!(row.disambiguation, "(kt/falsegod, kt/god)");
    }
}

#[test]
fn test_hyphen_and_possessive_extension() {
    let vocab = fixture_vocab();

    let rows = generate(&vocab, "\\c 1\n\\v 1 a God-fearing man");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].orig_words, "God-fearing");

    let rows = generate(&vocab, "\\c 1\n\\v 1 the prophets' message");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].orig_words, "prophets'");
}

#[test]
fn test_inflection_keeps_variant_column_empty() {
    let vocab = fixture_vocab();
    let rows = generate(&vocab, "\\c 1\n\\v 1 we are loving");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].orig_words, "loving");
    assert_eq!(rows[0].variant_of, "");
}

#[test]
fn test_irregular_verb_form_matches_base_term() {
    let bytes = archive(&[("bible/kt/give.md", "# give\n")]);
    let vocab = Vocabulary::from_zip(&bytes).unwrap();
    let rows = generate(&vocab, "\\c 1\n\\v 1 he gave freely");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].orig_words, "gave");
    assert_eq!(rows[0].variant_of, "");
}

#[test]
fn test_name_articles_do_not_pluralize() {
    let vocab = fixture_vocab();
    let rows = generate(&vocab, "\\c 1\n\\v 1 the Moseses gathered");
    assert!(rows.is_empty());

    let rows = generate(&vocab, "\\c 1\n\\v 1 Moses spoke");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tags, "name");
}

#[test]
fn test_tsv_output_shape() {
    let vocab = fixture_vocab();
    let generated = generate(&vocab, ALIGNED_USFM);
    let tsv = rows::to_tsv(&generated);

    let mut lines = tsv.lines();
    let header = lines.next().unwrap();
    assert_eq!(
        header,
        "Reference\tID\tTags\tOrigWords\tOccurrence\tTWLink\tGLQuote\tGLOccurrence\tVariant of\tDisambiguation"
    );
    for line in lines {
        assert_eq!(line.split('\t').count(), 10);
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("twl_GEN.tsv");
    std::fs::write(&path, &tsv).unwrap();
    let read_back = std::fs::read_to_string(&path).unwrap();
    assert_eq!(read_back, tsv);
}

#[test]
fn test_ids_unique_across_whole_output() {
    let vocab = fixture_vocab();
    let mut usfm = String::from("\\c 1\n");
    for v in 1..=50 {
        usfm.push_str(&format!("\\v {v} grace and love for God\n"));
    }
    let rows = generate(&vocab, &usfm);
    assert!(rows.len() >= 150);

    let mut ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total);

    for id in rows.iter().map(|r| r.id.as_str()) {
        assert_eq!(id.len(), 4);
        assert!(id.as_bytes()[0].is_ascii_lowercase());
    }
}

#[test]
fn test_every_twlink_resolves_to_a_loaded_article() {
    let vocab = fixture_vocab();
    let rows = generate(&vocab, ALIGNED_USFM);

    for row in &rows {
        let article = row
            .twlink
            .strip_prefix("rc://*/tw/dict/bible/")
            .expect("link prefix");
        assert!(vocab.contains(article), "missing article: {article}");
    }
}

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use twlgen::config::AppConfig;
use twlgen::core::pipeline::{
    EnglishFirstPipeline, GeneratedOutput, StrongsFirstPipeline,
};
use twlgen::core::selector::ArticleSelector;
use twlgen::core::vocabulary::{strongs::StrongsIndex, Vocabulary};
use twlgen::core::{books, logging, rows};
use twlgen::services::{
    self, Fetcher, HttpQuoteService, MemoryCache, QuoteService, ServiceResult,
};

/// Generate Translation Words Link tables for books of the canon.
#[derive(Parser, Debug)]
#[command(name = "twlgen", version, about)]
struct Args {
    /// Book code to generate (e.g. GEN)
    #[arg(long, conflicts_with = "all")]
    book: Option<String>,

    /// Generate all 66 books
    #[arg(long)]
    all: bool,

    /// Output file (single-book runs only)
    #[arg(long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// Output directory for generated TSV files
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Pipeline mode
    #[arg(long, value_enum, default_value_t = Mode::Strongs)]
    mode: Mode,

    /// Enable the extended conjugation source for article matching
    #[arg(long)]
    extended_conjugations: bool,

    /// Skip the companion quote services (offline runs)
    #[arg(long)]
    no_quotes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Scan clean verse text with the term trie
    English,
    /// Walk USFM tokens and resolve Strong's attributions
    Strongs,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load();

    let targets: Vec<&'static books::Book> = if args.all {
        books::all().collect()
    } else {
        let code = args
            .book
            .as_deref()
            .ok_or("pass --book <code> or --all")?;
        let book = books::lookup(code)
            .ok_or_else(|| format!("Unknown book code: {code}"))?;
        vec![book]
    };

    let fetcher = Fetcher::new(config.endpoints.clone());
    let mut cache = MemoryCache::new(twlgen::VERSION);

    let archive = fetcher.fetch_archive(&mut cache).await?;
    let mut vocab = Vocabulary::from_zip(&archive)?;
    let strongs_list = fetcher.fetch_strongs_list(&mut cache).await?;
    vocab.merge_strongs_list(&strongs_list)?;
    let index = StrongsIndex::build(&vocab);

    let quote_service = HttpQuoteService::new(&config.endpoints);
    let batch = targets.len() > 1;
    let mut failures = 0usize;

    for book in &targets {
        log::info!("Generating {} ({})", book.code, book.name);
        let result = generate_book(
            &args,
            &config,
            &fetcher,
            &quote_service,
            &vocab,
            &index,
            book,
        )
        .await;

        if let Err(e) = result {
            if batch {
                log::error!("{}: {e} — continuing with remaining books", book.code);
                failures += 1;
            } else {
                return Err(e);
            }
        }
    }

    if failures > 0 {
        return Err(format!("{failures} of {} books failed", targets.len()).into());
    }
    Ok(())
}

async fn generate_book(
    args: &Args,
    config: &AppConfig,
    fetcher: &Fetcher,
    quote_service: &HttpQuoteService,
    vocab: &Vocabulary,
    index: &StrongsIndex,
    book: &books::Book,
) -> Result<(), Box<dyn std::error::Error>> {
    let usfm = fetcher.fetch_usfm(book).await?;

    let output = match args.mode {
        Mode::English => {
            let mut pipeline = EnglishFirstPipeline::new(vocab);
            let mut rows = pipeline.generate(&usfm);
            apply_services(&mut rows, quote_service, args.no_quotes, Mode::English).await?;
            GeneratedOutput {
                rows,
                no_match: Vec::new(),
            }
        }
        Mode::Strongs => {
            let mut pipeline = StrongsFirstPipeline::new(vocab, index);
            let mut draft = pipeline.generate(&usfm);
            apply_services(&mut draft.rows, quote_service, args.no_quotes, Mode::Strongs).await?;
            let selector = ArticleSelector::new(vocab, index, args.extended_conjugations);
            pipeline.refine(draft, &selector)
        }
    };

    let out_path = output_path(args, config, book);
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&out_path, rows::to_tsv(&output.rows))?;
    log::info!(
        "{}: wrote {} rows to {}",
        book.code,
        output.rows.len(),
        out_path.display()
    );

    if !output.no_match.is_empty() {
        let no_match_path = no_match_path(&out_path);
        std::fs::write(&no_match_path, rows::to_tsv(&output.no_match))?;
        log::info!(
            "{}: wrote {} unmatched rows to {}",
            book.code,
            output.no_match.len(),
            no_match_path.display()
        );
    }
    Ok(())
}

async fn apply_services(
    rows: &mut Vec<rows::Row>,
    service: &dyn QuoteService,
    no_quotes: bool,
    mode: Mode,
) -> ServiceResult<()> {
    if no_quotes {
        rows::duplicate_gl_columns(rows);
        return Ok(());
    }
    match mode {
        Mode::English => services::finalize_english_first(rows, service).await,
        Mode::Strongs => services::finalize_strongs_first(rows, service).await,
    }
    Ok(())
}

fn output_path(args: &Args, config: &AppConfig, book: &books::Book) -> PathBuf {
    if let Some(out) = &args.out {
        return out.clone();
    }
    let dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| config.out_dir());
    dir.join(format!("twl_{}.tsv", book.code))
}

fn no_match_path(out_path: &Path) -> PathBuf {
    let stem = out_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "twl".to_string());
    out_path.with_file_name(format!("{stem}_no_match.tsv"))
}

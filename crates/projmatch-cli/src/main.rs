use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

mod output;

use output::{ColorMode, ExportFormat};

use projmatch_core::config_file::{self, ConfigFile};
use projmatch_core::{DataDirs, ExtractionStats, paths, read_records, read_tokenized};
use projmatch_pdf::{BookletExtractor, TableParsingConfig, TableParsingConfigBuilder};
use projmatch_pdf_mupdf::MupdfBackend;
use projmatch_recommend::{DEFAULT_MIN_QUERY_WORDS, DEFAULT_TOP_N};

const RECORDS_CSV: &str = "projects_summary.csv";
const TOKENIZED_CSV: &str = "tokenized_projects_summary.csv";

/// Booklet project matcher - extract project listings from PDF booklets and
/// recommend projects for a free-text query
#[derive(Parser, Debug)]
#[command(name = "projmatch", version, about, long_about = None)]
struct Cli {
    /// Root of the managed data directory tree
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Copy booklet PDFs from a directory into the managed raw_pdfs folder
    Import {
        /// Directory to scan recursively for PDFs
        dir: PathBuf,
    },

    /// Extract project records from booklet PDFs into a records CSV
    Extract {
        /// Booklet PDFs to process
        #[arg(required = true)]
        pdfs: Vec<PathBuf>,

        /// Output CSV path (default: <data>/records/projects_summary.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the table pass and use only the description-marker extractor
        #[arg(long)]
        marker_only: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Clean a records CSV and tokenize every description
    Tokenize {
        /// Records CSV produced by `extract`
        records: PathBuf,

        /// Output CSV path (default: <data>/tokenized/tokenized_<input name>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Recommend projects for a free-text query
    Recommend {
        /// The query statement (more than 15 words)
        query: String,

        /// Tokenized CSV to score against
        /// (default: <data>/tokenized/tokenized_projects_summary.csv)
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Number of recommendations to return
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Output format when writing to a file or piping
        #[arg(long, value_enum, default_value = "text")]
        format: ExportFormat,

        /// Write results to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Run the full pipeline: extract, tokenize, recommend
    Run {
        /// The query statement (more than 15 words)
        query: String,

        /// Booklet PDFs to process
        #[arg(required = true)]
        pdfs: Vec<PathBuf>,

        /// Number of recommendations to return
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = config_file::load_config();

    let data_root = cli
        .data_dir
        .clone()
        .or_else(|| {
            config
                .paths
                .as_ref()
                .and_then(|p| p.data_dir.clone())
                .map(PathBuf::from)
        });
    let dirs = DataDirs::resolve(data_root.as_deref());

    match cli.command {
        Command::Import { dir } => import(&dir, &dirs),
        Command::Extract {
            pdfs,
            output,
            marker_only,
            no_color,
        } => {
            let out_path = match output {
                Some(p) => p,
                None => {
                    dirs.ensure()?;
                    dirs.records.join(RECORDS_CSV)
                }
            };
            extract(&pdfs, &out_path, marker_only, ColorMode(!no_color), &config)?;
            Ok(())
        }
        Command::Tokenize {
            records,
            output,
            no_color,
        } => {
            let out_path = match output {
                Some(p) => p,
                None => {
                    dirs.ensure()?;
                    default_tokenized_path(&dirs, &records)
                }
            };
            tokenize(&records, &out_path, ColorMode(!no_color))
        }
        Command::Recommend {
            query,
            corpus,
            top,
            format,
            output,
            no_color,
        } => {
            let corpus_path = corpus.unwrap_or_else(|| dirs.tokenized.join(TOKENIZED_CSV));
            recommend(
                &query,
                &corpus_path,
                top,
                format,
                output.as_deref(),
                ColorMode(!no_color),
                &config,
            )
        }
        Command::Run {
            query,
            pdfs,
            top,
            no_color,
        } => {
            dirs.ensure()?;
            let color = ColorMode(!no_color);
            let records_path = dirs.records.join(RECORDS_CSV);
            extract(&pdfs, &records_path, false, color, &config)?;
            let tokenized_path = dirs.tokenized.join(TOKENIZED_CSV);
            tokenize(&records_path, &tokenized_path, color)?;
            println!();
            recommend(
                &query,
                &tokenized_path,
                top,
                ExportFormat::Text,
                None,
                color,
                &config,
            )
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PROJMATCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Build the table parsing config, applying config-file label overrides.
fn table_config(config: &ConfigFile) -> anyhow::Result<TableParsingConfig> {
    let mut builder = TableParsingConfigBuilder::new();
    if let Some(extract) = &config.extract {
        if let Some(label) = &extract.title_label {
            builder = builder.title_label(label);
        }
        if let Some(label) = &extract.theme_label {
            builder = builder.theme_label(label);
        }
        if let Some(label) = &extract.supervisors_label {
            builder = builder.supervisors_label(label);
        }
        if let Some(label) = &extract.description_label {
            builder = builder.description_label(label);
        }
        if let Some(stops) = &extract.description_stop_labels {
            builder = builder.set_stop_labels(stops.clone());
        }
    }
    Ok(builder.build()?)
}

fn import(dir: &Path, dirs: &DataDirs) -> anyhow::Result<()> {
    if !dir.exists() {
        anyhow::bail!("Directory not found: {}", dir.display());
    }
    dirs.ensure()?;
    let copied = paths::import_pdfs(dir, &dirs.raw_pdfs)?;
    if copied.is_empty() {
        println!("No PDFs found under {}", dir.display());
        return Ok(());
    }
    println!(
        "Copied {} PDF(s) into {}:",
        copied.len(),
        dirs.raw_pdfs.display()
    );
    for path in &copied {
        if let Some(name) = path.file_name() {
            println!("  {}", name.to_string_lossy());
        }
    }
    Ok(())
}

fn extract(
    pdfs: &[PathBuf],
    out_path: &Path,
    marker_only: bool,
    color: ColorMode,
    config: &ConfigFile,
) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};

    for pdf in pdfs {
        if !pdf.exists() {
            anyhow::bail!("File not found: {}", pdf.display());
        }
    }

    let extractor = BookletExtractor::with_config(table_config(config)?);
    let backend = MupdfBackend::new();

    let bar = (pdfs.len() > 1).then(|| {
        let bar = ProgressBar::new(pdfs.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} [{bar:40.cyan/dim}] {pos}/{len}")
                .unwrap()
                .progress_chars("=> "),
        );
        bar
    });

    let mut all_records = Vec::new();
    let mut summaries: Vec<(String, ExtractionStats)> = Vec::new();

    for pdf in pdfs {
        let name = pdf
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| pdf.display().to_string());
        if let Some(bar) = &bar {
            bar.set_message(name.clone());
        }

        let outcome = if marker_only {
            let pages = backend.extract_pages(pdf)?;
            let text: String = pages
                .iter()
                .map(|p| p.plain_text())
                .collect::<Vec<_>>()
                .join("\n");
            let mut outcome = extractor.extract_from_text(&text)?;
            outcome.stats.pages = pages.len();
            outcome
        } else {
            extractor.extract_from_pdf(pdf, &backend)?
        };

        summaries.push((name, outcome.stats.clone()));
        all_records.extend(outcome.records);

        if let Some(bar) = &bar {
            bar.inc(1);
        }
    }

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let mut stdout: Box<dyn Write> = Box::new(std::io::stdout());
    for (name, stats) in &summaries {
        output::print_extraction_summary(&mut stdout, name, stats, color)?;
    }

    projmatch_core::write_records(out_path, &all_records)?;
    if all_records.is_empty() {
        println!(
            "No records found; wrote header-only CSV to {}",
            out_path.display()
        );
    } else {
        println!(
            "Wrote {} record(s) to {}",
            all_records.len(),
            out_path.display()
        );
    }
    Ok(())
}

fn default_tokenized_path(dirs: &DataDirs, records: &Path) -> PathBuf {
    let name = records
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| RECORDS_CSV.to_string());
    dirs.tokenized.join(format!("tokenized_{}", name))
}

fn tokenize(records_path: &Path, out_path: &Path, color: ColorMode) -> anyhow::Result<()> {
    if !records_path.exists() {
        anyhow::bail!(
            "Records CSV not found: {} (run `projmatch extract` first)",
            records_path.display()
        );
    }
    let records = read_records(records_path)?;
    let (tokenized, report) = projmatch_text::tokenize_records(records);

    let mut stdout: Box<dyn Write> = Box::new(std::io::stdout());
    output::print_clean_report(&mut stdout, &report, color)?;

    projmatch_core::write_tokenized(out_path, &tokenized)?;
    println!(
        "Wrote {} tokenized record(s) to {}",
        tokenized.len(),
        out_path.display()
    );
    Ok(())
}

fn recommend(
    query: &str,
    corpus_path: &Path,
    top: Option<usize>,
    format: ExportFormat,
    output: Option<&Path>,
    color: ColorMode,
    config: &ConfigFile,
) -> anyhow::Result<()> {
    if !corpus_path.exists() {
        anyhow::bail!(
            "Tokenized CSV not found: {} (run `projmatch tokenize` first)",
            corpus_path.display()
        );
    }
    let corpus = read_tokenized(corpus_path)?;

    let top_n = top
        .or_else(|| config.recommend.as_ref().and_then(|r| r.top_n))
        .unwrap_or(DEFAULT_TOP_N);
    let min_query_words = config
        .recommend
        .as_ref()
        .and_then(|r| r.min_query_words)
        .unwrap_or(DEFAULT_MIN_QUERY_WORDS);

    let results = projmatch_recommend::recommend(query, &corpus, top_n, min_query_words)?;

    if let Some(path) = output {
        let content = output::export_recommendations(&results, format)
            .map_err(|e| anyhow::anyhow!("Failed to serialize results: {}", e))?;
        std::fs::write(path, content)?;
        println!("Wrote {} result(s) to {}", results.len(), path.display());
    } else if format != ExportFormat::Text {
        let content = output::export_recommendations(&results, format)
            .map_err(|e| anyhow::anyhow!("Failed to serialize results: {}", e))?;
        print!("{}", content);
    } else {
        let mut stdout: Box<dyn Write> = Box::new(std::io::stdout());
        output::print_recommendations(&mut stdout, &results, top_n, color)?;
    }
    Ok(())
}

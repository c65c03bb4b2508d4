use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use inverdex::loader::{build_index, find_files};
use inverdex::repl::{Interpreter, OutputFormat, ResultLog};
use inverdex::{ScoringMethod, SearchConfig};
use std::fs::OpenOptions;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "inverdex")]
#[command(about = "Index a directory of text files and query it with boolean expressions", long_about = None)]
struct Args {
    /// Path to directory of files to index
    data_dir: PathBuf,

    /// Only include data files with these extensions
    #[arg(long = "type", value_name = "EXT", num_args = 1..)]
    types: Vec<String>,

    /// Limit number of included data files (0 = no limit)
    #[arg(long, default_value_t = 0)]
    limit: usize,

    /// Log successful queries and their results to a file
    #[arg(long, value_name = "PATH")]
    outfile: Option<PathBuf>,

    /// Redirect diagnostics to a file or terminal device
    #[arg(long, value_name = "PATH")]
    stderr: Option<PathBuf>,

    /// JSON config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Scoring method, overrides the config file
    #[arg(long, value_enum)]
    scoring: Option<ScoringArg>,

    /// Print one JSON object per query instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScoringArg {
    Frequency,
    Bm25,
}

impl From<ScoringArg> for ScoringMethod {
    fn from(arg: ScoringArg) -> Self {
        match arg {
            ScoringArg::Frequency => ScoringMethod::Frequency,
            ScoringArg::Bm25 => ScoringMethod::bm25(),
        }
    }
}

fn init_tracing(stderr: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (writer, ansi) = match stderr {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open {} for diagnostics", path.display()))?;
            let ansi = file.is_terminal();
            (BoxMakeWriter::new(Mutex::new(file)), ansi)
        }
        None => (BoxMakeWriter::new(io::stderr), io::stderr().is_terminal()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .init();
    Ok(())
}

/// Drops repeated extensions, warning about each one.
fn dedup_types(types: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(types.len());
    for ext in types {
        let ext = ext.trim_start_matches('.').to_string();
        if unique.contains(&ext) {
            warn!("ignoring duplicate --type '{}'", ext);
        } else {
            unique.push(ext);
        }
    }
    unique
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.stderr.as_ref())?;

    let mut config = match &args.config {
        Some(path) => SearchConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SearchConfig::default(),
    };
    if let Some(scoring) = args.scoring {
        config = config.scoring(scoring.into());
    }

    let types = dedup_types(args.types);
    let files = find_files(&args.data_dir, &types, args.limit)
        .with_context(|| format!("failed to search {}", args.data_dir.display()))?;
    if files.is_empty() {
        bail!("no data files found in {}", args.data_dir.display());
    }
    info!("found {} data files", files.len());

    let show_progress = !args.json && config.progress_interval > 0;
    let mut stdout = io::stdout();
    let index = build_index(&files, &config, |i, total| {
        if show_progress {
            let _ = write!(stdout, "\rProcessing document # {} / {}", i, total);
            let _ = stdout.flush();
        }
    });
    if show_progress {
        println!();
    }

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    let stdin = io::stdin();
    let piped = !stdin.is_terminal();
    let mut interpreter = Interpreter::new(&index, &config, stdin.lock(), io::stdout().lock())
        .piped(piped)
        .format(format);

    if let Some(path) = &args.outfile {
        let log = ResultLog::open(path)
            .with_context(|| format!("failed to open result log {}", path.display()))?;
        info!("logging results to {}", log.path().display());
        interpreter = interpreter.result_log(log);
    }

    interpreter.run().context("interpreter failed")?;
    Ok(())
}

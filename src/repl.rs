//! Line-oriented query interpreter.
//!
//! Reads queries and dot-commands from any [`BufRead`], runs them against an
//! [`Index`] and writes result tables (or JSON lines) to any [`Write`]. The
//! same loop serves an interactive terminal and piped input.

use crate::config::SearchConfig;
use crate::error::Result;
use crate::index::Index;
use crate::tokenizer::Tokenizer;
use crate::types::QueryResult;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

pub const PROMPT: &str = ">>> ";
pub const CMD_EXIT: &str = ".exit";
pub const CMD_CLEAR: &str = ".clear";
pub const CMD_AUTOCLEAR: &str = ".autoclear";
pub const CMD_STAT: &str = ".stat";
pub const CMD_INFO: &str = ".info";

const CLEAR_TERMINAL: &str = "\x1b[2J\x1b[H";

/// What the loop should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
  Continue,
  Exit,
}

/// How query results are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
  /// Human readable result table.
  #[default]
  Table,
  /// One JSON object per query.
  Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
  query: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  results: Option<&'a [QueryResult]>,
  #[serde(skip_serializing_if = "Option::is_none")]
  error: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  elapsed_secs: Option<f64>,
}

/// Query interpreter over an input and an output stream.
pub struct Interpreter<'a, R, W> {
  index: &'a Index,
  tokenizer: Tokenizer,
  max_result_rows: usize,
  input: R,
  output: W,
  piped: bool,
  format: OutputFormat,
  auto_clear: bool,
  result_log: Option<ResultLog>,
}

impl<'a, R: BufRead, W: Write> Interpreter<'a, R, W> {
  pub fn new(index: &'a Index, config: &SearchConfig, input: R, output: W) -> Self {
    Self {
      index,
      tokenizer: Tokenizer::new(&config.tokenizer),
      max_result_rows: config.max_result_rows,
      input,
      output,
      piped: false,
      format: OutputFormat::Table,
      auto_clear: false,
      result_log: None,
    }
  }

  /// Treat input as piped: no banner or prompt, each line is echoed instead.
  pub fn piped(mut self, piped: bool) -> Self {
    self.piped = piped;
    self
  }

  pub fn format(mut self, format: OutputFormat) -> Self {
    self.format = format;
    self
  }

  /// Also append every successful query and its results to `log`.
  pub fn result_log(mut self, log: ResultLog) -> Self {
    self.result_log = Some(log);
    self
  }

  /// Runs until `.exit` or end of input.
  pub fn run(&mut self) -> io::Result<()> {
    debug!(piped = self.piped, "starting interpreter");
    writeln!(self.output)?;
    if !self.piped {
      writeln!(self.output, "Exit with the \"{}\" command.", CMD_EXIT)?;
      writeln!(
        self.output,
        "Enter \"{}\" for a list of all available commands.",
        CMD_INFO
      )?;
    }

    let mut line = String::new();
    loop {
      if !self.piped {
        write!(self.output, "{}", PROMPT)?;
        self.output.flush()?;
      }

      line.clear();
      if self.input.read_line(&mut line)? == 0 {
        if self.piped {
          info!("executed all piped queries");
        } else {
          writeln!(self.output)?;
        }
        return Ok(());
      }

      let input = line.trim();
      if input.is_empty() {
        continue;
      }
      if self.piped {
        writeln!(self.output, "{}{}", PROMPT, input)?;
      }

      if self.execute(input)? == Control::Exit {
        return Ok(());
      }
    }
  }

  /// Handles a single trimmed, non-empty line.
  pub fn execute(&mut self, input: &str) -> io::Result<Control> {
    if input.starts_with('.') {
      return self.command(input);
    }

    if self.auto_clear {
      writeln!(self.output, "{}{}{}", CLEAR_TERMINAL, PROMPT, input)?;
    }

    let tokens = self.tokenizer.tokenize_query(input);
    if tokens.is_empty() {
      writeln!(self.output, "Found no usable characters in the query")?;
      return Ok(Control::Continue);
    }

    debug!(input, ?tokens, "running query");
    let started = Instant::now();
    let outcome = self.index.index_query(&tokens);
    let elapsed = started.elapsed().as_secs_f64();

    match outcome {
      Ok(results) => self.report(input, &tokens, &results, elapsed)?,
      Err(err) if err.is_query_error() => match self.format {
        OutputFormat::Table => writeln!(self.output, "Invalid query: {}", err)?,
        OutputFormat::Json => self.write_json(&JsonReport {
          query: input,
          results: None,
          error: Some(err.to_string()),
          elapsed_secs: None,
        })?,
      },
      Err(err) => writeln!(self.output, "Index error: {}", err)?,
    }

    Ok(Control::Continue)
  }

  fn command(&mut self, input: &str) -> io::Result<Control> {
    match input {
      CMD_EXIT => return Ok(Control::Exit),
      CMD_CLEAR => write!(self.output, "{}", CLEAR_TERMINAL)?,
      CMD_AUTOCLEAR => {
        self.auto_clear = !self.auto_clear;
        let state = if self.auto_clear { "on" } else { "off" };
        writeln!(self.output, "autoclear toggled {}", state)?;
      }
      CMD_STAT => {
        let stats = self.index.index_stat();
        writeln!(
          self.output,
          "Index consists of {} documents and {} unique terms",
          stats.documents, stats.terms
        )?;
      }
      CMD_INFO => self.print_commands()?,
      unknown => {
        writeln!(self.output, "Unrecognized command: \"{}\"", unknown)?;
        writeln!(
          self.output,
          "Enter \"{}\" for a list of all available commands.",
          CMD_INFO
        )?;
      }
    }
    Ok(Control::Continue)
  }

  fn print_commands(&mut self) -> io::Result<()> {
    let commands = [
      (CMD_EXIT, "Exit the application"),
      (CMD_CLEAR, "Clear the terminal once"),
      (CMD_AUTOCLEAR, "Toggle clearing the terminal on each new query"),
      (CMD_STAT, "Print the number of indexed documents and unique terms"),
      (CMD_INFO, "Print this message"),
    ];

    writeln!(self.output, "Available commands")?;
    for (command, description) in commands {
      writeln!(self.output, "{:<12} - {}", command, description)?;
    }
    writeln!(
      self.output,
      "Note: Clearing the terminal only works in ANSI/POSIX terminal emulators"
    )
  }

  fn report(
    &mut self,
    input: &str,
    tokens: &[String],
    results: &[QueryResult],
    elapsed: f64,
  ) -> io::Result<()> {
    let table = render_results(results, elapsed, self.max_result_rows);
    self.log_result(&format!("\n{}{}\n{}", PROMPT, input, table));

    if self.format == OutputFormat::Json {
      return self.write_json(&JsonReport {
        query: input,
        results: Some(results),
        error: None,
        elapsed_secs: Some(elapsed),
      });
    }

    write!(self.output, "{}", table)?;
    if results.is_empty() {
      self.suggest(tokens)?;
    }
    Ok(())
  }

  #[cfg(feature = "fuzzy")]
  fn suggest(&mut self, tokens: &[String]) -> io::Result<()> {
    use crate::query::QueryToken;

    let mut seen: Vec<&str> = Vec::new();
    for token in tokens {
      if !matches!(QueryToken::parse(token), QueryToken::Term(_)) {
        continue;
      }
      if seen.contains(&token.as_str()) || self.index.contains_term(token) {
        continue;
      }
      seen.push(token);

      let suggestions = self.index.suggest(token, 3);
      if !suggestions.is_empty() {
        writeln!(
          self.output,
          "no document contains '{}', did you mean: {}",
          token,
          suggestions.join(", ")
        )?;
      }
    }
    Ok(())
  }

  #[cfg(not(feature = "fuzzy"))]
  fn suggest(&mut self, _tokens: &[String]) -> io::Result<()> {
    Ok(())
  }

  fn write_json(&mut self, report: &JsonReport<'_>) -> io::Result<()> {
    let line = serde_json::to_string(report).map_err(io::Error::other)?;
    writeln!(self.output, "{}", line)
  }

  /// Appends to the result log, dropping it for good once a write has failed.
  fn log_result(&mut self, text: &str) {
    let failed = match self.result_log.as_mut() {
      Some(log) => log.write(text).err(),
      None => None,
    };

    if let Some(err) = failed {
      error!("result logging disabled: {}", err);
      self.result_log = None;
    }
  }
}

/// Renders the summary line and the result table for one query.
///
/// At most `max_rows` rows are listed (0 lists all), followed by a count of
/// the rows left out.
pub fn render_results(results: &[QueryResult], elapsed_secs: f64, max_rows: usize) -> String {
  let n = results.len();
  let decimals = if elapsed_secs > 1.0e-3 { 4 } else { 6 };
  let plural = if n == 1 { "" } else { "s" };

  let mut out = format!(
    "=== Found {} result{} in {:.*}s ===\n",
    n, plural, decimals, elapsed_secs
  );
  out.push_str(&format!("{:<10} {}\n", "Score", "Document"));

  let shown = if max_rows == 0 { n } else { n.min(max_rows) };
  for result in &results[..shown] {
    out.push_str(&format!("{:<10.3} {}\n", result.score, result.doc_name));
  }
  if shown < n {
    out.push_str(&format!(" ... and {} more\n", n - shown));
  }

  out
}

/// Append-only log of queries and their results.
#[derive(Debug)]
pub struct ResultLog {
  path: PathBuf,
  file: File,
}

impl ResultLog {
  /// Opens `path` for appending, creating missing parent directories.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let file = Self::open_file(&path)?;
    Ok(Self { path, file })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Appends `text`, reopening the file and retrying once on failure.
  pub fn write(&mut self, text: &str) -> io::Result<()> {
    let err = match self.append(text) {
      Ok(()) => return Ok(()),
      Err(err) => err,
    };

    warn!(
      "failed to write to {}: {}, reopening",
      self.path.display(),
      err
    );
    self.file = Self::open_file(&self.path)?;
    self.append(text)
  }

  fn append(&mut self, text: &str) -> io::Result<()> {
    self.file.write_all(text.as_bytes())?;
    self.file.flush()
  }

  fn open_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
  }
}

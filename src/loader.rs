//! Finding data files on disk and building an index from them.

use crate::config::SearchConfig;
use crate::error::{IndexError, Result};
use crate::index::Index;
use crate::tokenizer::Tokenizer;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Recursively collects regular files under `dir`.
///
/// When `extensions` is non-empty only files whose extension is in the list
/// are kept (case-sensitive, a leading `.` in the filter is ignored). A
/// `limit` of 0 keeps every file. Paths are sorted so ingestion order does
/// not depend on directory iteration order.
pub fn find_files(dir: impl AsRef<Path>, extensions: &[String], limit: usize) -> Result<Vec<PathBuf>> {
  let dir = dir.as_ref();
  if !dir.is_dir() {
    return Err(IndexError::Discovery(format!(
      "'{}' is not a directory",
      dir.display()
    )));
  }

  let wanted: Vec<&str> = extensions
    .iter()
    .map(|ext| ext.trim_start_matches('.'))
    .collect();

  let mut files = Vec::new();
  for entry in WalkDir::new(dir).follow_links(true) {
    let entry = match entry {
      Ok(entry) => entry,
      Err(err) => {
        warn!("skipping unreadable entry: {}", err);
        continue;
      }
    };

    if !entry.file_type().is_file() {
      continue;
    }

    if !wanted.is_empty() {
      let matches = entry
        .path()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| wanted.contains(&ext));
      if !matches {
        continue;
      }
    }

    files.push(entry.into_path());
  }

  files.sort();
  if limit > 0 {
    files.truncate(limit);
  }

  debug!(dir = %dir.display(), files = files.len(), "discovered files");
  Ok(files)
}

/// Reads, tokenizes and indexes every file in `paths`.
///
/// Documents are named by their path. A file that cannot be read is logged
/// and left out; the rest of the index is unaffected. `progress(i, total)` is
/// called for the first file, every `progress_interval` files and the last
/// file, unless the interval is 0.
pub fn build_index<F>(paths: &[PathBuf], config: &SearchConfig, mut progress: F) -> Index
where
  F: FnMut(usize, usize),
{
  let tokenizer = Tokenizer::new(&config.tokenizer);

  #[cfg(feature = "parallel")]
  let documents: Vec<(&PathBuf, std::io::Result<Vec<String>>)> = paths
    .par_iter()
    .map(|path| (path, read_terms(path, &tokenizer)))
    .collect();

  #[cfg(not(feature = "parallel"))]
  let documents: Vec<(&PathBuf, std::io::Result<Vec<String>>)> = paths
    .iter()
    .map(|path| (path, read_terms(path, &tokenizer)))
    .collect();

  let mut index = Index::with_scoring(config.scoring);
  let total = documents.len();
  let interval = config.progress_interval;
  let mut failed = 0;

  for (i, (path, terms)) in documents.into_iter().enumerate() {
    let n = i + 1;
    if interval > 0 && (n == 1 || n % interval == 0 || n == total) {
      progress(n, total);
    }

    let terms = match terms {
      Ok(terms) => terms,
      Err(err) => {
        error!("failed to read {}: {}", path.display(), err);
        failed += 1;
        continue;
      }
    };

    if let Err(err) = index.index_document(path.display().to_string(), terms) {
      error!("failed to index {}: {}", path.display(), err);
      failed += 1;
    }
  }

  let stats = index.index_stat();
  info!(
    documents = stats.documents,
    terms = stats.terms,
    failed,
    "index built"
  );

  index
}

fn read_terms(path: &Path, tokenizer: &Tokenizer) -> std::io::Result<Vec<String>> {
  let bytes = std::fs::read(path)?;
  Ok(tokenizer.tokenize(&String::from_utf8_lossy(&bytes)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::TempDir;

  fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "The cat and the dog").unwrap();
    fs::write(dir.path().join("b.md"), "dog dog bird").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("c.txt"), "fish").unwrap();
    dir
  }

  #[test]
  fn test_find_files_recursive_and_sorted() {
    let dir = data_dir();
    let files = find_files(dir.path(), &[], 0).unwrap();

    let names: Vec<String> = files
      .iter()
      .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
      .collect();
    assert_eq!(names, vec!["a.txt", "b.md", "nested/c.txt"]);
  }

  #[test]
  fn test_find_files_extension_filter_and_limit() {
    let dir = data_dir();

    let txt = find_files(dir.path(), &["txt".to_string()], 0).unwrap();
    assert_eq!(txt.len(), 2);

    let dotted = find_files(dir.path(), &[".md".to_string()], 0).unwrap();
    assert_eq!(dotted.len(), 1);

    let limited = find_files(dir.path(), &[], 1).unwrap();
    assert_eq!(limited.len(), 1);
  }

  #[test]
  fn test_find_files_missing_dir() {
    let dir = TempDir::new().unwrap();
    let err = find_files(dir.path().join("nope"), &[], 0).unwrap_err();
    assert!(matches!(err, IndexError::Discovery(_)));
  }

  #[test]
  fn test_build_index_skips_unreadable_files() {
    let dir = data_dir();
    let mut files = find_files(dir.path(), &[], 0).unwrap();
    files.push(dir.path().join("missing.txt"));

    let mut calls = Vec::new();
    let config = SearchConfig::default();
    let index = build_index(&files, &config, |i, total| calls.push((i, total)));

    let stats = index.index_stat();
    assert_eq!(stats.documents, 3);
    assert!(index.contains_term("dog"));
    assert_eq!(calls, vec![(1, 4), (4, 4)]);

    let results = index.index_query(&["dog"]).unwrap();
    assert!(results[0].doc_name.ends_with("b.md"));
    assert_eq!(results[0].score, 2.0);
  }

  #[test]
  fn test_build_index_progress_interval() {
    let dir = data_dir();
    let files = find_files(dir.path(), &[], 0).unwrap();

    let mut calls = Vec::new();
    let config = SearchConfig {
      progress_interval: 2,
      ..SearchConfig::default()
    };
    build_index(&files, &config, |i, _| calls.push(i));
    assert_eq!(calls, vec![1, 2, 3]);

    let mut calls = 0;
    let config = SearchConfig {
      progress_interval: 0,
      ..SearchConfig::default()
    };
    build_index(&files, &config, |_, _| calls += 1);
    assert_eq!(calls, 0);
  }
}

use inverdex::loader::{build_index, find_files};
use inverdex::repl::{Interpreter, ResultLog};
use inverdex::SearchConfig;
use std::fs;
use tempfile::TempDir;

fn corpus() -> TempDir {
  let dir = TempDir::new().unwrap();
  fs::write(dir.path().join("cats.txt"), "Cats chase mice. Cats sleep.").unwrap();
  fs::write(dir.path().join("dogs.txt"), "Dogs chase cats and cars.").unwrap();
  fs::write(dir.path().join("notes.md"), "Mice eat cheese.").unwrap();
  dir
}

fn session(config: &SearchConfig, data: &TempDir, input: &str) -> String {
  let files = find_files(data.path(), &["txt".to_string()], 0).unwrap();
  let index = build_index(&files, config, |_, _| {});

  let mut out = Vec::new();
  Interpreter::new(&index, config, input.as_bytes(), &mut out)
    .piped(true)
    .run()
    .unwrap();
  String::from_utf8(out).unwrap()
}

#[test]
fn test_end_to_end_session() {
  let data = corpus();
  let out = session(
    &SearchConfig::default(),
    &data,
    ".stat\ncats & chase\nmice | cheese\n!dogs\n",
  );

  assert!(out.contains("Index consists of 2 documents and 7 unique terms\n"));

  let cats_and_chase = out.split(">>> ").nth(2).unwrap();
  assert!(cats_and_chase.starts_with("cats & chase\n=== Found 2 results in"));
  let rows: Vec<&str> = cats_and_chase.lines().skip(3).collect();
  assert!(rows[0].starts_with("3.000") && rows[0].ends_with("cats.txt"));
  assert!(rows[1].starts_with("2.000") && rows[1].ends_with("dogs.txt"));

  let mice = out.split(">>> ").nth(3).unwrap();
  assert!(mice.contains("=== Found 1 result in"));
  assert!(!mice.contains("notes.md"));

  let not_dogs = out.split(">>> ").nth(4).unwrap();
  assert!(not_dogs.contains("0.000      "));
  assert!(not_dogs.contains("cats.txt"));
}

#[test]
fn test_result_rows_are_capped() {
  let data = TempDir::new().unwrap();
  for i in 0..5 {
    fs::write(data.path().join(format!("{}.txt", i)), "shared").unwrap();
  }

  let config = SearchConfig::default().max_result_rows(2);
  let out = session(&config, &data, "shared\n");
  assert!(out.contains("=== Found 5 results in"));
  assert!(out.contains(" ... and 3 more\n"));
}

#[test]
fn test_result_log_records_queries() {
  let data = corpus();
  let log_dir = TempDir::new().unwrap();
  let log_path = log_dir.path().join("out").join("queries.log");

  let config = SearchConfig::default();
  let files = find_files(data.path(), &[], 0).unwrap();
  let index = build_index(&files, &config, |_, _| {});

  let mut out = Vec::new();
  Interpreter::new(&index, &config, "cheese\n(cheese\n".as_bytes(), &mut out)
    .piped(true)
    .result_log(ResultLog::open(&log_path).unwrap())
    .run()
    .unwrap();

  let logged = fs::read_to_string(&log_path).unwrap();
  assert!(logged.starts_with("\n>>> cheese\n=== Found 1 result in"));
  assert!(logged.trim_end().ends_with("notes.md"));
  assert_eq!(logged.matches(">>> ").count(), 1);
}

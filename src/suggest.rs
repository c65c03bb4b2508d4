//! "Did you mean" suggestions for query terms missing from the index.
//!
//! Candidates are compared with Jaro-Winkler similarity. Terms whose length
//! differs from the input by more than half of the longer one are pruned
//! before scoring.

use strsim::jaro_winkler;

/// Minimum Jaro-Winkler similarity for a candidate to be suggested.
pub const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Returns up to `limit` candidates similar to `term`, best first.
///
/// Ties are broken alphabetically. `term` itself is never suggested.
pub fn suggest_terms<'a>(
  term: &str,
  candidates: impl Iterator<Item = &'a str>,
  limit: usize,
) -> Vec<String> {
  let term_len = term.chars().count();

  let mut scored: Vec<(f64, &str)> = candidates
    .filter(|candidate| *candidate != term)
    .filter(|candidate| {
      let candidate_len = candidate.chars().count();
      let len_diff = term_len.abs_diff(candidate_len);
      let max_len = term_len.max(candidate_len);
      max_len == 0 || len_diff * 2 <= max_len
    })
    .filter_map(|candidate| {
      let similarity = jaro_winkler(term, candidate);
      (similarity >= SUGGESTION_THRESHOLD).then_some((similarity, candidate))
    })
    .collect();

  scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
  scored
    .into_iter()
    .take(limit)
    .map(|(_, candidate)| candidate.to_string())
    .collect()
}

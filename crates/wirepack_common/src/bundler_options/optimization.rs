use serde::Serialize;

use crate::BuildMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkSplitStrategy {
  All,
  Initial,
  Async,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Minimizer {
  Scripts,
  Styles,
}

/// Common-chunk extraction is always on; the minimizer list is populated
/// only in production.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationOptions {
  pub split_chunks: ChunkSplitStrategy,
  pub minimizers: Vec<Minimizer>,
}

impl OptimizationOptions {
  pub fn standard(mode: BuildMode) -> Self {
    let minimizers =
      if mode.is_prod() { vec![Minimizer::Styles, Minimizer::Scripts] } else { Vec::new() };
    Self { split_chunks: ChunkSplitStrategy::All, minimizers }
  }

  pub fn minimize(&self) -> bool {
    !self.minimizers.is_empty()
  }
}

#[test]
fn test_optimization_follows_mode() {
  let dev = OptimizationOptions::standard(BuildMode::Development);
  assert_eq!(dev.split_chunks, ChunkSplitStrategy::All);
  assert!(!dev.minimize());

  let prod = OptimizationOptions::standard(BuildMode::Production);
  assert_eq!(prod.split_chunks, ChunkSplitStrategy::All);
  assert_eq!(prod.minimizers, vec![Minimizer::Styles, Minimizer::Scripts]);
}

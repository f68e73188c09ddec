mod bundler;
mod stages;
mod types;
mod utils;

pub use crate::{
  bundler::Bundler,
  types::bundle_output::{BundleOutput, OutputAsset},
  utils::normalize_options::{NormalizeOptionsReturn, normalize_options},
};
pub use wirepack_common::*;
pub use wirepack_error::{BuildError, BuildResult};

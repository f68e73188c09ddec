use std::path::Path;

use wirepack_fs::FileSystem;

/// Per-file surroundings a pipeline run needs: where relative imports are
/// resolved from and where `svg-load()` references look for icon files.
#[derive(Clone, Copy)]
pub struct TransformContext<'a> {
  pub fs: &'a dyn FileSystem,
  pub file_dir: &'a Path,
  pub icon_dir: &'a Path,
}

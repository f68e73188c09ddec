use std::path::PathBuf;

use clap::Args;

use crate::types::build_mode::BuildMode;

#[derive(Args)]
pub struct InputArgs {
  #[clap(long)]
  pub cwd: Option<PathBuf>,

  #[clap(long, action = clap::ArgAction::Append)]
  pub input: Option<Vec<PathBuf>>,

  /// Defaults to the WIREPACK_MODE environment variable, then development.
  #[clap(long, short = 'm')]
  pub mode: Option<BuildMode>,
}

#[derive(Args)]
pub struct OutputArgs {
  #[clap(long, short = 'd')]
  pub dir: Option<String>,

  #[clap(long)]
  pub public_path: Option<String>,

  #[clap(long)]
  pub entry_filenames: Option<String>,

  #[clap(long)]
  pub css_filenames: Option<String>,

  #[clap(long)]
  pub asset_filenames: Option<String>,
}

#[derive(Args)]
pub struct BehaviorArgs {
  /// Validate the configuration without emitting anything.
  #[clap(long)]
  pub check: bool,

  /// Print the resolved configuration as JSON and exit.
  #[clap(long)]
  pub show_config: bool,

  #[clap(long)]
  pub silent: bool,
}

use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum BuildMode {
  Development,
  Production,
}

impl From<BuildMode> for wirepack::BuildMode {
  fn from(value: BuildMode) -> Self {
    match value {
      BuildMode::Development => wirepack::BuildMode::Development,
      BuildMode::Production => wirepack::BuildMode::Production,
    }
  }
}

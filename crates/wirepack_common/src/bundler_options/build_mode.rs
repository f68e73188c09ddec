use std::str::FromStr;

use serde::Serialize;

/// Environment variable consulted by [`BuildMode::from_env`]. Absence means
/// development.
pub const MODE_ENV_VAR: &str = "WIREPACK_MODE";

/// The single flag every environment-dependent setting derives from. Output
/// naming, minification, source maps, hot reload and the analyzer step are
/// all pure functions of this value, so no inconsistent combination can be
/// configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
  #[default]
  Development,
  Production,
}

impl BuildMode {
  pub fn from_env() -> Self {
    std::env::var(MODE_ENV_VAR).ok().and_then(|value| value.parse().ok()).unwrap_or_default()
  }

  pub fn is_dev(self) -> bool {
    matches!(self, Self::Development)
  }

  pub fn is_prod(self) -> bool {
    matches!(self, Self::Production)
  }
}

impl FromStr for BuildMode {
  type Err = String;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value.to_ascii_lowercase().as_str() {
      "development" | "dev" => Ok(Self::Development),
      "production" | "prod" => Ok(Self::Production),
      other => Err(format!("unknown build mode `{other}`")),
    }
  }
}

#[test]
fn test_build_mode_from_str() {
  assert_eq!("development".parse::<BuildMode>().unwrap(), BuildMode::Development);
  assert_eq!("PROD".parse::<BuildMode>().unwrap(), BuildMode::Production);
  assert!("staging".parse::<BuildMode>().is_err());
}

#[test]
fn test_build_mode_defaults_to_development() {
  assert_eq!(BuildMode::default(), BuildMode::Development);
}

use std::fmt;
use std::ops::{Deref, DerefMut};

#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

/// Malformed or missing configuration input.
#[derive(Debug)]
pub struct ConfigError {
  message: String,
}

/// An import, alias or rule lookup that cannot be resolved.
#[derive(Debug)]
pub struct ResolutionError {
  message: String,
}

/// A pipeline step that cannot process its input.
#[derive(Debug)]
pub struct TransformError {
  message: String,
}

macro_rules! impl_leaf_error {
  ($ty:ident, $ctor:ident, $prefix:literal) => {
    impl fmt::Display for $ty {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, concat!($prefix, ": {}"), self.message)
      }
    }

    impl std::error::Error for $ty {}

    pub fn $ctor(message: impl Into<String>) -> anyhow::Error {
      anyhow::Error::new($ty { message: message.into() })
    }
  };
}

impl_leaf_error!(ConfigError, config_error, "invalid configuration");
impl_leaf_error!(ResolutionError, resolution_error, "failed to resolve");
impl_leaf_error!(TransformError, transform_error, "failed to transform");

#[test]
fn test_leaf_errors_downcast() {
  let error = resolution_error("unknown extension `.wat`");
  assert!(error.downcast_ref::<ResolutionError>().is_some());
  assert!(error.downcast_ref::<ConfigError>().is_none());
  assert_eq!(error.to_string(), "failed to resolve: unknown extension `.wat`");
}

#[test]
fn test_build_error_aggregates() {
  let errors: BuildError =
    vec![config_error("missing entry"), transform_error("bad stylesheet")].into();
  assert_eq!(errors.len(), 2);
}

use std::path::Path;

use indexmap::IndexMap;

use wirepack_error::{BuildResult, config_error};
use wirepack_fs::FileSystem;

/// Variable definitions sourced from the external JSON document, in
/// declaration order.
pub type VariableMap = IndexMap<String, serde_json::Value>;

/// Reads the variable document once at config-load time. A missing file or
/// anything other than a JSON object of name/value pairs is a fatal
/// configuration error.
pub fn load_variables(fs: &dyn FileSystem, path: &Path) -> BuildResult<VariableMap> {
  let source = fs.read_to_string(path).map_err(|error| {
    config_error(format!("cannot read variable document `{}`: {error}", path.display()))
  })?;
  let variables = serde_json::from_str::<VariableMap>(&source).map_err(|error| {
    config_error(format!("variable document `{}` is not a JSON object: {error}", path.display()))
  })?;
  Ok(variables)
}

/// How a variable value appears when substituted into a stylesheet. String
/// values substitute verbatim; structured values have no stylesheet
/// representation and leave the reference untouched.
pub fn render_variable(value: &serde_json::Value) -> Option<String> {
  match value {
    serde_json::Value::String(value) => Some(value.clone()),
    serde_json::Value::Number(value) => Some(value.to_string()),
    serde_json::Value::Bool(value) => Some(value.to_string()),
    serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use wirepack_error::ConfigError;
  use wirepack_fs::MemoryFileSystem;

  #[test]
  fn loads_an_object_document() {
    let fs = MemoryFileSystem::new(&[(
      "/project/src/styles/variables.json",
      r##"{ "primary": "#3eaf7c", "gutter": 24 }"##,
    )]);
    let variables =
      load_variables(&fs, Path::new("/project/src/styles/variables.json")).unwrap();
    assert_eq!(variables.len(), 2);
    assert_eq!(render_variable(&variables["primary"]).unwrap(), "#3eaf7c");
    assert_eq!(render_variable(&variables["gutter"]).unwrap(), "24");
  }

  #[test]
  fn missing_document_is_a_config_error() {
    let fs = MemoryFileSystem::default();
    let errors = load_variables(&fs, Path::new("/nowhere.json")).unwrap_err();
    assert!(errors[0].downcast_ref::<ConfigError>().is_some());
  }

  #[test]
  fn non_object_document_is_a_config_error() {
    let fs = MemoryFileSystem::new(&[("/vars.json", r#"["not", "a", "map"]"#)]);
    let errors = load_variables(&fs, Path::new("/vars.json")).unwrap_err();
    assert!(errors[0].downcast_ref::<ConfigError>().is_some());
  }
}

use serde::Serialize;

/// Dev-time HTTP server settings. Configuration only, the serving process
/// itself lives outside this workspace.
#[derive(Debug, Default, Clone)]
pub struct DevServerOptions {
  pub port: Option<u16>,
  pub history_api_fallback: Option<bool>,
  pub overlay: Option<bool>,
}

/// `hot` is not accepted as input, it derives from the build mode.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedDevServerOptions {
  pub port: u16,
  pub hot: bool,
  pub history_api_fallback: bool,
  pub overlay: bool,
}

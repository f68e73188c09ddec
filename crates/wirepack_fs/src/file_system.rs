use std::io;
use std::path::Path;

/// Minimal file-system surface the build needs. Implemented for the real OS
/// and for an in-memory store used in tests.
pub trait FileSystem: Send + Sync {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

  fn read_to_string(&self, path: &Path) -> io::Result<String>;

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

  fn exists(&self, path: &Path) -> bool;

  fn is_file(&self, path: &Path) -> bool;

  fn is_dir(&self, path: &Path) -> bool;

  fn create_dir_all(&self, path: &Path) -> io::Result<()>;

  /// Removes a directory and everything under it. Missing directories are
  /// not an error, callers use this to reset output directories.
  fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

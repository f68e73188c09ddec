use std::fmt;
use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;

use vfs::{FileSystem as VfsFileSystem, MemoryFS, VfsFileType};

use crate::FileSystem;

/// In-memory file system backed by `vfs::MemoryFS`, used to exercise the
/// pipeline and validation stages without touching the disk.
#[derive(Clone, Default)]
pub struct MemoryFileSystem {
  fs: Arc<MemoryFS>,
}

impl fmt::Debug for MemoryFileSystem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("MemoryFileSystem")
  }
}

impl MemoryFileSystem {
  /// Seeds the store with `(path, content)` pairs, creating parent
  /// directories as needed.
  pub fn new(files: &[(&str, &str)]) -> Self {
    let fs = Self::default();
    for (path, content) in files {
      fs.write(Path::new(path), content.as_bytes()).expect("seed file should be writable");
    }
    fs
  }
}

fn to_vfs_path(path: &Path) -> String {
  let mut out = String::new();
  for component in path.components() {
    match component {
      std::path::Component::RootDir | std::path::Component::CurDir => {}
      other => {
        out.push('/');
        out.push_str(&other.as_os_str().to_string_lossy());
      }
    }
  }
  out
}

fn into_io_error(error: vfs::VfsError) -> io::Error {
  io::Error::new(io::ErrorKind::Other, error.to_string())
}

impl MemoryFileSystem {
  fn file_type(&self, path: &str) -> Option<VfsFileType> {
    self.fs.metadata(path).ok().map(|metadata| metadata.file_type)
  }

  fn remove_dir_contents(&self, path: &str) -> io::Result<()> {
    let entries: Vec<String> = self.fs.read_dir(path).map_err(into_io_error)?.collect();
    for entry in entries {
      let child = format!("{path}/{entry}");
      match self.file_type(&child) {
        Some(VfsFileType::Directory) => {
          self.remove_dir_contents(&child)?;
          self.fs.remove_dir(&child).map_err(into_io_error)?;
        }
        _ => self.fs.remove_file(&child).map_err(into_io_error)?,
      }
    }
    Ok(())
  }
}

impl FileSystem for MemoryFileSystem {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    let path = to_vfs_path(path);
    if !self.fs.exists(&path).unwrap_or(false) {
      return Err(io::Error::new(io::ErrorKind::NotFound, format!("{path} not found")));
    }
    let mut reader = self.fs.open_file(&path).map_err(into_io_error)?;
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;
    Ok(content)
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    let content = self.read(path)?;
    String::from_utf8(content)
      .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "not valid utf-8"))
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
      self.create_dir_all(parent)?;
    }
    let path = to_vfs_path(path);
    let mut writer = self.fs.create_file(&path).map_err(into_io_error)?;
    writer.write_all(content)?;
    writer.flush()?;
    Ok(())
  }

  fn exists(&self, path: &Path) -> bool {
    self.fs.exists(&to_vfs_path(path)).unwrap_or(false)
  }

  fn is_file(&self, path: &Path) -> bool {
    matches!(self.file_type(&to_vfs_path(path)), Some(VfsFileType::File))
  }

  fn is_dir(&self, path: &Path) -> bool {
    let path = to_vfs_path(path);
    path.is_empty() || matches!(self.file_type(&path), Some(VfsFileType::Directory))
  }

  fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    let path = to_vfs_path(path);
    if path.is_empty() {
      return Ok(());
    }
    let mut prefix = String::new();
    for segment in path.split('/').skip(1) {
      prefix.push('/');
      prefix.push_str(segment);
      if !self.fs.exists(&prefix).unwrap_or(false) {
        self.fs.create_dir(&prefix).map_err(into_io_error)?;
      }
    }
    Ok(())
  }

  fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
    let vfs_path = to_vfs_path(path);
    if !self.fs.exists(&vfs_path).unwrap_or(false) {
      return Ok(());
    }
    self.remove_dir_contents(&vfs_path)?;
    if !vfs_path.is_empty() {
      self.fs.remove_dir(&vfs_path).map_err(into_io_error)?;
    }
    Ok(())
  }
}

#[test]
fn test_memory_file_system_round_trip() {
  let fs = MemoryFileSystem::new(&[("/project/src/main.js", "console.log(1)")]);
  assert!(fs.is_file(Path::new("/project/src/main.js")));
  assert!(fs.is_dir(Path::new("/project/src")));
  assert_eq!(
    fs.read_to_string(Path::new("/project/src/main.js")).unwrap(),
    "console.log(1)"
  );
  assert!(fs.read(Path::new("/project/missing.js")).is_err());
}

#[test]
fn test_memory_file_system_remove_dir_all() {
  let fs = MemoryFileSystem::new(&[("/dist/a.js", "a"), ("/dist/assets/b.png", "b")]);
  fs.remove_dir_all(Path::new("/dist")).unwrap();
  assert!(!fs.exists(Path::new("/dist")));
  // Removing a directory that is already gone is not an error.
  fs.remove_dir_all(Path::new("/dist")).unwrap();
}

//! Whole-file reads into an owned byte [`Array`].

use std::{
  fs::File,
  io::{
    self,
    Read,
  },
  mem,
  path::Path,
};

use crate::{
  array::Array,
  error::FileError,
  range::PointerRangeMut,
};

pub struct FileReader {
  file: File,
}

impl FileReader {
  pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FileError> {
    let file = File::open(path)?;
    Ok(Self { file })
  }

  pub fn file_size(&self) -> Result<u64, FileError> {
    Ok(self.file.metadata()?.len())
  }

  /// Fill `dest` from the current file position. Returns the part of `dest`
  /// left unfilled, which is non-empty only when the file ended first.
  pub fn read<'a>(&mut self, dest: PointerRangeMut<'a, u8>) -> Result<PointerRangeMut<'a, u8>, FileError> {
    let mut rest = dest.into_slice();
    while !rest.is_empty() {
      match self.file.read(rest) {
        Ok(0) => break,
        Ok(count) => {
          let filled = mem::take(&mut rest);
          rest = &mut filled[count..];
        }
        Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
        Err(err) => return Err(err.into()),
      }
    }
    Ok(PointerRangeMut::new(rest))
  }
}

/// Read the whole file at `path`.
pub fn load_file_to_array<P: AsRef<Path>>(path: P) -> Result<Array<u8>, FileError> {
  let mut reader = FileReader::open(path)?;
  let size = reader.file_size()?;
  let len = usize::try_from(size).map_err(|_| FileError::TooLarge(size))?;

  let mut bytes = Array::new();
  bytes.try_reserve(len)?;
  bytes.add_defaulted(len);
  let unread = reader.read(bytes.range_mut())?.len();
  bytes.truncate(len - unread);
  debug!(len = bytes.len(), "file loaded");
  Ok(bytes)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::{
    env,
    fs,
    path::PathBuf,
    process,
  };

  fn scratch(name: &str, contents: &[u8]) -> PathBuf {
    let path = env::temp_dir().join(format!("mu_core_{}_{name}", process::id()));
    fs::write(&path, contents).expect("scratch file");
    path
  }

  #[test]
  fn loads_whole_file() {
    let contents: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
    let path = scratch("whole", &contents);
    let bytes = load_file_to_array(&path).expect("load");
    assert_eq!(bytes[..], contents[..]);
    fs::remove_file(path).ok();
  }

  #[test]
  fn empty_file_gives_empty_array() {
    let path = scratch("empty", b"");
    let bytes = load_file_to_array(&path).expect("load");
    assert!(bytes.is_empty());
    fs::remove_file(path).ok();
  }

  #[test]
  fn missing_file_is_io_error() {
    let result = load_file_to_array("/definitely/not/here/mu_core.bin");
    assert!(matches!(result, Err(FileError::Io(_))));
  }

  #[test]
  fn read_returns_unfilled_remainder() {
    let path = scratch("short", b"abc");
    let mut reader = FileReader::open(&path).expect("open");
    assert_eq!(reader.file_size().expect("size"), 3);
    let mut buffer = [0u8; 8];
    let rest = reader.read(PointerRangeMut::new(&mut buffer)).expect("read");
    assert_eq!(rest.len(), 5);
    assert_eq!(&buffer[..3], b"abc");
    fs::remove_file(path).ok();
  }

  #[test]
  fn read_in_pieces() {
    let path = scratch("pieces", b"0123456789");
    let mut reader = FileReader::open(&path).expect("open");
    let mut head = [0u8; 4];
    let mut tail = [0u8; 6];
    assert!(reader.read(PointerRangeMut::new(&mut head)).expect("read").len() == 0);
    assert!(reader.read(PointerRangeMut::new(&mut tail)).expect("read").len() == 0);
    assert_eq!(&head, b"0123");
    assert_eq!(&tail, b"456789");
    fs::remove_file(path).ok();
  }
}

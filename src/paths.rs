//! Path splitting over byte ranges.
//!
//! Both `/` and `\` separate components. Results are sub-ranges of the input;
//! nothing is copied.

use std::env;

use once_cell::sync::OnceCell;

use crate::{
  algorithms::find_last,
  array::Array,
  range::{
    PointerRange,
    Range,
  },
};

fn is_separator(byte: &u8) -> bool {
  matches!(byte, b'/' | b'\\')
}

/// Everything up to and including the last separator, or an empty range for a
/// bare filename.
pub fn directory(path: PointerRange<'_, u8>) -> PointerRange<'_, u8> {
  let mut last = find_last(path, is_separator);
  if last.is_empty() {
    return PointerRange::empty();
  }
  last.advance();
  path.until(&last)
}

/// Everything after the last separator.
pub fn filename(path: PointerRange<'_, u8>) -> PointerRange<'_, u8> {
  let mut last = find_last(path, is_separator);
  if last.is_empty() {
    return path;
  }
  last.advance();
  last
}

/// The part of the filename after its last dot. Empty when there is no dot,
/// when nothing follows it, or when the dot opens the filename (`.`, `..`,
/// `.profile`).
pub fn extension(path: PointerRange<'_, u8>) -> PointerRange<'_, u8> {
  let name = filename(path);
  let mut dot = find_last(name, |byte: &u8| *byte == b'.');
  if dot.is_empty() || dot.len() == name.len() {
    return PointerRange::empty();
  }
  dot.advance();
  dot
}

static EXECUTABLE_PATH: OnceCell<Array<u8>> = OnceCell::new();

/// Path of the running executable, resolved on first use and cached for the
/// rest of the process. Empty when the platform cannot report it.
#[cfg_attr(not(feature = "logging"), allow(unused_variables))]
pub fn executable_path() -> PointerRange<'static, u8> {
  let path = EXECUTABLE_PATH.get_or_init(|| match env::current_exe() {
    Ok(path) => Array::from(path.to_string_lossy().as_bytes()),
    Err(err) => {
      debug!(%err, "executable path unavailable");
      Array::new()
    }
  });
  path.range()
}

/// Directory of the running executable, with its trailing separator.
pub fn executable_directory() -> PointerRange<'static, u8> {
  directory(executable_path())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn bytes(range: PointerRange<'_, u8>) -> &str {
    core::str::from_utf8(range.as_slice()).unwrap_or("<invalid>")
  }

  fn path(text: &str) -> PointerRange<'_, u8> {
    PointerRange::new(text.as_bytes())
  }

  #[test]
  fn extension_of_plain_filename() {
    assert_eq!(bytes(extension(path("foo.txt"))), "txt");
  }

  #[test]
  fn extension_takes_the_last_dot() {
    assert_eq!(bytes(extension(path("foo.txt.zip"))), "zip");
  }

  #[test]
  fn dot_entries_have_no_extension() {
    for text in [".", "..", "../Foo/Bar/.", "/Foo/Bar/..", ".profile", "foo."] {
      assert!(extension(path(text)).is_empty(), "{text}");
    }
  }

  #[test]
  fn directories_and_bare_names_have_no_extension() {
    assert!(extension(path("../Foo/Bar/Baz/")).is_empty());
    assert!(extension(path("../Foo/Bar/Baz")).is_empty());
    assert!(extension(path("../Foo.d/Baz")).is_empty());
  }

  #[test]
  fn extension_after_relative_path() {
    assert_eq!(bytes(extension(path("../Foo/Bar/Baz.txt"))), "txt");
  }

  #[test]
  fn filename_cases() {
    assert_eq!(bytes(filename(path("foo.txt"))), "foo.txt");
    assert_eq!(bytes(filename(path("../bar/baz/foo.txt"))), "foo.txt");
    assert_eq!(bytes(filename(path("/foo.txt"))), "foo.txt");
    assert_eq!(bytes(filename(path("foo.txt.zip"))), "foo.txt.zip");
    assert!(filename(path("dir/")).is_empty());
  }

  #[test]
  fn directory_cases() {
    assert_eq!(bytes(directory(path("../bar/baz/foo.txt"))), "../bar/baz/");
    assert_eq!(bytes(directory(path("C:\\dir\\file"))), "C:\\dir\\");
    assert_eq!(bytes(directory(path("/foo.txt"))), "/");
    assert!(directory(path("foo.txt")).is_empty());
  }

  #[test]
  fn results_are_sub_ranges_of_the_input() {
    let text = "a/b.c";
    let name = filename(path(text));
    assert_eq!(name.as_ptr(), text[2..].as_ptr());
  }

  #[test]
  fn executable_path_is_cached() {
    let first = executable_path();
    let second = executable_path();
    assert_eq!(first, second);
    assert!(!first.is_empty());
    let dir = executable_directory();
    assert!(first.as_slice().starts_with(dir.as_slice()));
    assert!(!filename(first).is_empty());
  }
}

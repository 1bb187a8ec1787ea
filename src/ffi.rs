//! C surface for handing file contents across the language boundary.

use core::{
  ffi::{
    CStr,
    c_char,
  },
  ptr,
};

use crate::{
  array::Array,
  file::load_file_to_array,
  paths,
};

/// Byte blob owned by this library. Release it with [`mu_byte_buffer_free`].
#[repr(C)]
pub struct ByteBuffer {
  pub ptr: *mut u8,
  pub len: usize,
  pub capacity: usize,
}

impl ByteBuffer {
  const fn null() -> Self {
    ByteBuffer {
      ptr: ptr::null_mut(),
      len: 0,
      capacity: 0,
    }
  }
}

impl From<Array<u8>> for ByteBuffer {
  fn from(bytes: Array<u8>) -> Self {
    let (ptr, len, capacity) = bytes.into_raw_parts();
    ByteBuffer { ptr, len, capacity }
  }
}

/// Load the whole file at the NUL-terminated UTF-8 `path`. Failure yields a
/// buffer with a null `ptr`.
///
/// # Safety
///
/// `path` must be null or point to a valid NUL-terminated string.
#[unsafe(no_mangle)]
#[cfg_attr(not(feature = "logging"), allow(unused_variables))]
pub unsafe extern "C" fn mu_load_file(path: *const c_char) -> ByteBuffer {
  if path.is_null() {
    return ByteBuffer::null();
  }
  // SAFETY: checked for null above, validity is on the caller
  let path = unsafe { CStr::from_ptr(path) };
  let Ok(path) = path.to_str() else {
    error!("mu_load_file: path is not valid UTF-8");
    return ByteBuffer::null();
  };
  match load_file_to_array(path) {
    Ok(bytes) => bytes.into(),
    Err(err) => {
      error!(path, %err, "mu_load_file failed");
      ByteBuffer::null()
    }
  }
}

/// Release a buffer returned by this library. A null buffer is ignored.
///
/// # Safety
///
/// `buffer` must come from this library and must not be freed twice.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mu_byte_buffer_free(buffer: ByteBuffer) {
  if buffer.ptr.is_null() {
    return;
  }
  // SAFETY: the parts were produced by Array::into_raw_parts
  drop(unsafe { Array::from_raw_parts(buffer.ptr, buffer.len, buffer.capacity) });
}

/// Path of the running executable, cached for the process lifetime. The
/// returned buffer borrows static storage and must not be freed.
#[unsafe(no_mangle)]
pub extern "C" fn mu_executable_path() -> ByteBuffer {
  let path = paths::executable_path();
  ByteBuffer {
    ptr: path.as_ptr() as *mut u8,
    len: path.len(),
    capacity: 0,
  }
}

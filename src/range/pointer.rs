use core::{
  fmt,
  marker::PhantomData,
  ops::Index,
  ptr::{
    self,
    NonNull,
  },
  slice,
};

use super::{
  Range,
  RangeMut,
};

/// A linear range over borrowed, contiguous elements.
///
/// Copying the range copies the cursor, never the elements.
pub struct PointerRange<'a, T> {
  rest: &'a [T],
}

impl<'a, T> PointerRange<'a, T> {
  pub const fn new(items: &'a [T]) -> Self {
    Self { rest: items }
  }

  pub const fn empty() -> Self {
    Self { rest: &[] }
  }

  /// Skip `num` elements, stopping at the end.
  pub fn advance_by(&mut self, num: usize) {
    let num = num.min(self.rest.len());
    self.rest = &self.rest[num..];
  }

  pub const fn len(&self) -> usize {
    self.rest.len()
  }

  pub const fn as_ptr(&self) -> *const T {
    self.rest.as_ptr()
  }

  /// The unconsumed elements, with the borrow of the underlying storage.
  pub const fn as_slice(&self) -> &'a [T] {
    self.rest
  }

  /// The elements between the front of `self` and the front of `rest`,
  /// where `rest` is a later position of the same range.
  pub fn until(&self, rest: &PointerRange<'a, T>) -> PointerRange<'a, T> {
    let consumed = self.rest.len().saturating_sub(rest.rest.len());
    PointerRange::new(&self.rest[..consumed])
  }
}

impl<T> Clone for PointerRange<'_, T> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for PointerRange<'_, T> {}

impl<T> Default for PointerRange<'_, T> {
  fn default() -> Self {
    Self::empty()
  }
}

/// Ranges compare by the `[start, end)` bounds they cover, not by content.
impl<T> PartialEq for PointerRange<'_, T> {
  fn eq(&self, other: &Self) -> bool {
    ptr::eq(self.rest.as_ptr(), other.rest.as_ptr()) && self.rest.len() == other.rest.len()
  }
}

impl<T> Eq for PointerRange<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for PointerRange<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.rest).finish()
  }
}

impl<T> Index<usize> for PointerRange<'_, T> {
  type Output = T;

  fn index(&self, index: usize) -> &T {
    &self.rest[index]
  }
}

impl<'a, T> Range for PointerRange<'a, T> {
  type Item = &'a T;

  fn is_empty(&self) -> bool {
    self.rest.is_empty()
  }

  fn advance(&mut self) {
    self.rest = &self.rest[1..];
  }

  fn front(&mut self) -> &'a T {
    let rest = self.rest;
    &rest[0]
  }

  fn size(&self) -> Option<usize> {
    Some(self.rest.len())
  }
}

/// A linear range over exclusively borrowed elements.
///
/// The cursor is a raw `[start, start + len)` window so that two ranges
/// derived from one buffer may overlap, as long as the elements they hand out
/// at any one time are distinct. [`crate::array::Array`] relies on this to
/// shift its tail down in place.
pub struct PointerRangeMut<'a, T> {
  start: NonNull<T>,
  len: usize,
  _marker: PhantomData<&'a mut T>,
}

impl<'a, T> PointerRangeMut<'a, T> {
  pub fn new(items: &'a mut [T]) -> Self {
    let len = items.len();
    Self {
      start: NonNull::from(items).cast(),
      len,
      _marker: PhantomData,
    }
  }

  /// # Safety
  ///
  /// `start` must be valid for reads and writes of `len` elements for `'a`,
  /// and no element may be accessed through another path while a reference
  /// returned by [`RangeMut::front_mut`] to it is alive.
  pub unsafe fn from_raw_parts(start: *mut T, len: usize) -> Self {
    Self {
      // SAFETY: caller guarantees a valid pointer, which is never null
      start: unsafe { NonNull::new_unchecked(start) },
      len,
      _marker: PhantomData,
    }
  }

  pub fn advance_by(&mut self, num: usize) {
    let num = num.min(self.len);
    // SAFETY: num <= len keeps the pointer within or one past the window
    self.start = unsafe { self.start.add(num) };
    self.len -= num;
  }

  pub const fn len(&self) -> usize {
    self.len
  }

  pub const fn as_mut_ptr(&self) -> *mut T {
    self.start.as_ptr()
  }

  /// Read-only view of the unconsumed elements.
  pub fn as_range(&self) -> PointerRange<'_, T> {
    // SAFETY: the window is valid for `len` elements and borrowed shared here
    PointerRange::new(unsafe { slice::from_raw_parts(self.start.as_ptr(), self.len) })
  }

  pub fn into_slice(self) -> &'a mut [T] {
    // SAFETY: the window is valid and exclusively borrowed for 'a
    unsafe { slice::from_raw_parts_mut(self.start.as_ptr(), self.len) }
  }
}

impl<T> Default for PointerRangeMut<'_, T> {
  fn default() -> Self {
    Self {
      start: NonNull::dangling(),
      len: 0,
      _marker: PhantomData,
    }
  }
}

impl<T: fmt::Debug> fmt::Debug for PointerRangeMut<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.as_range().as_slice()).finish()
  }
}

impl<T> RangeMut for PointerRangeMut<'_, T> {
  type Elem = T;

  fn is_empty(&self) -> bool {
    self.len == 0
  }

  fn advance(&mut self) {
    check!(self.len > 0);
    self.advance_by(1);
  }

  fn front_mut(&mut self) -> &mut T {
    check!(self.len > 0);
    // SAFETY: the window is non-empty and the returned borrow pins `self`
    unsafe { self.start.as_mut() }
  }

  fn size(&self) -> Option<usize> {
    Some(self.len)
  }
}

// SAFETY: the range behaves like `&mut [T]`
unsafe impl<T: Send> Send for PointerRangeMut<'_, T> {}
unsafe impl<T: Sync> Sync for PointerRangeMut<'_, T> {}

//! Growable contiguous array.

use alloc::alloc::{
  Allocator,
  Global,
  Layout,
};
use core::{
  fmt,
  marker::PhantomData,
  mem::{
    self,
    ManuallyDrop,
    MaybeUninit,
  },
  ops::{
    Deref,
    DerefMut,
  },
  ptr::{
    self,
    NonNull,
  },
  slice,
};

use getset::Getters;

use crate::{
  algorithms::{
    contains,
    fill_construct,
    move_construct,
  },
  error::TryReserveError,
  range::{
    IntoRange,
    IntoRangeMut,
    PointerRange,
    PointerRangeMut,
    Range,
  },
};

/// An owning, growable buffer with live elements at `[0, len)`.
///
/// Growth at least doubles the capacity and relocates the elements bitwise;
/// no element is ever cloned to make room. Moving out with [`mem::take`]
/// leaves an empty array behind.
#[derive(Getters)]
pub struct Array<T, A: Allocator = Global> {
  ptr: NonNull<T>,
  num: usize,
  max: usize,
  /// The allocator backing the buffer.
  #[getset(get = "pub")]
  allocator: A,
  _owns: PhantomData<T>,
}

impl<T> Array<T, Global> {
  pub const fn new() -> Self {
    Self::new_in(Global)
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self::with_capacity_in(capacity, Global)
  }

  /// Take back a buffer released by [`Array::into_raw_parts`].
  ///
  /// # Safety
  ///
  /// `ptr`, `len` and `capacity` must come from `into_raw_parts` on an
  /// `Array<T, Global>`, and the buffer must not have been freed since.
  pub unsafe fn from_raw_parts(ptr: *mut T, len: usize, capacity: usize) -> Self {
    // SAFETY: forwarded from the caller
    unsafe { Self::from_raw_parts_in(ptr, len, capacity, Global) }
  }

  /// Release ownership of the buffer as `(ptr, len, capacity)`.
  pub fn into_raw_parts(self) -> (*mut T, usize, usize) {
    let this = ManuallyDrop::new(self);
    (this.ptr.as_ptr(), this.num, this.max)
  }

  /// Build an array from `items`, skipping values already present.
  pub fn from_unique<const N: usize>(items: [T; N]) -> Self
  where
    T: PartialEq,
  {
    let mut array = Self::with_capacity(N);
    for item in items {
      array.add_unique(item);
    }
    array
  }
}

impl<T, A: Allocator> Array<T, A> {
  pub const fn new_in(allocator: A) -> Self {
    Self {
      ptr: NonNull::dangling(),
      num: 0,
      max: 0,
      allocator,
      _owns: PhantomData,
    }
  }

  pub fn with_capacity_in(capacity: usize, allocator: A) -> Self {
    let mut array = Self::new_in(allocator);
    array.reserve(capacity);
    array
  }

  /// # Safety
  ///
  /// `ptr` must have been allocated by `allocator` for `capacity` elements of
  /// `T`, with the first `len` initialized.
  pub unsafe fn from_raw_parts_in(ptr: *mut T, len: usize, capacity: usize, allocator: A) -> Self {
    Self {
      // SAFETY: the caller hands back a pointer this type produced
      ptr: unsafe { NonNull::new_unchecked(ptr) },
      num: len,
      max: capacity,
      allocator,
      _owns: PhantomData,
    }
  }

  /// Number of live elements.
  pub const fn len(&self) -> usize {
    self.num
  }

  /// Number of elements the buffer holds before it has to grow.
  pub const fn capacity(&self) -> usize {
    self.max
  }

  pub const fn is_empty(&self) -> bool {
    self.num == 0
  }

  pub const fn as_ptr(&self) -> *const T {
    self.ptr.as_ptr()
  }

  pub const fn as_mut_ptr(&mut self) -> *mut T {
    self.ptr.as_ptr()
  }

  pub fn as_slice(&self) -> &[T] {
    // SAFETY: [0, num) is initialized
    unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.num) }
  }

  pub fn as_mut_slice(&mut self) -> &mut [T] {
    // SAFETY: [0, num) is initialized and exclusively borrowed
    unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.num) }
  }

  pub fn range(&self) -> PointerRange<'_, T> {
    PointerRange::new(self.as_slice())
  }

  pub fn range_mut(&mut self) -> PointerRangeMut<'_, T> {
    PointerRangeMut::new(self.as_mut_slice())
  }

  /// Make room for at least `new_max` elements in total. No-op when the
  /// capacity already suffices.
  pub fn try_reserve(&mut self, new_max: usize) -> Result<(), TryReserveError> {
    if new_max <= self.max {
      return Ok(());
    }
    self.grow(new_max)
  }

  pub fn reserve(&mut self, new_max: usize) {
    if let Err(err) = self.try_reserve(new_max) {
      err.fatal();
    }
  }

  /// Append `value`, returning its index.
  pub fn add(&mut self, value: T) -> usize {
    self.ensure_space(self.num + 1);
    // SAFETY: ensure_space guarantees the slot at num exists and is vacant
    unsafe { self.ptr.as_ptr().add(self.num).write(value) };
    self.num += 1;
    self.num - 1
  }

  /// Append the value produced by `make`, writing it straight into the slot.
  pub fn emplace_with<F>(&mut self, make: F) -> usize
  where
    F: FnOnce() -> T,
  {
    self.ensure_space(self.num + 1);
    // SAFETY: as in add
    unsafe { self.ptr.as_ptr().add(self.num).write(make()) };
    self.num += 1;
    self.num - 1
  }

  /// Append `value` unless an equal element is already present. Returns
  /// whether it was added.
  pub fn add_unique(&mut self, value: T) -> bool
  where
    T: PartialEq,
  {
    if contains(self.range(), |item| *item == value) {
      return false;
    }
    self.add(value);
    true
  }

  /// Append `count` default values.
  pub fn add_defaulted(&mut self, count: usize)
  where
    T: Default,
  {
    self.ensure_space(self.num + count);
    fill_construct(self.spare(count), T::default);
    self.num += count;
  }

  /// Append every element the range yields.
  pub fn append<R>(&mut self, r: R)
  where
    R: IntoRange,
    R::Output: Range<Item = T>,
  {
    let mut r = r.into_range();
    if let Some(size) = r.size() {
      self.ensure_space(self.num + size);
    }
    while !r.is_empty() {
      self.add(r.front());
      r.advance();
    }
  }

  pub fn extend_from_slice(&mut self, items: &[T])
  where
    T: Clone,
  {
    self.ensure_space(self.num + items.len());
    for item in items {
      self.add(item.clone());
    }
  }

  /// Remove and return the element at `index`, shifting everything after it
  /// down by one.
  pub fn remove_at(&mut self, index: usize) -> T {
    check_msg!(index < self.num, "index {} out of bounds for length {}", index, self.num);
    let tail = self.num - index - 1;
    let base = self.ptr.as_ptr();
    // SAFETY: index < num. The removed value is read out first, leaving a
    // hole at `index` that the tail is relocated into front to front, so
    // every slot is read before it is overwritten.
    let removed = unsafe {
      let removed = ptr::read(base.add(index));
      let dest = PointerRangeMut::from_raw_parts(base.add(index) as *mut MaybeUninit<T>, tail);
      let source = PointerRangeMut::from_raw_parts(base.add(index + 1), tail);
      move_construct(dest, source);
      removed
    };
    self.num -= 1;
    removed
  }

  pub fn pop(&mut self) -> Option<T> {
    if self.num == 0 {
      return None;
    }
    self.num -= 1;
    // SAFETY: the slot at num was live and is now outside [0, num)
    Some(unsafe { ptr::read(self.ptr.as_ptr().add(self.num)) })
  }

  /// Drop every element past `len`.
  pub fn truncate(&mut self, len: usize) {
    if len >= self.num {
      return;
    }
    let dropped = self.num - len;
    self.num = len;
    // SAFETY: [len, len + dropped) was live and is no longer reachable
    unsafe {
      ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr().add(len), dropped));
    }
  }

  /// Drop every element, keeping the buffer.
  pub fn clear(&mut self) {
    self.truncate(0);
  }

  fn ensure_space(&mut self, num: usize) {
    if num > self.max {
      let doubled = self.max.saturating_mul(2);
      if let Err(err) = self.grow(num.max(doubled)) {
        err.fatal();
      }
    }
  }

  /// `count` vacant slots directly after the live elements.
  fn spare(&mut self, count: usize) -> PointerRangeMut<'_, MaybeUninit<T>> {
    check!(self.num + count <= self.max);
    // SAFETY: [num, num + count) lies inside the buffer and holds no live value
    unsafe {
      PointerRangeMut::from_raw_parts(self.ptr.as_ptr().add(self.num) as *mut MaybeUninit<T>, count)
    }
  }

  fn grow(&mut self, new_max: usize) -> Result<(), TryReserveError> {
    let layout = Layout::array::<T>(new_max).map_err(|_| TryReserveError::CapacityOverflow)?;
    let raw = self
      .allocator
      .allocate(layout)
      .map_err(|_| TryReserveError::AllocError { layout })?;
    let new_ptr = raw.cast::<T>();

    // SAFETY: the new buffer holds new_max >= num vacant slots; the old
    // elements are relocated and the old buffer is released without
    // dropping them.
    unsafe {
      let dest = PointerRangeMut::from_raw_parts(new_ptr.as_ptr() as *mut MaybeUninit<T>, self.num);
      let source = PointerRangeMut::from_raw_parts(self.ptr.as_ptr(), self.num);
      move_construct(dest, source);
      self.release_buffer();
    }

    trace!(from = self.max, to = new_max, "array grown");
    self.ptr = new_ptr;
    self.max = new_max;
    Ok(())
  }

  /// Free the buffer without dropping anything in it.
  unsafe fn release_buffer(&mut self) {
    if self.max == 0 {
      return;
    }
    // SAFETY: the buffer was allocated with exactly this layout in grow
    unsafe {
      let layout = Layout::from_size_align_unchecked(mem::size_of::<T>() * self.max, mem::align_of::<T>());
      self.allocator.deallocate(self.ptr.cast(), layout);
    }
  }
}

unsafe impl<#[may_dangle] T, A: Allocator> Drop for Array<T, A> {
  fn drop(&mut self) {
    // SAFETY: [0, num) is live; the buffer is released right after
    unsafe {
      ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.num));
      self.release_buffer();
    }
  }
}

// SAFETY: the array owns its elements like Vec does
unsafe impl<T: Send, A: Allocator + Send> Send for Array<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for Array<T, A> {}

impl<T, A: Allocator> Deref for Array<T, A> {
  type Target = [T];

  fn deref(&self) -> &[T] {
    self.as_slice()
  }
}

impl<T, A: Allocator> DerefMut for Array<T, A> {
  fn deref_mut(&mut self) -> &mut [T] {
    self.as_mut_slice()
  }
}

impl<T> Default for Array<T, Global> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Clone, A: Allocator + Clone> Clone for Array<T, A> {
  fn clone(&self) -> Self {
    let mut array = Self::with_capacity_in(self.num, self.allocator.clone());
    for item in self.as_slice() {
      array.add(item.clone());
    }
    array
  }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Array<T, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.as_slice()).finish()
  }
}

impl<T: PartialEq, A: Allocator, B: Allocator> PartialEq<Array<T, B>> for Array<T, A> {
  fn eq(&self, other: &Array<T, B>) -> bool {
    self.as_slice() == other.as_slice()
  }
}

impl<T: Eq, A: Allocator> Eq for Array<T, A> {}

impl<T, const N: usize> From<[T; N]> for Array<T, Global> {
  fn from(items: [T; N]) -> Self {
    let mut array = Self::with_capacity(N);
    for item in items {
      array.add(item);
    }
    array
  }
}

impl<T: Clone> From<&[T]> for Array<T, Global> {
  fn from(items: &[T]) -> Self {
    let mut array = Self::new();
    array.extend_from_slice(items);
    array
  }
}

impl<T> FromIterator<T> for Array<T, Global> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let mut array = Self::new();
    array.extend(iter);
    array
  }
}

impl<T, A: Allocator> Extend<T> for Array<T, A> {
  fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
    let iter = iter.into_iter();
    let (lower, _) = iter.size_hint();
    self.ensure_space(self.num + lower);
    for item in iter {
      self.add(item);
    }
  }
}

impl<'a, T, A: Allocator> IntoRange for &'a Array<T, A> {
  type Output = PointerRange<'a, T>;

  fn into_range(self) -> PointerRange<'a, T> {
    self.range()
  }
}

impl<'a, T, A: Allocator> IntoRangeMut for &'a mut Array<T, A> {
  type Output = PointerRangeMut<'a, T>;

  fn into_range_mut(self) -> PointerRangeMut<'a, T> {
    self.range_mut()
  }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Array<T, A> {
  type Item = &'a T;
  type IntoIter = slice::Iter<'a, T>;

  fn into_iter(self) -> slice::Iter<'a, T> {
    self.as_slice().iter()
  }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Array<T, A> {
  type Item = &'a mut T;
  type IntoIter = slice::IterMut<'a, T>;

  fn into_iter(self) -> slice::IterMut<'a, T> {
    self.as_mut_slice().iter_mut()
  }
}

#[cfg(test)]
mod tests;

//! Inline, non-growable array.

use core::{
  fmt,
  marker::PhantomData,
  mem::{
    self,
    MaybeUninit,
  },
  ops::{
    Deref,
    DerefMut,
  },
  ptr,
  slice,
};

use crate::range::{
  IntoRange,
  IntoRangeMut,
  PointerRange,
  PointerRangeMut,
};

/// `N` slots of inline storage with the live elements at `[0, len)`.
///
/// Adding past `N` is a contract violation. Destruction only walks the
/// elements when `T` needs dropping; for other types it compiles away.
pub struct FixedArray<T, const N: usize> {
  slots: [MaybeUninit<T>; N],
  num: usize,
  _owns: PhantomData<T>,
}

impl<T, const N: usize> FixedArray<T, N> {
  const NEEDS_DROP: bool = mem::needs_drop::<T>();

  pub const fn new() -> Self {
    Self {
      slots: [const { MaybeUninit::uninit() }; N],
      num: 0,
      _owns: PhantomData,
    }
  }

  /// Construct `value` in the next slot and return its index.
  pub fn add(&mut self, value: T) -> usize {
    check_msg!(self.num < N, "fixed array of {} is full", N);
    self.slots[self.num].write(value);
    self.num += 1;
    self.num - 1
  }

  /// Drop every live element and reset the length to zero.
  pub fn empty(&mut self) {
    let live = self.num;
    self.num = 0;
    if Self::NEEDS_DROP {
      // SAFETY: [0, live) was initialized and is no longer reachable
      unsafe {
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.slots.as_mut_ptr().cast::<T>(), live));
      }
    }
  }

  pub const fn len(&self) -> usize {
    self.num
  }

  pub const fn capacity(&self) -> usize {
    N
  }

  pub const fn is_empty(&self) -> bool {
    self.num == 0
  }

  pub const fn is_full(&self) -> bool {
    self.num == N
  }

  pub fn as_slice(&self) -> &[T] {
    // SAFETY: [0, num) is initialized
    unsafe { slice::from_raw_parts(self.slots.as_ptr().cast(), self.num) }
  }

  pub fn as_mut_slice(&mut self) -> &mut [T] {
    // SAFETY: [0, num) is initialized
    unsafe { slice::from_raw_parts_mut(self.slots.as_mut_ptr().cast(), self.num) }
  }

  pub fn range(&self) -> PointerRange<'_, T> {
    PointerRange::new(self.as_slice())
  }

  pub fn range_mut(&mut self) -> PointerRangeMut<'_, T> {
    PointerRangeMut::new(self.as_mut_slice())
  }
}

impl<T, const N: usize> Drop for FixedArray<T, N> {
  fn drop(&mut self) {
    if Self::NEEDS_DROP {
      self.empty();
    }
  }
}

impl<T, const N: usize> Default for FixedArray<T, N> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T, const N: usize> Deref for FixedArray<T, N> {
  type Target = [T];

  fn deref(&self) -> &[T] {
    self.as_slice()
  }
}

impl<T, const N: usize> DerefMut for FixedArray<T, N> {
  fn deref_mut(&mut self) -> &mut [T] {
    self.as_mut_slice()
  }
}

impl<T: Clone, const N: usize> Clone for FixedArray<T, N> {
  fn clone(&self) -> Self {
    let mut copy = Self::new();
    for item in self.as_slice() {
      copy.add(item.clone());
    }
    copy
  }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for FixedArray<T, N> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.as_slice()).finish()
  }
}

impl<'a, T, const N: usize> IntoRange for &'a FixedArray<T, N> {
  type Output = PointerRange<'a, T>;

  fn into_range(self) -> PointerRange<'a, T> {
    self.range()
  }
}

impl<'a, T, const N: usize> IntoRangeMut for &'a mut FixedArray<T, N> {
  type Output = PointerRangeMut<'a, T>;

  fn into_range_mut(self) -> PointerRangeMut<'a, T> {
    self.range_mut()
  }
}

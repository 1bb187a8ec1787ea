//! Fixed-capacity object pool with stable integer handles.

use alloc::alloc::{
  Allocator,
  Global,
  Layout,
};
use core::{
  fmt,
  marker::PhantomData,
  mem::MaybeUninit,
  ops::{
    Index,
    IndexMut,
  },
  ptr::{
    self,
    NonNull,
  },
};

use getset::CopyGetters;

use crate::{
  bitarray::BitArray,
  error::TryReserveError,
};

/// A pool of `capacity` slots for `T`, handing out the lowest free index.
///
/// A handle stays valid until the object behind it is released. The slot
/// buffer never moves, so moving the pool itself keeps handles valid; there
/// is no `Clone`.
#[derive(CopyGetters)]
pub struct Pool<T, I = usize, A: Allocator + Clone = Global> {
  allocator: A,
  elements: NonNull<MaybeUninit<T>>,
  flags: BitArray<A>,
  /// Total number of slots.
  #[getset(get_copy = "pub")]
  capacity: usize,
  /// Number of slots without a live object.
  #[getset(get_copy = "pub")]
  free_count: usize,
  _marker: PhantomData<(T, fn() -> I)>,
}

impl<T, I> Pool<T, I, Global>
where
  I: Copy + From<usize> + Into<usize>,
{
  pub fn new(capacity: usize) -> Self {
    Self::new_in(capacity, Global)
  }
}

impl<T, I, A> Pool<T, I, A>
where
  I: Copy + From<usize> + Into<usize>,
  A: Allocator + Clone,
{
  pub fn try_new_in(capacity: usize, allocator: A) -> Result<Self, TryReserveError> {
    let mut flags = BitArray::new_in(allocator.clone());
    flags.try_init(capacity, false)?;

    let elements = if capacity == 0 {
      NonNull::dangling()
    } else {
      let layout = Layout::array::<T>(capacity).map_err(|_| TryReserveError::CapacityOverflow)?;
      allocator
        .allocate(layout)
        .map_err(|_| TryReserveError::AllocError { layout })?
        .cast()
    };

    Ok(Self {
      allocator,
      elements,
      flags,
      capacity,
      free_count: capacity,
      _marker: PhantomData,
    })
  }

  pub fn new_in(capacity: usize, allocator: A) -> Self {
    match Self::try_new_in(capacity, allocator) {
      Ok(pool) => pool,
      Err(err) => err.fatal(),
    }
  }

  /// Move `value` into the lowest free slot.
  pub fn emplace(&mut self, value: T) -> I {
    let index = self.acquire();
    self.slot(index).write(value);
    I::from(index)
  }

  /// Store the object produced by `make`. No slot is claimed until `make`
  /// has returned.
  pub fn emplace_with<F>(&mut self, make: F) -> I
  where
    F: FnOnce() -> T,
  {
    let value = make();
    self.emplace(value)
  }

  pub fn add_defaulted(&mut self) -> I
  where
    T: Default,
  {
    self.emplace_with(T::default)
  }

  /// Drop the object behind `handle` and free its slot.
  pub fn release(&mut self, handle: I) {
    let index = self.checked_index(handle);
    self.flags.clear_bit(index);
    self.free_count += 1;
    // SAFETY: the slot was occupied and is now marked free
    unsafe { self.slot(index).assume_init_drop() };
    trace!(index, free = self.free_count, "pool slot released");
  }

  /// Move the object behind `handle` out and free its slot.
  pub fn take(&mut self, handle: I) -> T {
    let index = self.checked_index(handle);
    self.flags.clear_bit(index);
    self.free_count += 1;
    trace!(index, free = self.free_count, "pool slot taken");
    // SAFETY: the slot was occupied and is now marked free
    unsafe { self.slot(index).assume_init_read() }
  }

  pub fn is_occupied(&self, handle: I) -> bool {
    let index = handle.into();
    index < self.capacity && self.flags.get_bit(index)
  }

  pub fn get(&self, handle: I) -> Option<&T> {
    if !self.is_occupied(handle) {
      return None;
    }
    // SAFETY: occupied slots hold a live value
    Some(unsafe { (*self.elements.as_ptr().add(handle.into())).assume_init_ref() })
  }

  pub fn get_mut(&mut self, handle: I) -> Option<&mut T> {
    if !self.is_occupied(handle) {
      return None;
    }
    // SAFETY: occupied slots hold a live value
    Some(unsafe { self.slot(handle.into()).assume_init_mut() })
  }

  /// Live objects with their handles, in ascending slot order.
  pub fn iter(&self) -> impl Iterator<Item = (I, &T)> + '_ {
    self.flags.set_bits().map(move |index| {
      // SAFETY: set bits mark live slots
      let value = unsafe { (*self.elements.as_ptr().add(index)).assume_init_ref() };
      (I::from(index), value)
    })
  }

  fn acquire(&mut self) -> usize {
    check_msg!(self.free_count > 0, "pool of {} slots is exhausted", self.capacity);
    let Some(index) = self.flags.first_clear() else {
      unreachable!("free count out of sync with occupancy");
    };
    self.flags.set_bit(index);
    self.free_count -= 1;
    trace!(index, free = self.free_count, "pool slot acquired");
    index
  }

  fn checked_index(&self, handle: I) -> usize {
    let index = handle.into();
    check_msg!(self.is_occupied(handle), "slot {} is not occupied", index);
    index
  }
}

impl<T, I, A: Allocator + Clone> Pool<T, I, A> {
  /// Number of live objects.
  pub fn len(&self) -> usize {
    self.capacity - self.free_count
  }

  pub fn is_empty(&self) -> bool {
    self.free_count == self.capacity
  }

  /// Drop every live object and release all storage. The pool has no slots
  /// afterwards.
  pub fn empty(&mut self) {
    if self.capacity == 0 {
      return;
    }
    for index in self.flags.set_bits() {
      // SAFETY: set bits mark live slots, each dropped exactly once here
      unsafe { ptr::drop_in_place((*self.elements.as_ptr().add(index)).as_mut_ptr()) };
    }
    // SAFETY: the buffer was allocated with this layout in try_new_in
    unsafe {
      let layout = Layout::array::<T>(self.capacity).unwrap_unchecked();
      self.allocator.deallocate(self.elements.cast(), layout);
    }
    self.flags.empty();
    self.elements = NonNull::dangling();
    self.capacity = 0;
    self.free_count = 0;
  }

  fn slot(&mut self, index: usize) -> &mut MaybeUninit<T> {
    // SAFETY: callers pass indices below capacity
    unsafe { &mut *self.elements.as_ptr().add(index) }
  }
}

impl<T, I, A: Allocator + Clone> Drop for Pool<T, I, A> {
  fn drop(&mut self) {
    self.empty();
  }
}

impl<T, I, A> Index<I> for Pool<T, I, A>
where
  I: Copy + From<usize> + Into<usize>,
  A: Allocator + Clone,
{
  type Output = T;

  fn index(&self, handle: I) -> &T {
    let index = self.checked_index(handle);
    // SAFETY: checked_index guarantees occupancy
    unsafe { (*self.elements.as_ptr().add(index)).assume_init_ref() }
  }
}

impl<T, I, A> IndexMut<I> for Pool<T, I, A>
where
  I: Copy + From<usize> + Into<usize>,
  A: Allocator + Clone,
{
  fn index_mut(&mut self, handle: I) -> &mut T {
    let index = self.checked_index(handle);
    // SAFETY: checked_index guarantees occupancy
    unsafe { self.slot(index).assume_init_mut() }
  }
}

impl<T, I, A: Allocator + Clone> fmt::Debug for Pool<T, I, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Pool")
      .field("capacity", &self.capacity)
      .field("free_count", &self.free_count)
      .finish()
  }
}

//! Packed bit storage.
//!
//! Bit `i` lives in word `i / 64` at position `i % 64`. Index arguments are
//! only checked in debug builds.

use alloc::alloc::{
  Allocator,
  Global,
  Layout,
};
use core::{
  fmt,
  iter::FusedIterator,
  ptr::NonNull,
  slice,
};

use getset::CopyGetters;

use crate::{
  error::TryReserveError,
  range::Range,
};

const WORD_BITS: usize = u64::BITS as usize;

#[derive(CopyGetters)]
pub struct BitArray<A: Allocator = Global> {
  allocator: A,
  words: NonNull<u64>,
  word_count: usize,
  /// Number of addressable bits.
  #[getset(get_copy = "pub")]
  len: usize,
}

impl BitArray<Global> {
  pub const fn new() -> Self {
    Self::new_in(Global)
  }

  /// A bit array of `count` bits, all set to `initial`.
  pub fn with_len(count: usize, initial: bool) -> Self {
    let mut bits = Self::new();
    bits.init(count, initial);
    bits
  }
}

impl<A: Allocator> BitArray<A> {
  pub const fn new_in(allocator: A) -> Self {
    Self {
      allocator,
      words: NonNull::dangling(),
      word_count: 0,
      len: 0,
    }
  }

  /// Allocate room for `count` bits and set every one of them to `initial`,
  /// replacing whatever storage the array held before.
  pub fn try_init(&mut self, count: usize, initial: bool) -> Result<(), TryReserveError> {
    self.empty();
    if count == 0 {
      return Ok(());
    }

    let word_count = count.div_ceil(WORD_BITS);
    let layout = Layout::array::<u64>(word_count).map_err(|_| TryReserveError::CapacityOverflow)?;
    let raw = self
      .allocator
      .allocate_zeroed(layout)
      .map_err(|_| TryReserveError::AllocError { layout })?;

    self.words = raw.cast();
    self.word_count = word_count;
    self.len = count;
    if initial {
      self.words_mut().fill(u64::MAX);
      self.mask_tail();
    }
    Ok(())
  }

  pub fn init(&mut self, count: usize, initial: bool) {
    if let Err(err) = self.try_init(count, initial) {
      err.fatal();
    }
  }

  pub fn set_bit(&mut self, index: usize) {
    debug_assert!(index < self.len, "bit {index} out of range");
    self.words_mut()[index / WORD_BITS] |= 1u64 << (index % WORD_BITS);
  }

  pub fn clear_bit(&mut self, index: usize) {
    debug_assert!(index < self.len, "bit {index} out of range");
    self.words_mut()[index / WORD_BITS] &= !(1u64 << (index % WORD_BITS));
  }

  pub fn get_bit(&self, index: usize) -> bool {
    debug_assert!(index < self.len, "bit {index} out of range");
    (self.words()[index / WORD_BITS] & (1u64 << (index % WORD_BITS))) != 0
  }

  /// Number of set bits.
  pub fn count_set(&self) -> usize {
    self.words().iter().map(|word| word.count_ones() as usize).sum()
  }

  /// Lowest clear bit, scanning a word at a time.
  pub fn first_clear(&self) -> Option<usize> {
    self.clear_bits().next()
  }

  /// Ascending indices of the set bits.
  pub fn set_bits(&self) -> SetBits<'_> {
    BitScan::new(self.words(), self.len)
  }

  /// Ascending indices of the clear bits.
  pub fn clear_bits(&self) -> ClearBits<'_> {
    BitScan::new(self.words(), self.len)
  }

  /// Release the storage and reset the length to zero.
  pub fn empty(&mut self) {
    if self.word_count == 0 {
      return;
    }
    // SAFETY: the words were allocated in try_init with this layout
    unsafe {
      let layout = Layout::array::<u64>(self.word_count).unwrap_unchecked();
      self.allocator.deallocate(self.words.cast(), layout);
    }
    self.words = NonNull::dangling();
    self.word_count = 0;
    self.len = 0;
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  fn words(&self) -> &[u64] {
    // SAFETY: word_count words are allocated and initialized, or zero of them
    unsafe { slice::from_raw_parts(self.words.as_ptr(), self.word_count) }
  }

  fn words_mut(&mut self) -> &mut [u64] {
    // SAFETY: as in words, with exclusive access through &mut self
    unsafe { slice::from_raw_parts_mut(self.words.as_ptr(), self.word_count) }
  }

  /// Keep the bits past `len` in the last word clear.
  fn mask_tail(&mut self) {
    let used = self.len % WORD_BITS;
    if used != 0 {
      let last = self.word_count - 1;
      self.words_mut()[last] &= (1u64 << used) - 1;
    }
  }
}

impl Default for BitArray<Global> {
  fn default() -> Self {
    Self::new()
  }
}

impl<A: Allocator> Drop for BitArray<A> {
  fn drop(&mut self) {
    self.empty();
  }
}

impl<A: Allocator> fmt::Debug for BitArray<A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BitArray")
      .field("len", &self.len)
      .field("set", &self.count_set())
      .finish()
  }
}

/// Lazy ascending scan over the bits equal to `SET`.
///
/// The current word is kept with the already-visited bits cleared, so each
/// step is a `trailing_zeros` rather than a test per index.
#[derive(Clone)]
pub struct BitScan<'a, const SET: bool> {
  words: &'a [u64],
  len: usize,
  word_index: usize,
  current: u64,
}

pub type SetBits<'a> = BitScan<'a, true>;
pub type ClearBits<'a> = BitScan<'a, false>;

impl<'a, const SET: bool> BitScan<'a, SET> {
  fn new(words: &'a [u64], len: usize) -> Self {
    let mut scan = Self {
      words,
      len,
      word_index: 0,
      current: 0,
    };
    if !words.is_empty() {
      scan.current = scan.load(0);
      scan.skip_empty_words();
    }
    scan
  }

  /// Word `index` with the bits of interest set and the tail past `len` masked.
  fn load(&self, index: usize) -> u64 {
    let word = if SET { self.words[index] } else { !self.words[index] };
    let end = (index + 1) * WORD_BITS;
    if end > self.len {
      word & ((1u64 << (self.len % WORD_BITS)) - 1)
    } else {
      word
    }
  }

  fn skip_empty_words(&mut self) {
    while self.current == 0 && self.word_index + 1 < self.words.len() {
      self.word_index += 1;
      self.current = self.load(self.word_index);
    }
  }
}

impl<const SET: bool> Range for BitScan<'_, SET> {
  type Item = usize;

  fn is_empty(&self) -> bool {
    self.current == 0
  }

  fn advance(&mut self) {
    check!(self.current != 0);
    self.current &= self.current - 1;
    self.skip_empty_words();
  }

  fn front(&mut self) -> usize {
    check!(self.current != 0);
    self.word_index * WORD_BITS + self.current.trailing_zeros() as usize
  }
}

impl<const SET: bool> Iterator for BitScan<'_, SET> {
  type Item = usize;

  fn next(&mut self) -> Option<usize> {
    if Range::is_empty(self) {
      return None;
    }
    let index = self.front();
    Range::advance(self);
    Some(index)
  }
}

impl<const SET: bool> FusedIterator for BitScan<'_, SET> {}

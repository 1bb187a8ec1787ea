//! Open-addressed hash table.
//!
//! Slots are `Empty`, `Occupied` or `Tombstone`. A probe stops at the first
//! `Empty` slot; tombstones keep probe chains intact after a removal and are
//! reused by later insertions. The table rehashes once live entries plus
//! tombstones would pass three quarters of the capacity, doubling as needed
//! so that live entries fill at most three eighths of the new table. Capacity
//! is zero or a power of two and never shrinks.

mod probe;

use alloc::alloc::{
  Allocator,
  Global,
};
use core::{
  borrow::Borrow,
  fmt,
  hash::{
    BuildHasher,
    Hash,
  },
  marker::PhantomData,
  mem,
};

use rustc_hash::FxBuildHasher;

pub use probe::{
  LinearProbe,
  Probe,
  QuadraticProbe,
};

use crate::{
  algorithms::fill,
  array::Array,
  error::TryReserveError,
  range::{
    IntoRange,
    Range,
    RangeIter,
  },
};

const MIN_CAPACITY: usize = 8;

#[derive(Clone)]
enum Slot<K, V> {
  Empty,
  Occupied(K, V),
  Tombstone,
}

impl<K, V> Default for Slot<K, V> {
  fn default() -> Self {
    Slot::Empty
  }
}

/// Map from `K` to `V` with open addressing.
///
/// Adding a key that is already present is a contract violation. Any
/// operation that grows the table invalidates outstanding references.
pub struct HashTable<K, V, S = FxBuildHasher, P = LinearProbe, A: Allocator + Clone = Global> {
  slots: Array<Slot<K, V>, A>,
  count: usize,
  tombstones: usize,
  hasher: S,
  _probe: PhantomData<P>,
}

/// Smallest admissible capacity holding `live` entries at load 3/8 or less.
fn capacity_for(live: usize) -> usize {
  let mut capacity = MIN_CAPACITY;
  while live.saturating_mul(8) > capacity.saturating_mul(3) {
    capacity = match capacity.checked_mul(2) {
      Some(doubled) => doubled,
      None => TryReserveError::CapacityOverflow.fatal(),
    };
  }
  capacity
}

impl<K, V> HashTable<K, V> {
  pub const fn new() -> Self {
    Self::with_hasher(FxBuildHasher)
  }

  pub fn with_capacity(capacity: usize) -> Self {
    let mut table = Self::new();
    if capacity > 0 {
      table.slots = Self::allocate_slots(capacity_for(capacity), Global);
    }
    table
  }
}

impl<K, V, S, P> HashTable<K, V, S, P, Global> {
  pub const fn with_hasher(hasher: S) -> Self {
    Self::with_hasher_in(hasher, Global)
  }
}

impl<K, V, S, P, A: Allocator + Clone> HashTable<K, V, S, P, A> {
  pub const fn with_hasher_in(hasher: S, allocator: A) -> Self {
    Self {
      slots: Array::new_in(allocator),
      count: 0,
      tombstones: 0,
      hasher,
      _probe: PhantomData,
    }
  }

  /// Number of live pairs.
  pub fn len(&self) -> usize {
    self.count
  }

  pub fn is_empty(&self) -> bool {
    self.count == 0
  }

  /// Number of slots.
  pub fn capacity(&self) -> usize {
    self.slots.len()
  }

  pub fn hasher(&self) -> &S {
    &self.hasher
  }

  /// Drop every pair, keeping the slots.
  pub fn clear(&mut self) {
    fill(&mut self.slots, || Slot::Empty);
    self.count = 0;
    self.tombstones = 0;
  }

  /// Every live pair, in slot order.
  pub fn range(&self) -> HashTableRange<'_, K, V> {
    HashTableRange::new(&self.slots, self.count)
  }

  pub fn iter(&self) -> RangeIter<HashTableRange<'_, K, V>> {
    self.range().iter()
  }

  pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
    self.slots.iter_mut().filter_map(|slot| match slot {
      Slot::Occupied(key, value) => Some((&*key, value)),
      _ => None,
    })
  }

  fn allocate_slots(capacity: usize, allocator: A) -> Array<Slot<K, V>, A> {
    let mut slots = Array::with_capacity_in(capacity, allocator);
    slots.add_defaulted(capacity);
    slots
  }
}

impl<K, V, S, P, A> HashTable<K, V, S, P, A>
where
  K: Hash + Eq,
  S: BuildHasher,
  P: Probe,
  A: Allocator + Clone,
{
  /// Insert a pair whose key is not yet present.
  pub fn add(&mut self, key: K, value: V) {
    self.reserve_one();

    let mask = self.slots.len() - 1;
    let home = self.hash_of(&key);
    let mut target = None;
    for step in 0..self.slots.len() {
      let index = home.wrapping_add(P::offset(step)) & mask;
      match &self.slots[index] {
        Slot::Empty => {
          target = target.or(Some(index));
          break;
        }
        Slot::Tombstone => {
          target = target.or(Some(index));
        }
        Slot::Occupied(existing, _) => {
          check_msg!(*existing != key, "key added to hash table twice");
        }
      }
    }

    let Some(index) = target else {
      unreachable!("hash table has no vacant slot below the load limit");
    };
    if matches!(self.slots[index], Slot::Tombstone) {
      self.tombstones -= 1;
    }
    self.slots[index] = Slot::Occupied(key, value);
    self.count += 1;
  }

  /// Remove `key`, leaving a tombstone. Returns the value if it was present.
  pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let index = self.find_index(key)?;
    let Slot::Occupied(_, value) = mem::replace(&mut self.slots[index], Slot::Tombstone) else {
      unreachable!("find_index returned a vacant slot");
    };
    self.count -= 1;
    self.tombstones += 1;
    Some(value)
  }

  pub fn contains<Q>(&self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    self.find_index(key).is_some()
  }

  pub fn get<Q>(&self, key: &Q) -> Option<&V>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    match &self.slots[self.find_index(key)?] {
      Slot::Occupied(_, value) => Some(value),
      _ => None,
    }
  }

  pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let index = self.find_index(key)?;
    match &mut self.slots[index] {
      Slot::Occupied(_, value) => Some(value),
      _ => None,
    }
  }

  /// The value stored under `key`, which must be present.
  pub fn find<Q>(&self, key: &Q) -> &V
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    match self.get(key) {
      Some(value) => value,
      None => missing_key(),
    }
  }

  pub fn find_mut<Q>(&mut self, key: &Q) -> &mut V
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    match self.get_mut(key) {
      Some(value) => value,
      None => missing_key(),
    }
  }

  fn hash_of<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
    self.hasher.hash_one(key) as usize
  }

  fn find_index<Q>(&self, key: &Q) -> Option<usize>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let capacity = self.slots.len();
    if capacity == 0 {
      return None;
    }
    let mask = capacity - 1;
    let home = self.hash_of(key);
    for step in 0..capacity {
      let index = home.wrapping_add(P::offset(step)) & mask;
      match &self.slots[index] {
        Slot::Empty => return None,
        Slot::Occupied(existing, _) if existing.borrow() == key => return Some(index),
        _ => {}
      }
    }
    None
  }

  fn reserve_one(&mut self) {
    let capacity = self.slots.len();
    let used = self.count + self.tombstones + 1;
    if used * 4 > capacity * 3 {
      self.rehash(capacity_for(self.count + 1).max(capacity));
    }
  }

  fn rehash(&mut self, capacity: usize) {
    let slots = Self::allocate_slots(capacity, self.slots.allocator().clone());
    let mut old = mem::replace(&mut self.slots, slots);
    trace!(
      from = old.len(),
      to = capacity,
      live = self.count,
      tombstones = self.tombstones,
      "hash table rehashed"
    );
    self.tombstones = 0;
    self.count = 0;

    let mask = capacity - 1;
    while let Some(slot) = old.pop() {
      let Slot::Occupied(key, value) = slot else {
        continue;
      };
      let home = self.hash_of(&key);
      let mut step = 0;
      let index = loop {
        let index = home.wrapping_add(P::offset(step)) & mask;
        if matches!(self.slots[index], Slot::Empty) {
          break index;
        }
        step += 1;
      };
      self.slots[index] = Slot::Occupied(key, value);
      self.count += 1;
    }
  }
}

#[cold]
fn missing_key() -> ! {
  error!("key is not in the hash table");
  panic!("key is not in the hash table");
}

impl<K, V, S: Default, P> Default for HashTable<K, V, S, P, Global> {
  fn default() -> Self {
    Self::with_hasher(S::default())
  }
}

impl<K, V, S, P, A> Clone for HashTable<K, V, S, P, A>
where
  K: Clone,
  V: Clone,
  S: Clone,
  A: Allocator + Clone,
{
  fn clone(&self) -> Self {
    Self {
      slots: self.slots.clone(),
      count: self.count,
      tombstones: self.tombstones,
      hasher: self.hasher.clone(),
      _probe: PhantomData,
    }
  }
}

impl<K: fmt::Debug, V: fmt::Debug, S, P, A: Allocator + Clone> fmt::Debug for HashTable<K, V, S, P, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(self.iter()).finish()
  }
}

/// Range over the live pairs of a [`HashTable`], reporting the remaining
/// pair count as its size.
pub struct HashTableRange<'a, K, V> {
  slots: &'a [Slot<K, V>],
  remaining: usize,
}

impl<'a, K, V> HashTableRange<'a, K, V> {
  fn new(slots: &'a [Slot<K, V>], remaining: usize) -> Self {
    let mut range = Self { slots, remaining };
    range.skip_vacant();
    range
  }

  fn skip_vacant(&mut self) {
    while let [first, rest @ ..] = self.slots {
      if matches!(first, Slot::Occupied(..)) {
        break;
      }
      self.slots = rest;
    }
  }
}

impl<K, V> Clone for HashTableRange<'_, K, V> {
  fn clone(&self) -> Self {
    Self {
      slots: self.slots,
      remaining: self.remaining,
    }
  }
}

impl<'a, K, V> Range for HashTableRange<'a, K, V> {
  type Item = (&'a K, &'a V);

  fn is_empty(&self) -> bool {
    self.remaining == 0
  }

  fn advance(&mut self) {
    check!(self.remaining > 0);
    self.slots = &self.slots[1..];
    self.remaining -= 1;
    self.skip_vacant();
  }

  fn front(&mut self) -> (&'a K, &'a V) {
    let slots = self.slots;
    match slots.first() {
      Some(Slot::Occupied(key, value)) => (key, value),
      _ => panic!("front of an empty hash table range"),
    }
  }

  fn size(&self) -> Option<usize> {
    Some(self.remaining)
  }
}

impl<'a, K, V, S, P, A: Allocator + Clone> IntoRange for &'a HashTable<K, V, S, P, A> {
  type Output = HashTableRange<'a, K, V>;

  fn into_range(self) -> HashTableRange<'a, K, V> {
    self.range()
  }
}

impl<'a, K, V, S, P, A: Allocator + Clone> IntoIterator for &'a HashTable<K, V, S, P, A> {
  type Item = (&'a K, &'a V);
  type IntoIter = RangeIter<HashTableRange<'a, K, V>>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

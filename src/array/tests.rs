use super::Array;
use crate::{
  algorithms::{
    find,
    map,
  },
  range::Range,
};
use alloc::alloc::{
  Allocator,
  Global,
};
use core::{
  cell::Cell,
  mem,
};

#[derive(Default)]
struct Counts {
  clones: Cell<usize>,
  drops: Cell<usize>,
}

struct Tracked<'a> {
  value: u32,
  counts: &'a Counts,
}

impl Clone for Tracked<'_> {
  fn clone(&self) -> Self {
    self.counts.clones.set(self.counts.clones.get() + 1);
    Self {
      value: self.value,
      counts: self.counts,
    }
  }
}

impl Drop for Tracked<'_> {
  fn drop(&mut self) {
    self.counts.drops.set(self.counts.drops.get() + 1);
  }
}

#[test]
fn new_array_is_empty() {
  let array = Array::<u32>::new();
  assert_eq!(array.len(), 0);
  assert_eq!(array.capacity(), 0);
  assert!(array.is_empty());
  assert!(array.range().is_empty());
}

#[test]
fn add_returns_index() {
  let mut array = Array::new();
  assert_eq!(array.add(10), 0);
  assert_eq!(array.add(20), 1);
  assert_eq!(array[1], 20);
}

#[test]
fn keeps_insertion_order_across_growth() {
  let mut array = Array::new();
  for i in 0..1000u32 {
    array.add(i);
  }
  assert_eq!(array.len(), 1000);
  assert!(array.capacity() >= 1000);
  for (i, value) in array.iter().enumerate() {
    assert_eq!(*value, i as u32);
  }
}

#[test]
fn growth_at_least_doubles() {
  let mut array = Array::new();
  array.add(1u8);
  let first = array.capacity();
  for _ in 0..first {
    array.add(2);
  }
  assert!(array.capacity() >= first * 2);
}

#[test]
fn reserve_is_noop_when_large_enough() {
  let mut array = Array::<u64>::with_capacity(16);
  assert_eq!(array.capacity(), 16);
  array.reserve(8);
  assert_eq!(array.capacity(), 16);
  array.reserve(40);
  assert_eq!(array.capacity(), 40);
}

#[test]
fn try_reserve_reports_overflow() {
  let mut array = Array::<u64>::new();
  assert!(array.try_reserve(usize::MAX).is_err());
  assert_eq!(array.capacity(), 0);
}

#[test]
fn growth_never_clones() {
  let counts = Counts::default();
  let mut array = Array::new();
  for value in 0..100 {
    array.add(Tracked {
      value,
      counts: &counts,
    });
  }
  assert_eq!(counts.clones.get(), 0);
  assert_eq!(counts.drops.get(), 0);
  assert_eq!(array[57].value, 57);
}

#[test]
fn drop_destroys_each_element_once() {
  let counts = Counts::default();
  {
    let mut array = Array::new();
    for value in 0..33 {
      array.add(Tracked {
        value,
        counts: &counts,
      });
    }
  }
  assert_eq!(counts.drops.get(), 33);
}

#[test]
fn clone_copies_each_element_once() {
  let counts = Counts::default();
  let mut array = Array::new();
  for value in 0..5 {
    array.add(Tracked {
      value,
      counts: &counts,
    });
  }
  let copy = array.clone();
  assert_eq!(counts.clones.get(), 5);
  assert_eq!(copy[4].value, 4);
  drop(array);
  drop(copy);
  assert_eq!(counts.drops.get(), 10);
}

#[test]
fn take_leaves_empty_array() {
  let mut array = Array::from([1, 2, 3]);
  let moved = mem::take(&mut array);
  assert!(array.is_empty());
  assert_eq!(array.capacity(), 0);
  assert_eq!(moved[..], [1, 2, 3]);
}

#[test]
fn remove_at_shifts_tail() {
  let mut array = Array::from([0, 1, 2, 3, 4]);
  assert_eq!(array.remove_at(1), 1);
  assert_eq!(array[..], [0, 2, 3, 4]);
  assert_eq!(array.remove_at(3), 4);
  assert_eq!(array[..], [0, 2, 3]);
}

#[test]
fn remove_at_moves_without_clone_or_drop() {
  let counts = Counts::default();
  let mut array = Array::new();
  for value in 0..6 {
    array.add(Tracked {
      value,
      counts: &counts,
    });
  }
  let removed = array.remove_at(2);
  assert_eq!(removed.value, 2);
  assert_eq!(counts.drops.get(), 0);
  assert_eq!(counts.clones.get(), 0);
  let values: Vec<u32> = array.iter().map(|t| t.value).collect();
  assert_eq!(values, [0, 1, 3, 4, 5]);
  drop(removed);
  drop(array);
  assert_eq!(counts.drops.get(), 6);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn remove_at_past_end_panics() {
  let mut array = Array::from([1]);
  array.remove_at(1);
}

#[test]
fn pop_and_truncate() {
  let counts = Counts::default();
  let mut array = Array::new();
  for value in 0..4 {
    array.add(Tracked {
      value,
      counts: &counts,
    });
  }
  assert_eq!(array.pop().map(|t| t.value), Some(3));
  assert_eq!(counts.drops.get(), 1);
  array.truncate(1);
  assert_eq!(counts.drops.get(), 3);
  array.clear();
  assert_eq!(counts.drops.get(), 4);
  assert!(array.pop().is_none());
}

#[test]
fn add_unique_skips_duplicates() {
  let mut array = Array::new();
  assert!(array.add_unique(3));
  assert!(array.add_unique(5));
  assert!(!array.add_unique(3));
  assert_eq!(array[..], [3, 5]);
}

#[test]
fn from_unique_deduplicates() {
  let array = Array::from_unique([1, 2, 1, 3, 2]);
  assert_eq!(array[..], [1, 2, 3]);
}

#[test]
fn add_defaulted_constructs_values() {
  let mut array = Array::<String>::new();
  array.add(String::from("x"));
  array.add_defaulted(3);
  assert_eq!(array.len(), 4);
  assert_eq!(array[0], "x");
  assert!(array[1..].iter().all(String::is_empty));
}

#[test]
fn append_range() {
  let mut array = Array::from([1, 2]);
  let other = Array::from([3, 4, 5]);
  array.append(crate::range::transform(&other, |v: &i32| *v));
  assert_eq!(array[..], [1, 2, 3, 4, 5]);
}

#[test]
fn ranges_cover_live_elements() {
  let mut array = Array::from([4, 8, 15, 16, 23, 42]);
  assert_eq!(array.range().size(), Some(6));
  crate::algorithms::map_mut(&mut array, |v| *v += 1);
  let mut sum = 0;
  map(&array, |v| sum += v);
  assert_eq!(sum, 114);
  let found = find(&array, |v| *v == 17);
  assert_eq!(found.len(), 3);
}

#[test]
fn equality_and_debug() {
  let a = Array::from([1, 2, 3]);
  let b: Array<i32> = (1..4).collect();
  assert_eq!(a, b);
  assert_eq!(format!("{a:?}"), "[1, 2, 3]");
}

#[test]
fn raw_parts_roundtrip() {
  let array = Array::from([7u8, 8, 9]);
  let (ptr, len, capacity) = array.into_raw_parts();
  let array = unsafe { Array::from_raw_parts(ptr, len, capacity) };
  assert_eq!(array[..], [7, 8, 9]);
}

#[test]
fn custom_allocator() {
  let mut array = Array::new_in(Global);
  array.extend(0..10u16);
  assert_eq!(array.len(), 10);
  let _: &Global = array.allocator();
  let layout = alloc::alloc::Layout::new::<u8>();
  let block = array.allocator().allocate(layout).expect("allocation failed");
  unsafe { array.allocator().deallocate(block.cast(), layout) };
}

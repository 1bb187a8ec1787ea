//! Generic algorithms over the range protocol.
//!
//! Containers never loop over their own storage for moving, searching or
//! filling; they hand ranges to these functions instead.

use core::{
  mem::{
    self,
    MaybeUninit,
  },
  ptr,
};

use crate::range::{
  IntoRange,
  IntoRangeMut,
  Range,
  RangeMut,
};

/// Move elements from `source` into `dest`, front to front, until either
/// range runs out. Returns the unconsumed remainder of `dest`.
///
/// Rust has no moved-from state, so each step exchanges the two elements:
/// the consumed part of `source` ends up holding the former contents of
/// `dest`, all still live and dropped by their owner.
pub fn move_assign<D, S>(dest: D, source: S) -> D::Output
where
  D: IntoRangeMut,
  S: IntoRangeMut,
  S::Output: RangeMut<Elem = <D::Output as RangeMut>::Elem>,
{
  let mut dest = dest.into_range_mut();
  let mut source = source.into_range_mut();
  while !dest.is_empty() && !source.is_empty() {
    mem::swap(dest.front_mut(), source.front_mut());
    dest.advance();
    source.advance();
  }
  dest
}

/// Relocate elements from `source` into uninitialized `dest` storage.
/// Returns the unconsumed remainder of `dest`.
///
/// # Safety
///
/// Every element of `source` that was consumed is moved out bitwise and must
/// be treated as uninitialized afterwards: it must not be read or dropped
/// again. The caller takes over responsibility for dropping the moved values
/// through `dest`.
pub unsafe fn move_construct<T, D, S>(dest: D, source: S) -> D::Output
where
  D: IntoRangeMut,
  D::Output: RangeMut<Elem = MaybeUninit<T>>,
  S: IntoRangeMut,
  S::Output: RangeMut<Elem = T>,
{
  let mut dest = dest.into_range_mut();
  let mut source = source.into_range_mut();
  while !dest.is_empty() && !source.is_empty() {
    // SAFETY: the source element is live; the caller forgets it afterwards
    let value = unsafe { ptr::read(source.front_mut()) };
    dest.front_mut().write(value);
    dest.advance();
    source.advance();
  }
  dest
}

/// Call `f` on every element of the range.
pub fn map<R, F>(r: R, mut f: F)
where
  R: IntoRange,
  F: FnMut(<R::Output as Range>::Item),
{
  let mut r = r.into_range();
  while !r.is_empty() {
    f(r.front());
    r.advance();
  }
}

/// Call `f` on every element of the range, by mutable reference.
pub fn map_mut<R, F>(r: R, mut f: F)
where
  R: IntoRangeMut,
  F: FnMut(&mut <R::Output as RangeMut>::Elem),
{
  let mut r = r.into_range_mut();
  while !r.is_empty() {
    f(r.front_mut());
    r.advance();
  }
}

/// The sub-range starting at the first element matching `pred`, or the
/// exhausted range when nothing matches.
pub fn find<R, P>(r: R, mut pred: P) -> R::Output
where
  R: IntoRange,
  P: FnMut(<R::Output as Range>::Item) -> bool,
{
  let mut r = r.into_range();
  while !r.is_empty() {
    if pred(r.front()) {
      return r;
    }
    r.advance();
  }
  r
}

/// Like [`find`], but skips the current front first. Feeding the result of a
/// previous search back in finds the next match.
pub fn find_next<R, P>(r: R, pred: P) -> R::Output
where
  R: IntoRange,
  P: FnMut(<R::Output as Range>::Item) -> bool,
{
  let mut r = r.into_range();
  if r.is_empty() {
    return r;
  }
  r.advance();
  find(r, pred)
}

/// The sub-range starting at the last element matching `pred`, or the
/// exhausted range when nothing matches. Single forward pass.
pub fn find_last<R, P>(r: R, mut pred: P) -> R::Output
where
  R: IntoRange,
  R::Output: Clone,
  P: FnMut(<R::Output as Range>::Item) -> bool,
{
  let mut found = find(r, &mut pred);
  if found.is_empty() {
    return found;
  }
  loop {
    let next = find_next(found.clone(), &mut pred);
    if next.is_empty() {
      return found;
    }
    found = next;
  }
}

pub fn contains<R, P>(r: R, pred: P) -> bool
where
  R: IntoRange,
  P: FnMut(<R::Output as Range>::Item) -> bool,
{
  !find(r, pred).is_empty()
}

/// Assign a freshly made value to every element, dropping the old ones.
pub fn fill<R, F>(r: R, mut make: F)
where
  R: IntoRangeMut,
  F: FnMut() -> <R::Output as RangeMut>::Elem,
{
  let mut r = r.into_range_mut();
  while !r.is_empty() {
    *r.front_mut() = make();
    r.advance();
  }
}

/// Construct a freshly made value into every slot of uninitialized storage.
/// Whatever the slots held before is overwritten without being dropped.
pub fn fill_construct<T, R, F>(r: R, mut make: F)
where
  R: IntoRangeMut,
  R::Output: RangeMut<Elem = MaybeUninit<T>>,
  F: FnMut() -> T,
{
  let mut r = r.into_range_mut();
  while !r.is_empty() {
    r.front_mut().write(make());
    r.advance();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::range::{
    iota,
    range,
    range_mut,
  };
  use core::cell::Cell;

  #[derive(Default)]
  struct Counts {
    clones: Cell<usize>,
    drops: Cell<usize>,
  }

  struct Element<'a> {
    data: i32,
    counts: &'a Counts,
  }

  impl Clone for Element<'_> {
    fn clone(&self) -> Self {
      self.counts.clones.set(self.counts.clones.get() + 1);
      Element {
        data: self.data,
        counts: self.counts,
      }
    }
  }

  impl Drop for Element<'_> {
    fn drop(&mut self) {
      self.counts.drops.set(self.counts.drops.get() + 1);
    }
  }

  #[test]
  fn move_assign_primitive_returns_dest_remainder() {
    let mut from = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
    let mut to = [0; 20];
    let rest = move_assign(&mut to, &mut from);
    assert_eq!(rest.size(), Some(10));
    let rest = move_assign(rest, &mut [10, 11, 12, 13, 14, 15, 16, 17, 18, 19]);
    assert!(rest.is_empty());
    assert_eq!(to[..], (0..20).collect::<alloc::vec::Vec<_>>()[..]);
  }

  #[test]
  fn move_assign_stops_at_shorter_range() {
    let mut from = [1, 2, 3];
    let mut to = [0; 2];
    let rest = move_assign(&mut to, &mut from);
    assert!(rest.is_empty());
    assert_eq!(to, [1, 2]);
    assert_eq!(from, [0, 0, 3]);
  }

  #[test]
  fn move_assign_objects_never_clones_or_drops() {
    let counts = Counts::default();
    {
      let mut source: alloc::vec::Vec<_> = (0..10).map(|data| Element { data, counts: &counts }).collect();
      let mut dest: alloc::vec::Vec<_> = (10..20).map(|data| Element { data, counts: &counts }).collect();
      move_assign(&mut dest[..], &mut source[..]);
      assert_eq!(counts.clones.get(), 0);
      assert_eq!(counts.drops.get(), 0);
      assert_eq!(dest[3].data, 3);
    }
    assert_eq!(counts.drops.get(), 20);
  }

  #[test]
  fn move_construct_relocates_without_clone_or_drop() {
    let counts = Counts::default();
    let mut source: alloc::vec::Vec<_> = (0..10).map(|data| Element { data, counts: &counts }).collect();
    let mut dest: alloc::vec::Vec<MaybeUninit<Element<'_>>> = (0..20).map(|_| MaybeUninit::uninit()).collect();

    let rest = unsafe { move_construct(&mut dest[..], &mut source[..]) };
    assert_eq!(rest.size(), Some(10));
    // the moved-out originals must not be dropped again
    unsafe { source.set_len(0) };
    assert_eq!(counts.clones.get(), 0);
    assert_eq!(counts.drops.get(), 0);

    for (i, slot) in dest[..10].iter_mut().enumerate() {
      let element = unsafe { slot.assume_init_read() };
      assert_eq!(element.data, i as i32);
    }
    assert_eq!(counts.drops.get(), 10);
  }

  #[test]
  fn map_mut_doubles_in_place() {
    let mut items = [1, 2, 3, 4];
    map_mut(&mut items, |a| *a *= 2);
    assert_eq!(items, [2, 4, 6, 8]);
  }

  #[test]
  fn map_visits_every_element() {
    let items = [5, 10, 20];
    let mut sum = 0;
    map(&items, |a| sum += a);
    assert_eq!(sum, 35);
  }

  #[test]
  fn map_does_not_advance_the_callers_range() {
    let items = [1, 2, 3, 4];
    let initial = range(&items);
    map(initial, |_| {});
    assert_eq!(range(&items), initial);
  }

  #[test]
  fn find_returns_non_empty_range_on_match() {
    let items = [10, 20, 100, 50, 40, 6, 100, 120, 50];
    let r = find(&items, |&a| a < 10);
    assert!(!r.is_empty());
    assert_eq!(r.size(), Some(4));
  }

  #[test]
  fn find_returns_empty_range_without_match() {
    let items = [10, 20, 100, 50, 40, 100, 120, 50];
    assert!(find(&items, |&a| a < 10).is_empty());
    assert!(!contains(&items, |&a| a < 10));
    assert!(contains(&items, |&a| a == 40));
  }

  #[test]
  fn find_matches_manual_advance() {
    let items = [10, 20, 100, 50, 40, 100, 120, 50];
    let found = find(&items, |&a| a == 100);
    let mut r = range(&items);
    r.advance();
    r.advance();
    assert_eq!(r, found);
  }

  #[test]
  fn successive_finds() {
    let items = [10, 20, 100, 50, 40, 100, 120, 50];
    let first = find(&items, |&a| a == 100);
    let mut after_first = first;
    after_first.advance();
    let second = find(after_first, |&a| a == 100);
    assert_ne!(first, second);
    assert_eq!(find_next(first, |&a| a == 100), second);
  }

  #[test]
  fn find_next_on_empty_range_is_empty() {
    let items: [i32; 0] = [];
    assert!(find_next(&items, |_| true).is_empty());
  }

  #[test]
  fn find_last_returns_final_match() {
    let items = [100, 20, 100, 50, 100, 7];
    let last = find_last(&items, |&a| a == 100);
    assert_eq!(last.size(), Some(2));
    assert!(find_last(&items, |&a| a == 3).is_empty());
  }

  #[test]
  fn find_over_unbounded_range() {
    let mut r = find(iota(0u32), |a| a * a > 50);
    assert_eq!(r.front(), 8);
  }

  #[test]
  fn fill_replaces_every_element() {
    let counts = Counts::default();
    let mut items: alloc::vec::Vec<_> = (0..4).map(|data| Element { data, counts: &counts }).collect();
    fill(&mut items[..], || Element { data: 9, counts: &counts });
    assert_eq!(counts.drops.get(), 4);
    assert!(items.iter().all(|e| e.data == 9));
  }

  #[test]
  fn fill_construct_writes_uninitialized_storage() {
    let mut slots = [MaybeUninit::<u64>::uninit(); 8];
    let mut next = 0;
    fill_construct(&mut slots, || {
      next += 1;
      next
    });
    let values: alloc::vec::Vec<u64> = slots.iter().map(|s| unsafe { s.assume_init() }).collect();
    assert_eq!(values, [1, 2, 3, 4, 5, 6, 7, 8]);
  }

  #[test]
  fn range_mut_view_reports_size() {
    let mut items = [0u8; 3];
    let r = range_mut(&mut items);
    assert_eq!(r.size(), Some(3));
  }
}

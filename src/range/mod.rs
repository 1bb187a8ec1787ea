//! The range protocol.
//!
//! A range is a non-owning cursor with three operations: [`Range::is_empty`],
//! [`Range::advance`] and [`Range::front`]. Ranges that know their remaining
//! length in O(1) also report [`Range::size`]. Every algorithm in
//! [`crate::algorithms`] is written against this protocol, so containers only
//! have to hand out ranges over their storage.
//!
//! Elements that must be mutated in place go through [`RangeMut`], whose
//! [`RangeMut::front_mut`] borrows the range for as long as the element
//! reference lives.

mod iota;
mod pointer;
mod transform;
mod wrap;
mod zip;

pub use iota::{
  Indices,
  IotaRange,
  indices,
  iota,
};
pub use pointer::{
  PointerRange,
  PointerRangeMut,
};
pub use transform::{
  TransformRange,
  transform,
};
pub use wrap::{
  ForwardRange,
  wrap_range,
};
pub use zip::{
  IntoZip,
  ZipRange,
  zip,
};

/// A forward range producing `Item`s.
pub trait Range {
  type Item;

  /// `true` once every element has been consumed.
  fn is_empty(&self) -> bool;

  /// Skip the front element. The range must not be empty.
  fn advance(&mut self);

  /// The current front element. The range must not be empty.
  fn front(&mut self) -> Self::Item;

  /// Remaining length, when it is known without walking the range.
  fn size(&self) -> Option<usize> {
    None
  }

  /// Adapt the range to [`Iterator`] so it can drive a `for` loop.
  fn iter(self) -> RangeIter<Self>
  where
    Self: Sized,
  {
    RangeIter { range: self }
  }
}

/// A forward range over elements stored in memory that can be mutated in place.
pub trait RangeMut {
  type Elem;

  fn is_empty(&self) -> bool;

  fn advance(&mut self);

  fn front_mut(&mut self) -> &mut Self::Elem;

  fn size(&self) -> Option<usize> {
    None
  }
}

/// Conversion into a [`Range`]. Ranges convert to themselves; containers and
/// slices convert to a [`PointerRange`] over their live elements.
pub trait IntoRange {
  type Output: Range;

  fn into_range(self) -> Self::Output;
}

/// Conversion into a [`RangeMut`].
pub trait IntoRangeMut {
  type Output: RangeMut;

  fn into_range_mut(self) -> Self::Output;
}

impl<R: Range> IntoRange for R {
  type Output = R;

  fn into_range(self) -> R {
    self
  }
}

impl<R: RangeMut> IntoRangeMut for R {
  type Output = R;

  fn into_range_mut(self) -> R {
    self
  }
}

impl<'a, T> IntoRange for &'a [T] {
  type Output = PointerRange<'a, T>;

  fn into_range(self) -> PointerRange<'a, T> {
    PointerRange::new(self)
  }
}

impl<'a, T, const N: usize> IntoRange for &'a [T; N] {
  type Output = PointerRange<'a, T>;

  fn into_range(self) -> PointerRange<'a, T> {
    PointerRange::new(self)
  }
}

impl<'a, T> IntoRange for &'a mut [T] {
  type Output = PointerRange<'a, T>;

  fn into_range(self) -> PointerRange<'a, T> {
    PointerRange::new(self)
  }
}

impl<'a, T> IntoRangeMut for &'a mut [T] {
  type Output = PointerRangeMut<'a, T>;

  fn into_range_mut(self) -> PointerRangeMut<'a, T> {
    PointerRangeMut::new(self)
  }
}

impl<'a, T, const N: usize> IntoRangeMut for &'a mut [T; N] {
  type Output = PointerRangeMut<'a, T>;

  fn into_range_mut(self) -> PointerRangeMut<'a, T> {
    PointerRangeMut::new(self)
  }
}

/// Normalize anything range-like into a concrete range.
pub fn range<R: IntoRange>(r: R) -> R::Output {
  r.into_range()
}

/// Normalize anything with in-place elements into a concrete [`RangeMut`].
pub fn range_mut<R: IntoRangeMut>(r: R) -> R::Output {
  r.into_range_mut()
}

/// [`Iterator`] adapter returned by [`Range::iter`].
#[derive(Debug, Clone)]
pub struct RangeIter<R> {
  range: R,
}

impl<R: Range> Iterator for RangeIter<R> {
  type Item = R::Item;

  fn next(&mut self) -> Option<R::Item> {
    if self.range.is_empty() {
      return None;
    }
    let item = self.range.front();
    self.range.advance();
    Some(item)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    match self.range.size() {
      Some(size) => (size, Some(size)),
      None if self.range.is_empty() => (0, Some(0)),
      None => (0, None),
    }
  }
}

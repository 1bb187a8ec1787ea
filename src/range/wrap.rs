use alloc::boxed::Box;

use super::{
  IntoRange,
  Range,
};

/// A range whose concrete type has been erased.
///
/// Useful where the range type cannot be named, such as when a range is
/// returned across a trait-object boundary.
pub struct ForwardRange<'a, T> {
  inner: Box<dyn Range<Item = T> + 'a>,
}

impl<T> Range for ForwardRange<'_, T> {
  type Item = T;

  fn is_empty(&self) -> bool {
    self.inner.is_empty()
  }

  fn advance(&mut self) {
    self.inner.advance();
  }

  fn front(&mut self) -> T {
    self.inner.front()
  }

  fn size(&self) -> Option<usize> {
    self.inner.size()
  }
}

pub fn wrap_range<'a, R>(r: R) -> ForwardRange<'a, <R::Output as Range>::Item>
where
  R: IntoRange,
  R::Output: 'a,
{
  ForwardRange {
    inner: Box::new(r.into_range()),
  }
}

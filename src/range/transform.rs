use super::{
  IntoRange,
  Range,
};

/// Applies a function to the front of the inner range on every
/// [`Range::front`] call. Results are not cached.
#[derive(Clone)]
pub struct TransformRange<R, F> {
  range: R,
  func: F,
}

impl<R, F, U> Range for TransformRange<R, F>
where
  R: Range,
  F: FnMut(R::Item) -> U,
{
  type Item = U;

  fn is_empty(&self) -> bool {
    self.range.is_empty()
  }

  fn advance(&mut self) {
    self.range.advance();
  }

  fn front(&mut self) -> U {
    (self.func)(self.range.front())
  }

  fn size(&self) -> Option<usize> {
    self.range.size()
  }
}

pub fn transform<R, F, U>(r: R, func: F) -> TransformRange<R::Output, F>
where
  R: IntoRange,
  F: FnMut(<R::Output as Range>::Item) -> U,
{
  TransformRange {
    range: r.into_range(),
    func,
  }
}

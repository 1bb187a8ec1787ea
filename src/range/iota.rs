use core::ops::Add;

use super::Range;

/// An unbounded counting range: `start, start + 1, start + 2, ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IotaRange<T> {
  it: T,
}

impl<T> IotaRange<T> {
  pub const fn new(start: T) -> Self {
    Self { it: start }
  }
}

impl<T> Range for IotaRange<T>
where
  T: Copy + Add<Output = T> + From<u8>,
{
  type Item = T;

  fn is_empty(&self) -> bool {
    false
  }

  fn advance(&mut self) {
    self.it = self.it + T::from(1);
  }

  fn front(&mut self) -> T {
    self.it
  }
}

pub fn iota<T>(start: T) -> IotaRange<T>
where
  T: Copy + Add<Output = T> + From<u8>,
{
  IotaRange::new(start)
}

/// The indices `[0, num)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indices {
  current: usize,
  end: usize,
}

impl Range for Indices {
  type Item = usize;

  fn is_empty(&self) -> bool {
    self.current >= self.end
  }

  fn advance(&mut self) {
    self.current += 1;
  }

  fn front(&mut self) -> usize {
    self.current
  }

  fn size(&self) -> Option<usize> {
    Some(self.end.saturating_sub(self.current))
  }
}

pub fn indices(num: usize) -> Indices {
  Indices { current: 0, end: num }
}

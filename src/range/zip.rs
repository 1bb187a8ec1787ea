use super::{
  IntoRange,
  Range,
};

/// Steps several ranges in lockstep, yielding a tuple of their fronts.
///
/// Empty as soon as any member is empty. The size is the minimum over the
/// members that know their size, so zipping an unbounded [`super::IotaRange`]
/// with a slice is sized by the slice.
#[derive(Debug, Clone, Copy)]
pub struct ZipRange<R> {
  ranges: R,
}

/// Tuples of range-like values that [`zip`] accepts.
pub trait IntoZip {
  type Ranges;

  fn into_zip(self) -> Self::Ranges;
}

pub fn zip<Z: IntoZip>(ranges: Z) -> ZipRange<Z::Ranges>
where
  ZipRange<Z::Ranges>: Range,
{
  ZipRange {
    ranges: ranges.into_zip(),
  }
}

fn min_size(acc: Option<usize>, size: Option<usize>) -> Option<usize> {
  match (acc, size) {
    (Some(a), Some(b)) => Some(a.min(b)),
    (None, b) => b,
    (a, None) => a,
  }
}

macro_rules! impl_zip {
  ($($name:ident : $idx:tt),+) => {
    impl<$($name: IntoRange),+> IntoZip for ($($name,)+) {
      type Ranges = ($(<$name as IntoRange>::Output,)+);

      fn into_zip(self) -> Self::Ranges {
        ($(self.$idx.into_range(),)+)
      }
    }

    impl<$($name: Range),+> Range for ZipRange<($($name,)+)> {
      type Item = ($(<$name as Range>::Item,)+);

      fn is_empty(&self) -> bool {
        $(self.ranges.$idx.is_empty())||+
      }

      fn advance(&mut self) {
        $(self.ranges.$idx.advance();)+
      }

      fn front(&mut self) -> Self::Item {
        ($(self.ranges.$idx.front(),)+)
      }

      fn size(&self) -> Option<usize> {
        let size = None;
        $(let size = min_size(size, self.ranges.$idx.size());)+
        size
      }
    }
  };
}

impl_zip!(A: 0, B: 1);
impl_zip!(A: 0, B: 1, C: 2);
impl_zip!(A: 0, B: 1, C: 2, D: 3);

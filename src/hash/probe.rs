/// Probe sequence for open addressing.
///
/// `offset(step)` is added to the home bucket and masked by the power-of-two
/// capacity. For `step` in `0..capacity` the sequence must visit every slot.
pub trait Probe {
  fn offset(step: usize) -> usize;
}

/// `home, home + 1, home + 2, ...`
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearProbe;

impl Probe for LinearProbe {
  #[inline]
  fn offset(step: usize) -> usize {
    step
  }
}

/// Triangular steps: `home, home + 1, home + 3, home + 6, ...`. Covers a
/// power-of-two table exactly once.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticProbe;

impl Probe for QuadraticProbe {
  #[inline]
  fn offset(step: usize) -> usize {
    step.wrapping_mul(step.wrapping_add(1)) / 2
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn visited<P: Probe>(capacity: usize) -> Vec<bool> {
    let mut seen = vec![false; capacity];
    for step in 0..capacity {
      seen[(5 + P::offset(step)) & (capacity - 1)] = true;
    }
    seen
  }

  #[test]
  fn linear_covers_table() {
    assert!(visited::<LinearProbe>(64).into_iter().all(|seen| seen));
  }

  #[test]
  fn quadratic_covers_power_of_two_table() {
    for capacity in [8, 16, 256] {
      assert!(visited::<QuadraticProbe>(capacity).into_iter().all(|seen| seen));
    }
  }
}

use alloc::alloc::{
  Layout,
  handle_alloc_error,
};
use std::io;

use thiserror::Error;

/// Failure to obtain backing storage for a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TryReserveError {
  /// The requested element count does not fit in a [`Layout`].
  #[error("capacity overflow")]
  CapacityOverflow,
  /// The allocator refused the request.
  #[error("allocation of {} bytes (align {}) failed", .layout.size(), .layout.align())]
  AllocError { layout: Layout },
}

impl TryReserveError {
  /// Treat the failure as fatal, the way the infallible container APIs do.
  pub(crate) fn fatal(self) -> ! {
    match self {
      TryReserveError::CapacityOverflow => {
        error!("capacity overflow");
        panic!("capacity overflow");
      }
      TryReserveError::AllocError { layout } => {
        error!(size = layout.size(), align = layout.align(), "allocation failed");
        handle_alloc_error(layout)
      }
    }
  }
}

#[derive(Debug, Error)]
pub enum FileError {
  #[error("i/o error: {0}")]
  Io(#[from] io::Error),
  #[error("file of {0} bytes does not fit in memory")]
  TooLarge(u64),
  #[error(transparent)]
  Alloc(#[from] TryReserveError),
}

//! Foundational containers and the range protocol they are built on.
//!
//! Every container hands out ranges over its storage, and the generic
//! [`algorithms`] do all moving, searching and filling through them:
//!
//! - [`Array`]: growable contiguous buffer with amortized doubling.
//! - [`FixedArray`]: inline buffer of `N` slots that never grows.
//! - [`BitArray`]: packed bits with word-at-a-time scans.
//! - [`Pool`]: fixed set of slots addressed by stable handles, first fit.
//! - [`HashTable`]: open addressing with tombstones.
//!
//! The structures are single-threaded; callers synchronize externally.
//! Contract violations log through `tracing` (with the `logging` feature) and
//! panic, which release builds turn into an abort.

#![feature(allocator_api)]
#![feature(dropck_eyepatch)]

extern crate alloc;

#[macro_use]
mod logging;
#[macro_use]
mod debug;

pub mod algorithms;
pub mod array;
pub mod bitarray;
pub mod error;
pub mod ffi;
pub mod file;
pub mod fixed;
pub mod hash;
pub mod paths;
pub mod pool;
pub mod range;

pub use array::Array;
pub use bitarray::BitArray;
pub use error::{
  FileError,
  TryReserveError,
};
pub use file::{
  FileReader,
  load_file_to_array,
};
pub use fixed::FixedArray;
pub use hash::HashTable;
pub use pool::Pool;
pub use range::{
  IntoRange,
  IntoRangeMut,
  PointerRange,
  PointerRangeMut,
  Range,
  RangeMut,
};

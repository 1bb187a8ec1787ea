#![allow(unused_macros)]

macro_rules! trace {
  ($($arg:tt)+) => (
    #[cfg(feature = "logging")]
    tracing::trace!(target: "mu_core", $($arg)+);
  )
}

macro_rules! debug {
  ($($arg:tt)+) => (
    #[cfg(feature = "logging")]
    tracing::debug!(target: "mu_core", $($arg)+);
  )
}

macro_rules! error {
  ($($arg:tt)+) => (
    #[cfg(feature = "logging")]
    tracing::error!(target: "mu_core", $($arg)+);
  )
}

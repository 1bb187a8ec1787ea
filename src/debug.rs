//! Contract checks.
//!
//! A failed check is a programmer error: it logs a diagnostic and panics.
//! Release builds abort on panic, so a violation never unwinds through a
//! container that is halfway through a mutation.

macro_rules! check {
  ($cond:expr $(,)?) => {
    if !$cond {
      error!("check failed: {}", stringify!($cond));
      panic!("check failed: {}", stringify!($cond));
    }
  };
}

macro_rules! check_msg {
  ($cond:expr, $($arg:tt)+) => {
    if !$cond {
      error!("check failed: {}: {}", stringify!($cond), format_args!($($arg)+));
      panic!("check failed: {}: {}", stringify!($cond), format_args!($($arg)+));
    }
  };
}

#[cfg(test)]
mod tests {
  #[test]
  fn passing_check_is_silent() {
    check!(1 + 1 == 2);
    check_msg!(true, "never shown {}", 7);
  }

  #[test]
  #[should_panic(expected = "check failed: 1 > 2")]
  fn failing_check_panics_with_expression() {
    check!(1 > 2);
  }

  #[test]
  #[should_panic(expected = "slot 4 is free")]
  fn failing_check_msg_carries_message() {
    let slot = 4;
    check_msg!(slot < 4, "slot {} is free", slot);
  }
}

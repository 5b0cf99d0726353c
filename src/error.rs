// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use std::{error, fmt};


/// Raised when the decoder hands back something its contract rules out: a
/// non-positive sample count, a failed fetch or arrays of unequal length.
///
/// These are never retried. The decoder's internal state is opaque to us, so
/// the current operation is aborted and the `Inconsistency` travels up inside
/// an `eyre::Report`, from which it can be recovered like so:
///
/// ```ignore
/// match session.samples("GPS Speed", Window::default()) {
///   Err(report) if report.downcast_ref::<Inconsistency>().is_some() => ..,
///   ..
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Inconsistency(pub String);

impl Inconsistency {
  pub fn new(msg: &str) -> Self {
    Self(msg.to_string())
  }
}

impl fmt::Display for Inconsistency {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "internal consistency failure: {}", self.0)
  }
}

impl error::Error for Inconsistency {}


/// Returns early with an `Inconsistency` wrapped in an `eyre::Report`. Takes
/// the same arguments as `format!`.
macro_rules! inconsistent {
  ($($arg:tt)*) => {
    return Err(::eyre::Report::new($crate::error::Inconsistency(format!($($arg)*))))
  }
}

/// Like `eyre::ensure!`, but the error is an `Inconsistency`.
macro_rules! ensure_consistent {
  ($cond:expr, $($arg:tt)*) => {
    if !($cond) { inconsistent!($($arg)*) }
  }
}

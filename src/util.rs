// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

#[cfg(feature = "aim")]
use eyre::{ensure, eyre, Result};
#[cfg(feature = "aim")]
use std::{ffi::{CStr, CString},
          os::raw::c_char,
          path::Path};


/// Number of decimal places timestamps, lap info and interpolated lookups are
/// rounded to.
pub const PRECISION: i32 = 4;


/// Rounds `value` to `PRECISION` decimal places, correctly for the exact
/// binary value and with exact ties going to even.
pub fn round(value: f64) -> f64 {
  format!("{:.*}", PRECISION as usize, value).parse()
                                             .unwrap_or(value)
}


/// Converts a `*const c_char` handed out by the AiM library to an owned Rust
/// `String`. Null pointers are an error, the library uses them to signal one.
#[cfg(feature = "aim")]
pub fn strptr_to_string(strptr: *const c_char) -> Result<String> {
  ensure!(!strptr.is_null(), "error: fetched null pointer");
  Ok(unsafe { CStr::from_ptr(strptr) }.to_str()?.to_owned())
}

/// Converts a `Path` to the absolute C string path the AiM library expects.
#[cfg(feature = "aim")]
pub fn path_to_cstring(path: &Path) -> Result<CString> {
  Ok(CString::new(path.canonicalize()?
                      .to_str()
                      .ok_or_else(|| {
                        eyre!("path '{}' invalid", path.display())
                      })?)?)
}

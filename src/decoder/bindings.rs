// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

//! Raw declarations of the AiM shared library.
//!
//! Conventions shared by all functions below:
//! - `idxf` is the file index returned by `open_file`, `idxl` a lap index and
//!   `idxc` a channel index within the respective channel family,
//! - strings come back as C strings owned by the library, `NULL` on error,
//! - counts come back positive on success, `0` for "nothing there" and
//!   negative on error,
//! - sample fetches write `cnt` values into the `ptimes`/`pvalues` buffers and
//!   return the number of values written.

#![allow(non_camel_case_types, non_snake_case)]

use std::os::raw::{c_char, c_int};


/// Binding to C tm struct storing datetime info (defined in `time.h`)
#[repr(C)]
#[derive(Debug, Copy, Clone)]
#[doc(hidden)]
pub struct tm {
  pub tm_sec:   c_int, // seconds, range 0 to 59
  pub tm_min:   c_int, // minutes, range 0 to 59
  pub tm_hour:  c_int, // hours, range 0 to 23
  pub tm_mday:  c_int, // day of the month, range 1 to 31
  pub tm_mon:   c_int, // month, range 0 to 11
  pub tm_year:  c_int, // number of years since 1900
  pub tm_wday:  c_int, // day of the week, range 0 to 6
  pub tm_yday:  c_int, // day in the year, range 0 to 365
  pub tm_isdst: c_int, // daylight saving time
}


pub type NameFn = unsafe extern "C" fn(c_int, c_int) -> *const c_char;
pub type CountFn = unsafe extern "C" fn(c_int) -> c_int;
pub type SamplesCountFn = unsafe extern "C" fn(c_int, c_int) -> c_int;
pub type SamplesFn =
  unsafe extern "C" fn(c_int, c_int, *mut f64, *mut f64, c_int) -> c_int;
pub type LapSamplesCountFn = unsafe extern "C" fn(c_int, c_int, c_int) -> c_int;
pub type LapSamplesFn = unsafe extern "C" fn(c_int,
                                             c_int,
                                             c_int,
                                             *mut f64,
                                             *mut f64,
                                             c_int)
                                             -> c_int;


#[allow(dead_code)]
#[doc(hidden)]
extern "C" {
  // FILE OPENING / CLOSING ------------------------------------------------ //
  /// Returns the (positive) file index, `0` if the file opened but can't be
  /// parsed.
  pub fn open_file(full_path_name: *const c_char) -> c_int;
  /// Returns the closed file's index on success.
  pub fn close_file_i(idx: c_int) -> c_int;

  // SESSION INFORMATION --------------------------------------------------- //
  pub fn get_vehicle_name(idx: c_int) -> *const c_char;
  pub fn get_track_name(idx: c_int) -> *const c_char;
  pub fn get_racer_name(idx: c_int) -> *const c_char;
  pub fn get_championship_name(idx: c_int) -> *const c_char;
  pub fn get_venue_type_name(idx: c_int) -> *const c_char;
  pub fn get_date_and_time(idx: c_int) -> *const tm;

  // LAPS ------------------------------------------------------------------ //
  pub fn get_laps_count(idx: c_int) -> c_int;
  /// Writes start (seconds since session start) and duration of lap `idxl`,
  /// returns `1` on success.
  pub fn get_lap_info(idxf: c_int,
                      idxl: c_int,
                      pstart: *mut f64,
                      pduration: *mut f64)
                      -> c_int;

  // REGULAR CHANNELS ------------------------------------------------------ //
  pub fn get_channels_count(idx: c_int) -> c_int;
  pub fn get_channel_name(idxf: c_int, idxc: c_int) -> *const c_char;
  pub fn get_channel_units(idxf: c_int, idxc: c_int) -> *const c_char;
  pub fn get_channel_samples_count(idxf: c_int, idxc: c_int) -> c_int;
  pub fn get_channel_samples(idxf: c_int,
                             idxc: c_int,
                             ptimes: *mut f64,
                             pvalues: *mut f64,
                             cnt: c_int)
                             -> c_int;
  pub fn get_lap_channel_samples_count(idxf: c_int,
                                       idxl: c_int,
                                       idxc: c_int)
                                       -> c_int;
  pub fn get_lap_channel_samples(idxf: c_int,
                                 idxl: c_int,
                                 idxc: c_int,
                                 ptimes: *mut f64,
                                 pvalues: *mut f64,
                                 cnt: c_int)
                                 -> c_int;

  // GPS CHANNELS ---------------------------------------------------------- //
  pub fn get_GPS_channels_count(idx: c_int) -> c_int;
  pub fn get_GPS_channel_name(idxf: c_int, idxc: c_int) -> *const c_char;
  pub fn get_GPS_channel_units(idxf: c_int, idxc: c_int) -> *const c_char;
  pub fn get_GPS_channel_samples_count(idxf: c_int, idxc: c_int) -> c_int;
  pub fn get_GPS_channel_samples(idxf: c_int,
                                 idxc: c_int,
                                 ptimes: *mut f64,
                                 pvalues: *mut f64,
                                 cnt: c_int)
                                 -> c_int;
  pub fn get_lap_GPS_channel_samples_count(idxf: c_int,
                                           idxl: c_int,
                                           idxc: c_int)
                                           -> c_int;
  pub fn get_lap_GPS_channel_samples(idxf: c_int,
                                     idxl: c_int,
                                     idxc: c_int,
                                     ptimes: *mut f64,
                                     pvalues: *mut f64,
                                     cnt: c_int)
                                     -> c_int;

  // GPS RAW CHANNELS ------------------------------------------------------ //
  pub fn get_GPS_raw_channels_count(idx: c_int) -> c_int;
  pub fn get_GPS_raw_channel_name(idxf: c_int, idxc: c_int) -> *const c_char;
  pub fn get_GPS_raw_channel_units(idxf: c_int, idxc: c_int) -> *const c_char;
  pub fn get_GPS_raw_channel_samples_count(idxf: c_int, idxc: c_int) -> c_int;
  pub fn get_GPS_raw_channel_samples(idxf: c_int,
                                     idxc: c_int,
                                     ptimes: *mut f64,
                                     pvalues: *mut f64,
                                     cnt: c_int)
                                     -> c_int;
  pub fn get_lap_GPS_raw_channel_samples_count(idxf: c_int,
                                               idxl: c_int,
                                               idxc: c_int)
                                               -> c_int;
  pub fn get_lap_GPS_raw_channel_samples(idxf: c_int,
                                         idxl: c_int,
                                         idxc: c_int,
                                         ptimes: *mut f64,
                                         pvalues: *mut f64,
                                         cnt: c_int)
                                         -> c_int;

  // LIBRARY META ---------------------------------------------------------- //
  pub fn get_library_date() -> *const c_char;
  pub fn get_library_time() -> *const c_char;
}

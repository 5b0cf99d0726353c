// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use super::{bindings as aim, ChannelKind, Decoder};
use crate::util;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use eyre::{bail, ensure, eyre, Result};
use lazy_static::lazy_static;
use std::{cmp::Ordering,
          os::raw::c_int,
          path::Path,
          sync::{Mutex, MutexGuard}};


lazy_static! {
  // nothing is known about the thread safety of the AiM library, so every
  // call into it goes through this lock
  static ref LIBCALL_MTX: Mutex<()> = Mutex::new(());
}

fn libcall_guard() -> MutexGuard<'static, ()> {
  LIBCALL_MTX.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}


/// The library entry points backing one `ChannelKind`.
struct Entrypoints {
  count:             aim::CountFn,
  name:              aim::NameFn,
  units:             aim::NameFn,
  samples_count:     aim::SamplesCountFn,
  samples:           aim::SamplesFn,
  lap_samples_count: aim::LapSamplesCountFn,
  lap_samples:       aim::LapSamplesFn,
}

const REGULAR: Entrypoints =
  Entrypoints { count:             aim::get_channels_count,
                name:              aim::get_channel_name,
                units:             aim::get_channel_units,
                samples_count:     aim::get_channel_samples_count,
                samples:           aim::get_channel_samples,
                lap_samples_count: aim::get_lap_channel_samples_count,
                lap_samples:       aim::get_lap_channel_samples, };

const GPS: Entrypoints =
  Entrypoints { count:             aim::get_GPS_channels_count,
                name:              aim::get_GPS_channel_name,
                units:             aim::get_GPS_channel_units,
                samples_count:     aim::get_GPS_channel_samples_count,
                samples:           aim::get_GPS_channel_samples,
                lap_samples_count: aim::get_lap_GPS_channel_samples_count,
                lap_samples:       aim::get_lap_GPS_channel_samples, };

const GPS_RAW: Entrypoints =
  Entrypoints { count:             aim::get_GPS_raw_channels_count,
                name:              aim::get_GPS_raw_channel_name,
                units:             aim::get_GPS_raw_channel_units,
                samples_count:     aim::get_GPS_raw_channel_samples_count,
                samples:           aim::get_GPS_raw_channel_samples,
                lap_samples_count: aim::get_lap_GPS_raw_channel_samples_count,
                lap_samples:       aim::get_lap_GPS_raw_channel_samples, };

fn entrypoints(kind: ChannelKind) -> &'static Entrypoints {
  match kind {
    ChannelKind::Regular => &REGULAR,
    ChannelKind::Gps => &GPS,
    ChannelKind::GpsRaw => &GPS_RAW,
  }
}


/// `Decoder` backed by the AiM shared library (MatLabXRK). Handles `.xrk`
/// and `.drk` files.
#[derive(Clone, Copy, Debug, Default)]
pub struct AimDecoder;

impl AimDecoder {
  pub fn new() -> Self {
    Self
  }

  // META FUNCTIONS -------------------------------------------------------- //
  /// Library compilation date.
  pub fn library_date() -> Result<NaiveDate> {
    let _guard = libcall_guard();
    let date = util::strptr_to_string(unsafe { aim::get_library_date() })?;
    Ok(NaiveDate::parse_from_str(&date, "%b %d %Y")?)
  }

  /// Library compilation time.
  pub fn library_time() -> Result<NaiveTime> {
    let _guard = libcall_guard();
    let time = util::strptr_to_string(unsafe { aim::get_library_time() })?;
    Ok(NaiveTime::parse_from_str(&time, "%H:%M:%S")?)
  }

  /// Library compilation date and time.
  pub fn library_datetime() -> Result<NaiveDateTime> {
    Ok(Self::library_date()?.and_time(Self::library_time()?))
  }
}

impl Decoder for AimDecoder {
  // FILE OPENING / CLOSING FUNCTIONS -------------------------------------- //
  fn open(&self, path: &Path) -> Result<usize> {
    let extension =
      path.extension()
          .unwrap_or_default()
          .to_str()
          .ok_or_else(|| {
            eyre!("file extension is not valid unicode ({})", path.display())
          })?;

    ensure!(path.exists() && path.is_file(),
            "path does not exist or is not a valid file ({})",
            path.display());
    ensure!(["drk", "xrk"].contains(&extension),
            "only files with extensions .xrk and .drk accepted ({})",
            path.display());

    let path_cstr = util::path_to_cstring(path)?;
    let _guard = libcall_guard();
    let raw_idx = unsafe { aim::open_file(path_cstr.as_ptr()) };

    match raw_idx.cmp(&0) {
      Ordering::Greater => Ok(raw_idx as usize),
      Ordering::Equal => {
        bail!("file is open but can't be parsed ({})", path.display())
      }
      Ordering::Less => bail!("an error occurred ({})", path.display()),
    }
  }

  fn close(&self, idx: usize) -> Result<bool> {
    let _guard = libcall_guard();
    Ok(unsafe { aim::close_file_i(idx as c_int) } > 0)
  }

  // SESSION INFORMATION FUNCTIONS ----------------------------------------- //
  fn vehicle(&self, idx: usize) -> Result<String> {
    let _guard = libcall_guard();
    util::strptr_to_string(unsafe { aim::get_vehicle_name(idx as c_int) })
  }

  fn track(&self, idx: usize) -> Result<String> {
    let _guard = libcall_guard();
    util::strptr_to_string(unsafe { aim::get_track_name(idx as c_int) })
  }

  fn racer(&self, idx: usize) -> Result<String> {
    let _guard = libcall_guard();
    util::strptr_to_string(unsafe { aim::get_racer_name(idx as c_int) })
  }

  fn championship(&self, idx: usize) -> Result<String> {
    let _guard = libcall_guard();
    util::strptr_to_string(unsafe {
      aim::get_championship_name(idx as c_int)
    })
  }

  fn venue_type(&self, idx: usize) -> Result<String> {
    let _guard = libcall_guard();
    util::strptr_to_string(unsafe { aim::get_venue_type_name(idx as c_int) })
  }

  fn datetime(&self, idx: usize) -> Result<NaiveDateTime> {
    let _guard = libcall_guard();
    let tm: *const aim::tm = unsafe { aim::get_date_and_time(idx as c_int) };
    ensure!(!tm.is_null(), "could not fetch datetime object");

    let tm = unsafe { *tm };
    NaiveDate::from_ymd_opt(tm.tm_year + 1900,
                            (tm.tm_mon + 1) as u32,
                            tm.tm_mday as u32)
      .and_then(|date| {
        date.and_hms_opt(tm.tm_hour as u32,
                         tm.tm_min as u32,
                         tm.tm_sec as u32)
      })
      .ok_or_else(|| eyre!("library returned an invalid datetime"))
  }

  // LAP FUNCTIONS --------------------------------------------------------- //
  fn laps_count(&self, idx: usize) -> Result<i32> {
    let _guard = libcall_guard();
    Ok(unsafe { aim::get_laps_count(idx as c_int) })
  }

  fn lap_info(&self, idx: usize, lap: usize) -> Result<(f64, f64)> {
    let (mut start, mut duration) = (0.0f64, 0.0f64);
    let _guard = libcall_guard();
    let err_code = unsafe {
      aim::get_lap_info(idx as c_int, lap as c_int, &mut start, &mut duration)
    };
    ensure!(err_code == 1, "could not fetch info of lap {}", lap);

    Ok((start, duration))
  }

  // CHANNEL FUNCTIONS ----------------------------------------------------- //
  fn channels_count(&self, idx: usize, kind: ChannelKind) -> Result<i32> {
    let _guard = libcall_guard();
    Ok(unsafe { (entrypoints(kind).count)(idx as c_int) })
  }

  fn channel_name(&self,
                  idx: usize,
                  kind: ChannelKind,
                  channel: usize)
                  -> Result<String> {
    let _guard = libcall_guard();
    util::strptr_to_string(unsafe {
      (entrypoints(kind).name)(idx as c_int, channel as c_int)
    })
  }

  fn channel_units(&self,
                   idx: usize,
                   kind: ChannelKind,
                   channel: usize)
                   -> Result<String> {
    let _guard = libcall_guard();
    util::strptr_to_string(unsafe {
      (entrypoints(kind).units)(idx as c_int, channel as c_int)
    })
  }

  fn samples_count(&self,
                   idx: usize,
                   kind: ChannelKind,
                   channel: usize,
                   lap: Option<usize>)
                   -> Result<i32> {
    let entry = entrypoints(kind);
    let _guard = libcall_guard();
    Ok(unsafe {
      match lap {
        Some(lap) => (entry.lap_samples_count)(idx as c_int,
                                               lap as c_int,
                                               channel as c_int),
        None => (entry.samples_count)(idx as c_int, channel as c_int),
      }
    })
  }

  fn samples(&self,
             idx: usize,
             kind: ChannelKind,
             channel: usize,
             lap: Option<usize>,
             count: usize)
             -> Result<(Vec<f64>, Vec<f64>)> {
    let entry = entrypoints(kind);
    let (mut timestamps, mut values) = (vec![0.0; count], vec![0.0; count]);

    let _guard = libcall_guard();
    let read = unsafe {
      match lap {
        Some(lap) => (entry.lap_samples)(idx as c_int,
                                         lap as c_int,
                                         channel as c_int,
                                         timestamps.as_mut_ptr(),
                                         values.as_mut_ptr(),
                                         count as c_int),
        None => (entry.samples)(idx as c_int,
                                channel as c_int,
                                timestamps.as_mut_ptr(),
                                values.as_mut_ptr(),
                                count as c_int),
      }
    };
    ensure_consistent!(read == count as c_int,
                       "read {} of {} samples of {} channel {}",
                       read,
                       count,
                       kind,
                       channel);

    Ok((timestamps, values))
  }
}

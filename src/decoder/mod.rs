// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

#[cfg(feature = "aim")]
mod aim;
#[cfg(feature = "aim")]
mod bindings;

#[cfg(feature = "aim")]
pub use aim::AimDecoder;

use chrono::NaiveDateTime;
use eyre::Result;
use std::{fmt, path::Path};


/// The three families of channels a session file carries. Each family is
/// backed by its own set of decoder entry points, the windowing on top of
/// them is the same for all three.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ChannelKind {
  /// Channels recorded by the logger itself (temperatures, pressures, ...).
  Regular,
  /// GPS channels derived under the assumption that the vehicle is always
  /// aligned to its trajectory (speed, lateral acceleration, ...).
  Gps,
  /// Unprocessed GPS receiver output (ECEF position and velocity, ...).
  GpsRaw,
}

impl ChannelKind {
  /// Enumeration order of the channel families within a session.
  pub const ALL: [ChannelKind; 3] =
    [ChannelKind::Regular, ChannelKind::Gps, ChannelKind::GpsRaw];
}

impl fmt::Display for ChannelKind {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      ChannelKind::Regular => write!(f, "regular"),
      ChannelKind::Gps => write!(f, "GPS"),
      ChannelKind::GpsRaw => write!(f, "GPS raw"),
    }
  }
}


/// Whatever decodes the session file. Every method takes the file index
/// handed out by `open`.
///
/// Counts are passed through as the decoder reports them, signed, so that
/// the caller can tell a decoder failure (zero or negative) from data.
///
/// Timestamps returned by `samples` follow the decoder's own convention:
/// milliseconds for whole-session fetches (`lap == None`), seconds for
/// lap-scoped ones.
pub trait Decoder {
  /// Opens the file at `path` and returns its index.
  fn open(&self, path: &Path) -> Result<usize>;
  /// Closes the file, returning whether the decoder reported success.
  fn close(&self, idx: usize) -> Result<bool>;

  fn vehicle(&self, idx: usize) -> Result<String>;
  fn track(&self, idx: usize) -> Result<String>;
  fn racer(&self, idx: usize) -> Result<String>;
  fn championship(&self, idx: usize) -> Result<String>;
  fn venue_type(&self, idx: usize) -> Result<String>;
  fn datetime(&self, idx: usize) -> Result<NaiveDateTime>;

  fn laps_count(&self, idx: usize) -> Result<i32>;
  /// Start and duration of lap `lap` in seconds since session start.
  fn lap_info(&self, idx: usize, lap: usize) -> Result<(f64, f64)>;

  fn channels_count(&self, idx: usize, kind: ChannelKind) -> Result<i32>;
  fn channel_name(&self,
                  idx: usize,
                  kind: ChannelKind,
                  channel: usize)
                  -> Result<String>;
  fn channel_units(&self,
                   idx: usize,
                   kind: ChannelKind,
                   channel: usize)
                   -> Result<String>;

  /// Number of samples of a channel, for the whole session or one lap.
  fn samples_count(&self,
                   idx: usize,
                   kind: ChannelKind,
                   channel: usize,
                   lap: Option<usize>)
                   -> Result<i32>;

  /// Fetches `count` samples as `(timestamps, values)`.
  fn samples(&self,
             idx: usize,
             kind: ChannelKind,
             channel: usize,
             lap: Option<usize>,
             count: usize)
             -> Result<(Vec<f64>, Vec<f64>)>;
}

// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Jonas Reitemeyer <alumni@bmc-labs.com>
//   Florian Eich <florian@bmc-labs.com>

use crate::util;
use getset::CopyGetters;
use serde::Serialize;
use std::slice;


/// Start of a lap within the session and its duration, both in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct LapInfo {
  start:    f64,
  duration: f64,
}

impl LapInfo {
  pub fn new(start: f64, duration: f64) -> Self {
    Self { start, duration }
  }

  /// Builds a `LapInfo` from the values the decoder reports, rounded to the
  /// crate's precision.
  pub fn from_raw(start: f64, duration: f64) -> Self {
    Self::new(util::round(start), util::round(duration))
  }

  pub fn end(&self) -> f64 {
    self.start + self.duration
  }
}


/// The laps of a session in order, indexed from 0.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LapTable {
  laps: Vec<LapInfo>,
}

impl LapTable {
  pub fn new(laps: Vec<LapInfo>) -> Self {
    Self { laps }
  }

  pub fn get(&self, lap: usize) -> Option<LapInfo> {
    self.laps.get(lap).copied()
  }

  pub fn len(&self) -> usize {
    self.laps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.laps.is_empty()
  }

  pub fn iter(&self) -> slice::Iter<'_, LapInfo> {
    self.laps.iter()
  }

  /// Index of the fastest lap. On equal durations the earlier lap wins.
  pub fn best(&self) -> Option<usize> {
    let mut best = None;
    for (idx, lap) in self.laps.iter().enumerate() {
      match best {
        None => best = Some((idx, lap.duration())),
        Some((_, duration)) if lap.duration() < duration => {
          best = Some((idx, lap.duration()))
        }
        Some(_) => {}
      }
    }
    best.map(|(idx, _)| idx)
  }
}

impl<'a> IntoIterator for &'a LapTable {
  type IntoIter = slice::Iter<'a, LapInfo>;
  type Item = &'a LapInfo;

  fn into_iter(self) -> Self::IntoIter {
    self.laps.iter()
  }
}

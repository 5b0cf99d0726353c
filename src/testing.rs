// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

//! In-memory stand-in for the AiM library.

use crate::decoder::{ChannelKind, Decoder};
use chrono::{NaiveDate, NaiveDateTime};
use eyre::{ensure, eyre, Result};
use std::{path::Path,
          sync::{atomic::{AtomicUsize, Ordering},
                 Arc}};


pub const FIXTURE_IDX: usize = 7;
pub const FIXTURE_PATH: &str = "./testdata/adria.xrk";


/// One channel of the fixture, timestamps in milliseconds since session
/// start, the way the library reports them for whole-session fetches.
#[derive(Clone, Debug)]
pub struct FixtureChannel {
  pub name:       String,
  pub unit:       String,
  pub timestamps: Vec<f64>,
  pub values:     Vec<f64>,
}

impl FixtureChannel {
  /// A channel sampled at `hz` from 0 up to and including `until` seconds.
  pub fn sampled(name: &str,
                 unit: &str,
                 hz: usize,
                 until: f64,
                 f: impl Fn(f64) -> f64)
                 -> Self {
    let period_ms = 1_000.0 / hz as f64;
    let n = (until * hz as f64).floor() as usize;
    let timestamps = (0..=n).map(|i| i as f64 * period_ms).collect::<Vec<_>>();
    let values = timestamps.iter().map(|&t| f(t / 1_000.0)).collect();

    Self { name: name.to_string(),
           unit: unit.to_string(),
           timestamps,
           values }
  }
}


/// `Decoder` over fixture arrays. Lap-scoped fetches return the samples
/// within `[start, start + duration]` with timestamps in seconds, like the
/// library does.
#[derive(Debug)]
pub struct FixtureDecoder {
  laps:             Vec<(f64, f64)>,
  regular:          Vec<FixtureChannel>,
  gps:              Vec<FixtureChannel>,
  gps_raw:          Vec<FixtureChannel>,
  forced_count:     Option<i32>,
  truncated_values: bool,
  closed:           Arc<AtomicUsize>,
}

impl FixtureDecoder {
  pub fn empty() -> Self {
    Self { laps:             Vec::new(),
           regular:          Vec::new(),
           gps:              Vec::new(),
           gps_raw:          Vec::new(),
           forced_count:     None,
           truncated_values: false,
           closed:           Arc::new(AtomicUsize::new(0)), }
  }

  /// A kart session of three laps (60.0 s, 58.5 s and 59.25 s) with channels
  /// of all three kinds at different rates.
  pub fn kart() -> Self {
    let until = 177.75;
    Self::empty()
      .with_laps(vec![(0.0, 60.0), (60.0, 58.5), (118.5, 59.25)])
      .with_channel(ChannelKind::Regular,
                    FixtureChannel::sampled("AccelerometerX", "g", 20, until, |t| {
                      (t / 3.0).sin() * 1.2
                    }))
      .with_channel(ChannelKind::Regular,
                    FixtureChannel::sampled("Water Temp", "C", 1, until, |t| {
                      60.0 + t / 10.0
                    }))
      .with_channel(ChannelKind::Gps,
                    FixtureChannel::sampled("GPS Speed", "m/s", 10, until, |t| {
                      20.0 + (t / 5.0).sin() * 5.0
                    }))
      .with_channel(ChannelKind::Gps,
                    FixtureChannel::sampled("GPS Nsat", "#", 10, until, |_| {
                      9.0
                    }))
      .with_channel(ChannelKind::GpsRaw,
                    FixtureChannel::sampled("ECEF position_X",
                                            "m",
                                            1,
                                            until,
                                            |t| 4_400_000.0 + t))
  }

  pub fn with_laps(mut self, laps: Vec<(f64, f64)>) -> Self {
    self.laps = laps;
    self
  }

  pub fn with_channel(mut self,
                      kind: ChannelKind,
                      channel: FixtureChannel)
                      -> Self {
    match kind {
      ChannelKind::Regular => self.regular.push(channel),
      ChannelKind::Gps => self.gps.push(channel),
      ChannelKind::GpsRaw => self.gps_raw.push(channel),
    }
    self
  }

  /// Makes every sample count query report `count`.
  pub fn with_forced_count(mut self, count: i32) -> Self {
    self.forced_count = Some(count);
    self
  }

  /// Makes every fetch return one value less than timestamps.
  pub fn with_truncated_values(mut self) -> Self {
    self.truncated_values = true;
    self
  }

  /// Counter of `close` calls, shared with the decoder.
  pub fn closed(&self) -> Arc<AtomicUsize> {
    self.closed.clone()
  }

  fn family(&self, kind: ChannelKind) -> &[FixtureChannel] {
    match kind {
      ChannelKind::Regular => &self.regular,
      ChannelKind::Gps => &self.gps,
      ChannelKind::GpsRaw => &self.gps_raw,
    }
  }

  fn channel(&self,
             idx: usize,
             kind: ChannelKind,
             channel: usize)
             -> Result<&FixtureChannel> {
    ensure!(idx == FIXTURE_IDX, "unknown file index {}", idx);
    self.family(kind)
        .get(channel)
        .ok_or_else(|| eyre!("no {} channel {}", kind, channel))
  }

  fn window(&self,
            idx: usize,
            kind: ChannelKind,
            channel: usize,
            lap: Option<usize>)
            -> Result<(Vec<f64>, Vec<f64>)> {
    let channel = self.channel(idx, kind, channel)?;
    let lap = match lap {
      Some(lap) => lap,
      None => return Ok((channel.timestamps.clone(), channel.values.clone())),
    };

    let (start, duration) = self.lap_info(idx, lap)?;
    Ok(channel.timestamps
              .iter()
              .map(|&t| t / 1_000.0)
              .zip(channel.values.iter().copied())
              .filter(|&(t, _)| t >= start && t <= start + duration)
              .unzip())
  }
}

impl Decoder for FixtureDecoder {
  fn open(&self, path: &Path) -> Result<usize> {
    ensure!(path.extension().unwrap_or_default() == "xrk",
            "only fixture .xrk files accepted ({})",
            path.display());
    Ok(FIXTURE_IDX)
  }

  fn close(&self, idx: usize) -> Result<bool> {
    self.closed.fetch_add(1, Ordering::SeqCst);
    Ok(idx == FIXTURE_IDX)
  }

  fn vehicle(&self, _idx: usize) -> Result<String> {
    Ok(String::new())
  }

  fn track(&self, _idx: usize) -> Result<String> {
    Ok("Adria Kart".to_string())
  }

  fn racer(&self, _idx: usize) -> Result<String> {
    Ok("A.GIARDELLI".to_string())
  }

  fn championship(&self, _idx: usize) -> Result<String> {
    Ok(String::new())
  }

  fn venue_type(&self, _idx: usize) -> Result<String> {
    Ok(String::new())
  }

  fn datetime(&self, _idx: usize) -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2015, 12, 23)
      .and_then(|date| date.and_hms_opt(12, 9, 4))
      .ok_or_else(|| eyre!("invalid fixture datetime"))
  }

  fn laps_count(&self, _idx: usize) -> Result<i32> {
    Ok(self.laps.len() as i32)
  }

  fn lap_info(&self, _idx: usize, lap: usize) -> Result<(f64, f64)> {
    self.laps
        .get(lap)
        .copied()
        .ok_or_else(|| eyre!("could not fetch info of lap {}", lap))
  }

  fn channels_count(&self, _idx: usize, kind: ChannelKind) -> Result<i32> {
    Ok(self.family(kind).len() as i32)
  }

  fn channel_name(&self,
                  idx: usize,
                  kind: ChannelKind,
                  channel: usize)
                  -> Result<String> {
    Ok(self.channel(idx, kind, channel)?.name.clone())
  }

  fn channel_units(&self,
                   idx: usize,
                   kind: ChannelKind,
                   channel: usize)
                   -> Result<String> {
    Ok(self.channel(idx, kind, channel)?.unit.clone())
  }

  fn samples_count(&self,
                   idx: usize,
                   kind: ChannelKind,
                   channel: usize,
                   lap: Option<usize>)
                   -> Result<i32> {
    if let Some(count) = self.forced_count {
      return Ok(count);
    }
    Ok(self.window(idx, kind, channel, lap)?.0.len() as i32)
  }

  fn samples(&self,
             idx: usize,
             kind: ChannelKind,
             channel: usize,
             lap: Option<usize>,
             count: usize)
             -> Result<(Vec<f64>, Vec<f64>)> {
    let (mut timestamps, mut values) = self.window(idx, kind, channel, lap)?;
    timestamps.truncate(count);
    values.truncate(count);
    if self.truncated_values {
      values.pop();
    }
    Ok((timestamps, values))
  }
}

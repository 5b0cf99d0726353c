// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use crate::{decoder::{ChannelKind, Decoder},
            util,
            Channel,
            ChannelData,
            Channels,
            LapInfo,
            LapTable,
            SessionConfig,
            TimeDistance,
            Window};
use chrono::NaiveDateTime;
use eyre::{eyre, Result};
use getset::{CopyGetters, Getters};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};


/// Descriptive information recorded with a session.
#[derive(Clone, Debug, PartialEq, CopyGetters, Getters)]
pub struct Metadata {
  #[getset(get = "pub")]
  vehicle:      String,
  #[getset(get = "pub")]
  track:        String,
  #[getset(get = "pub")]
  racer:        String,
  #[getset(get = "pub")]
  championship: String,
  #[getset(get = "pub")]
  venue_type:   String,
  #[getset(get_copy = "pub")]
  datetime:     NaiveDateTime,
}


/// One open session file.
///
/// Lap table, channel map, metadata and the time/distance index are built on
/// first access and kept for the lifetime of the `Session`; each is built at
/// most once even with concurrent callers. The file is closed by `close` or,
/// failing that, when the `Session` is dropped.
#[derive(Debug, CopyGetters, Getters)]
pub struct Session<D: Decoder> {
  decoder:       D,
  #[getset(get = "pub")]
  path:          PathBuf,
  #[getset(get_copy = "pub")]
  idx:           usize,
  #[getset(get = "pub")]
  config:        SessionConfig,
  metadata:      OnceCell<Metadata>,
  laps:          OnceCell<LapTable>,
  channels:      OnceCell<Channels>,
  time_distance: OnceCell<TimeDistance>,
  is_open:       bool,
}

// DESTRUCTOR - CLOSES FILE ------------------------------------------------ //
impl<D: Decoder> Drop for Session<D> {
  fn drop(&mut self) {
    if !self.is_open {
      return;
    }
    match self.decoder.close(self.idx) {
      Ok(true) => debug!(path = %self.path.display(), "closed session on drop"),
      Ok(false) => warn!(path = %self.path.display(),
                         "decoder failed to close session"),
      Err(err) => warn!(path = %self.path.display(),
                        "error closing session: {}",
                        err),
    }
  }
}

impl<D: Decoder> Session<D> {
  // FILE OPENING / CLOSING FUNCTIONS -------------------------------------- //
  /// Opens the session at `path` through `decoder` with the default
  /// `SessionConfig`.
  pub fn open(decoder: D, path: &Path) -> Result<Self> {
    Self::open_with(decoder, path, SessionConfig::default())
  }

  pub fn open_with(decoder: D,
                   path: &Path,
                   config: SessionConfig)
                   -> Result<Self> {
    let idx = decoder.open(path)?;
    debug!(path = %path.display(), idx, "opened session");

    Ok(Self { decoder,
              path: path.to_owned(),
              idx,
              config,
              metadata: OnceCell::new(),
              laps: OnceCell::new(),
              channels: OnceCell::new(),
              time_distance: OnceCell::new(),
              is_open: true })
  }

  pub(crate) fn decoder(&self) -> &D {
    &self.decoder
  }

  /// Closes the session, returning whether the decoder reported success.
  pub fn close(mut self) -> Result<bool> {
    self.is_open = false;
    let closed = self.decoder.close(self.idx)?;
    debug!(path = %self.path.display(), closed, "closed session");
    Ok(closed)
  }

  // RUN LEVEL FUNCTIONS --------------------------------------------------- //
  pub fn metadata(&self) -> Result<&Metadata> {
    self.metadata.get_or_try_init(|| self.read_metadata())
  }

  fn read_metadata(&self) -> Result<Metadata> {
    let decoder = &self.decoder;
    let metadata = Metadata { vehicle:      decoder.vehicle(self.idx)?,
                              track:        decoder.track(self.idx)?,
                              racer:        decoder.racer(self.idx)?,
                              championship: decoder.championship(self.idx)?,
                              venue_type:   decoder.venue_type(self.idx)?,
                              datetime:     decoder.datetime(self.idx)?, };
    debug!(track = metadata.track.as_str(), "read metadata");
    Ok(metadata)
  }

  // LAP FUNCTIONS --------------------------------------------------------- //
  /// All laps of the session, start and duration rounded.
  pub fn laps(&self) -> Result<&LapTable> {
    self.laps.get_or_try_init(|| self.read_laps())
  }

  fn read_laps(&self) -> Result<LapTable> {
    let count = self.decoder.laps_count(self.idx)?;
    ensure_consistent!(count >= 0, "lap count is {}", count);

    let mut laps = Vec::with_capacity(count as usize);
    for lap in 0..count as usize {
      let (start, duration) = self.decoder.lap_info(self.idx, lap)?;
      laps.push(LapInfo::from_raw(start, duration));
    }
    debug!(laps = laps.len(), "built lap table");
    Ok(LapTable::new(laps))
  }

  pub fn lap_count(&self) -> Result<usize> {
    Ok(self.laps()?.len())
  }

  /// For lap with index `lap`, the `LapInfo`. Fails if the session has no
  /// such lap.
  pub fn lap_info(&self, lap: usize) -> Result<LapInfo> {
    let laps = self.laps()?;
    laps.get(lap).ok_or_else(|| {
                   eyre!("lap_idx {} out of range ({} laps)", lap, laps.len())
                 })
  }

  /// Index of the fastest lap, `None` if the session has no laps.
  pub fn best_lap(&self) -> Result<Option<usize>> {
    Ok(self.laps()?.best())
  }

  /// Distance in m covered during lap `lap`, according to the time/distance
  /// index.
  pub fn lap_distance(&self, lap: usize) -> Result<f64> {
    let info = self.lap_info(lap)?;
    let index = self.time_distance()?;
    Ok(util::round(index.time_to_distance(info.end())
                   - index.time_to_distance(info.start())))
  }

  // CHANNEL FUNCTIONS ----------------------------------------------------- //
  /// All channels, regular ones first, then GPS and (if configured) raw GPS
  /// channels.
  pub fn channels(&self) -> Result<&Channels> {
    self.channels.get_or_try_init(|| self.read_channels())
  }

  fn read_channels(&self) -> Result<Channels> {
    let mut channels = Channels::default();
    for &kind in ChannelKind::ALL.iter() {
      if kind == ChannelKind::GpsRaw && !self.config.gps_raw_channels() {
        continue;
      }

      let count = self.decoder.channels_count(self.idx, kind)?;
      ensure_consistent!(count >= 0, "{} channel count is {}", kind, count);
      for channel_idx in 0..count as usize {
        let name = self.decoder.channel_name(self.idx, kind, channel_idx)?;
        let unit = self.decoder.channel_units(self.idx, kind, channel_idx)?;
        channels.insert(Channel::new(name, unit, kind, channel_idx))?;
      }
    }
    debug!(channels = channels.len(), "enumerated channels");
    Ok(channels)
  }

  pub fn channel_names(&self) -> Result<&[String]> {
    Ok(self.channels()?.names())
  }

  pub fn channel(&self, name: &str) -> Result<&Channel> {
    self.channels()?.get(name)
  }

  /// Samples of channel `name` within `window`.
  pub fn samples(&self, name: &str, window: Window) -> Result<ChannelData> {
    window.extract(self, self.channel(name)?)
  }

  // TIME / DISTANCE FUNCTIONS --------------------------------------------- //
  /// The time/distance index, integrated from the configured reference
  /// channel on first use.
  pub fn time_distance(&self) -> Result<&TimeDistance> {
    self.time_distance.get_or_try_init(|| {
                        // must stay in absolute time, a distance window would
                        // need this very index
                        let window = Window::whole_session().in_time().absolute();
                        let speed =
                          self.samples(self.config.reference_channel(), window)?;
                        TimeDistance::integrate(&speed)
                      })
  }

  /// Absolute time (s) to absolute distance (m).
  pub fn time_to_distance(&self, time: f64) -> Result<f64> {
    Ok(self.time_distance()?.time_to_distance(time))
  }

  /// Absolute distance (m) to absolute time (s).
  pub fn distance_to_time(&self, distance: f64) -> Result<f64> {
    Ok(self.time_distance()?.distance_to_time(distance))
  }
}

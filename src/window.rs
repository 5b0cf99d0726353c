// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use crate::{decoder::Decoder, util, Channel, ChannelData, Session};
use eyre::Result;
use getset::CopyGetters;
use tracing::trace;


/// Selects which part of a channel to fetch and how to lay out its x-axis.
///
/// The default is the whole session with distance (m) on the x-axis.
/// Lap-relative coordinates only apply to lap windows, whole-session windows
/// are always absolute.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Window {
  /// Lap to restrict the window to, `None` for the whole session.
  lap:        Option<usize>,
  /// Time (s) instead of distance (m) on the x-axis.
  x_in_time:  bool,
  /// Measure x from session start instead of lap start.
  x_absolute: bool,
}

impl Window {
  pub fn new(lap: Option<usize>, x_in_time: bool, x_absolute: bool) -> Self {
    Self { lap,
           x_in_time,
           x_absolute }
  }

  pub fn whole_session() -> Self {
    Self::default()
  }

  pub fn for_lap(lap: usize) -> Self {
    Self { lap: Some(lap),
           ..Self::default() }
  }

  pub fn in_time(mut self) -> Self {
    self.x_in_time = true;
    self
  }

  pub fn in_distance(mut self) -> Self {
    self.x_in_time = false;
    self
  }

  pub fn absolute(mut self) -> Self {
    self.x_absolute = true;
    self
  }

  pub fn relative(mut self) -> Self {
    self.x_absolute = false;
    self
  }

  /// Fetches `channel` from the session's decoder and converts its x-axis as
  /// requested.
  ///
  /// The decoder reports whole-session timestamps in milliseconds but
  /// lap-scoped ones in seconds; both end up in seconds, rounded. Distances
  /// are looked up per sample in the session's time/distance index, which is
  /// never consulted for time-domain windows.
  pub(crate) fn extract<D: Decoder>(&self,
                                    session: &Session<D>,
                                    channel: &Channel)
                                    -> Result<ChannelData> {
    trace!(channel = channel.name().as_str(),
           lap = ?self.lap,
           x_in_time = self.x_in_time,
           x_absolute = self.x_absolute,
           "fetching samples");

    // range check before bothering the decoder
    let lap_info = match self.lap {
      Some(lap) => Some(session.lap_info(lap)?),
      None => None,
    };

    let decoder = session.decoder();
    let count = decoder.samples_count(session.idx(),
                                      channel.kind(),
                                      channel.idx(),
                                      self.lap)?;
    ensure_consistent!(count > 0,
                       "sample count of channel '{}' is {}",
                       channel.name(),
                       count);
    let count = count as usize;

    let (timestamps, samples) = decoder.samples(session.idx(),
                                                channel.kind(),
                                                channel.idx(),
                                                self.lap,
                                                count)?;
    ensure_consistent!(timestamps.len() == count && samples.len() == count,
                       "requested {} samples of channel '{}', got {} \
                        timestamps and {} samples",
                       count,
                       channel.name(),
                       timestamps.len(),
                       samples.len());

    let mut x = match self.lap {
      None => timestamps.into_iter()
                        .map(|ms| util::round(ms / 1_000.0))
                        .collect::<Vec<_>>(),
      Some(_) => timestamps.into_iter().map(util::round).collect(),
    };

    if !self.x_in_time {
      let index = session.time_distance()?;
      for value in x.iter_mut() {
        *value = index.time_to_distance(*value);
      }
    }

    if let (Some(lap_info), false) = (lap_info, self.x_absolute) {
      let start = if self.x_in_time {
        lap_info.start()
      } else {
        session.time_distance()?.time_to_distance(lap_info.start())
      };
      for value in x.iter_mut() {
        *value -= start;
      }
    }

    ChannelData::new(x, samples)
  }
}

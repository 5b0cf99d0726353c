// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use crate::decoder::ChannelKind;
use eyre::{bail, eyre, Result};
use getset::{CopyGetters, Getters};
use std::{collections::HashMap, iter, vec};


const FREQUENCIES: [usize; 10] = [1, 2, 5, 10, 20, 50, 100, 200, 500, 1000];


/// A named channel of a session. Does not hold any samples, those are
/// fetched from the decoder on every request.
#[derive(Clone, Debug, PartialEq, CopyGetters, Getters)]
pub struct Channel {
  #[getset(get = "pub")]
  name: String,
  #[getset(get = "pub")]
  unit: String,
  /// Which family of decoder entry points backs this channel.
  #[getset(get_copy = "pub")]
  kind: ChannelKind,
  /// Index of the channel within its family.
  #[getset(get_copy = "pub")]
  idx:  usize,
}

impl Channel {
  pub fn new(name: String, unit: String, kind: ChannelKind, idx: usize) -> Self {
    Self { name,
           unit,
           kind,
           idx }
  }
}


/// All channels of a session, keyed by name. Names are unique, iteration
/// follows the order in which the decoder enumerated them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Channels {
  order:   Vec<String>,
  by_name: HashMap<String, Channel>,
}

impl Channels {
  /// Adds a channel. A second channel under an existing name is an error,
  /// the map is left untouched in that case.
  pub fn insert(&mut self, channel: Channel) -> Result<()> {
    if self.by_name.contains_key(channel.name()) {
      bail!("channel name collision: '{}'", channel.name());
    }
    self.order.push(channel.name().clone());
    self.by_name.insert(channel.name().clone(), channel);
    Ok(())
  }

  pub fn get(&self, name: &str) -> Result<&Channel> {
    self.by_name
        .get(name)
        .ok_or_else(|| eyre!("no channel '{}' found", name))
  }

  pub fn contains(&self, name: &str) -> bool {
    self.by_name.contains_key(name)
  }

  pub fn names(&self) -> &[String] {
    &self.order
  }

  pub fn iter(&self) -> impl Iterator<Item = &Channel> {
    self.order.iter().filter_map(move |name| self.by_name.get(name))
  }

  pub fn len(&self) -> usize {
    self.order.len()
  }

  pub fn is_empty(&self) -> bool {
    self.order.is_empty()
  }
}


/// A window of channel data: x-values (seconds or meters, ascending) and the
/// corresponding samples. Both sequences always have the same length.
#[derive(Clone, Debug, Default, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct ChannelData {
  x: Vec<f64>,
  y: Vec<f64>,
}

impl ChannelData {
  /// Pairs up `x` and `y`, which must have the same length.
  pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
    ensure_consistent!(x.len() == y.len(),
                       "{} x-values but {} samples",
                       x.len(),
                       y.len());
    Ok(Self { x, y })
  }

  pub fn len(&self) -> usize {
    self.x.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0usize
  }

  pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
    (self.x, self.y)
  }

  /// Recording frequency in Hz of time-domain data, snapped to the rates AiM
  /// loggers record at. Returns `0.0` if it can't be determined.
  pub fn frequency(&self) -> f64 {
    if self.len() < 3 {
      return 0.0;
    }

    // three samples span two periods
    let span = self.x[2] - self.x[0];
    if span <= 0.0 {
      return 0.0;
    }
    let raw_frequency = (2.0 / span).round() as i64;

    FREQUENCIES.iter()
               .min_by_key(|&&frequency| (raw_frequency - frequency as i64).abs())
               .map_or(0.0, |&frequency| frequency as f64)
  }
}

impl IntoIterator for ChannelData {
  type IntoIter = iter::Zip<vec::IntoIter<f64>, vec::IntoIter<f64>>;
  type Item = (f64, f64);

  fn into_iter(self) -> Self::IntoIter {
    self.x.into_iter().zip(self.y.into_iter())
  }
}

// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use getset::{CopyGetters, Getters};
use serde::Deserialize;


/// Channel integrated into the time/distance index unless configured
/// otherwise.
pub const DEFAULT_REFERENCE_CHANNEL: &str = "GPS Speed";


/// Knobs for opening a `Session`. Deserializable, every field is optional.
#[derive(Clone, Debug, Deserialize, PartialEq, CopyGetters, Getters)]
#[serde(default)]
pub struct SessionConfig {
  /// Speed channel (m/s) integrated into the time/distance index.
  #[getset(get = "pub")]
  reference_channel: String,
  /// Whether the raw GPS channels (ECEF position, velocity, ...) are
  /// enumerated alongside the regular and GPS channels.
  #[getset(get_copy = "pub")]
  gps_raw_channels:  bool,
}

impl Default for SessionConfig {
  fn default() -> Self {
    Self { reference_channel: DEFAULT_REFERENCE_CHANNEL.to_string(),
           gps_raw_channels:  true, }
  }
}

impl SessionConfig {
  pub fn with_reference_channel(mut self, name: &str) -> Self {
    self.reference_channel = name.to_string();
    self
  }

  pub fn with_gps_raw_channels(mut self, enabled: bool) -> Self {
    self.gps_raw_channels = enabled;
    self
  }
}

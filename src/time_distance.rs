// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use crate::{util, ChannelData};
use eyre::Result;
use getset::Getters;
use tracing::{debug, warn};


/// Correlation between absolute session time (s) and cumulative distance
/// travelled (m), sampled at the timestamps of the reference speed channel.
#[derive(Clone, Debug, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct TimeDistance {
  times:     Vec<f64>,
  distances: Vec<f64>,
}

impl TimeDistance {
  /// Integrates a speed channel (absolute time in seconds, speed in m/s) into
  /// cumulative distance.
  ///
  /// Each interval is credited with the speed sampled at its *end*:
  ///
  ///   d_0 = 0
  ///   d_i = d_(i - 1) + (t_i - t_(i - 1)) * v_i
  ///
  /// Negative speeds are taken as they come, which makes the distance locally
  /// decrease.
  pub fn integrate(speed: &ChannelData) -> Result<Self> {
    let (t, v) = (speed.x(), speed.y());
    ensure_consistent!(t.len() == v.len(),
                       "reference channel has {} timestamps but {} speeds",
                       t.len(),
                       v.len());
    ensure_consistent!(!t.is_empty(), "reference channel has no samples");

    let mut distances = Vec::with_capacity(t.len());
    distances.push(0.0);
    let mut distance = 0.0;
    for i in 1..t.len() {
      distance += (t[i] - t[i - 1]) * v[i];
      distances.push(distance);
    }

    let reversing = v.iter().filter(|&&speed| speed < 0.0).count();
    if reversing > 0 {
      warn!(samples = reversing,
            "reference channel contains negative speeds, distance is not \
             monotonic");
    }
    debug!(samples = t.len(),
           distance,
           "built time/distance index");

    Ok(Self { times: t.clone(),
              distances })
  }

  pub fn len(&self) -> usize {
    self.times.len()
  }

  pub fn is_empty(&self) -> bool {
    self.times.is_empty()
  }

  /// Total distance covered in the session.
  pub fn total_distance(&self) -> f64 {
    self.distances.last().copied().unwrap_or_default()
  }

  /// Absolute time (s) to absolute distance (m).
  pub fn time_to_distance(&self, time: f64) -> f64 {
    lookup(time, &self.times, &self.distances)
  }

  /// Absolute distance (m) to absolute time (s).
  pub fn distance_to_time(&self, distance: f64) -> f64 {
    lookup(distance, &self.distances, &self.times)
  }
}


/// Finds `needle` in the ascending `haystack` and returns the corresponding
/// value of `codomain`, which is index-aligned with `haystack`.
///
/// - past the end of `haystack`, the last value of `codomain` is returned,
/// - on an exact hit, the codomain value is returned untouched, so that
///   converting back and forth between exact samples is lossless,
/// - otherwise the value is interpolated from the first sample at or above
///   `needle` and the one following it, and rounded. A zero-width pair snaps
///   to the following sample.
pub fn lookup(needle: f64, haystack: &[f64], codomain: &[f64]) -> f64 {
  let last = codomain.last().copied().unwrap_or_default();

  // leftmost index with haystack[idx] >= needle
  let idx = haystack.partition_point(|&value| value < needle);
  if idx >= haystack.len() {
    return last;
  }
  if haystack[idx] == needle {
    return codomain[idx];
  }
  // the pair would reach past the last sample
  if idx + 1 >= haystack.len() {
    return last;
  }

  let width = haystack[idx + 1] - haystack[idx];
  let ratio = if width == 0.0 {
    1.0
  } else {
    (needle - haystack[idx]) / width
  };
  util::round(codomain[idx] + (codomain[idx + 1] - codomain[idx]) * ratio)
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::Inconsistency;
  use pretty_assertions::assert_eq;


  fn speed(t: Vec<f64>, v: Vec<f64>) -> ChannelData {
    ChannelData::new(t, v).unwrap()
  }

  #[test]
  fn integrate_test() {
    let td = TimeDistance::integrate(&speed(vec![0.0, 1.0, 2.0, 4.0],
                                            vec![5.0, 10.0, 20.0, 30.0]))
      .unwrap();

    // every interval uses the speed at its end, not the mean
    assert_eq!(&vec![0.0, 1.0, 2.0, 4.0], td.times());
    assert_eq!(&vec![0.0, 10.0, 30.0, 90.0], td.distances());
    assert_eq!(4, td.len());
    assert_eq!(90.0, td.total_distance());
  }

  #[test]
  fn integrate_single_sample_test() {
    let td = TimeDistance::integrate(&speed(vec![3.0], vec![12.0])).unwrap();
    assert_eq!(&vec![0.0], td.distances());
    assert_eq!(0.0, td.time_to_distance(3.0));
    assert_eq!(0.0, td.time_to_distance(10.0));
  }

  #[test]
  fn integrate_empty_test() {
    let report = TimeDistance::integrate(&ChannelData::default()).unwrap_err();
    assert!(report.downcast_ref::<Inconsistency>().is_some());
  }

  #[test]
  fn integrate_negative_speed_test() {
    let td = TimeDistance::integrate(&speed(vec![0.0, 1.0, 2.0, 3.0],
                                            vec![1.0, 2.0, -1.0, 2.0]))
      .unwrap();
    assert_eq!(&vec![0.0, 2.0, 1.0, 3.0], td.distances());
  }

  #[test]
  fn monotonic_test() {
    let t = (0..500).map(|i| util::round(i as f64 * 0.1)).collect::<Vec<_>>();
    let v = (0..500).map(|i| (i % 37) as f64 * 1.5).collect::<Vec<_>>();
    let td = TimeDistance::integrate(&speed(t, v)).unwrap();

    assert!(td.distances().windows(2).all(|pair| pair[0] <= pair[1]));
  }

  #[test]
  fn lookup_test() {
    let haystack = [0.0, 1.0, 2.0, 4.0];
    let codomain = [0.0, 10.0, 20.0, 30.0];

    // exact hits
    assert_eq!(0.0, lookup(0.0, &haystack, &codomain));
    assert_eq!(20.0, lookup(2.0, &haystack, &codomain));
    assert_eq!(30.0, lookup(4.0, &haystack, &codomain));

    // past the end clamps
    assert_eq!(30.0, lookup(4.5, &haystack, &codomain));
    assert_eq!(30.0, lookup(1e9, &haystack, &codomain));

    // in between, interpolated off the first sample at or above the needle
    // and its successor
    assert_eq!(17.5, lookup(1.5, &haystack, &codomain));
    assert_eq!(5.0, lookup(0.5, &haystack, &codomain));

    // in the last gap there is no successor, the last sample is used
    assert_eq!(30.0, lookup(3.0, &haystack, &codomain));

    // below the start
    assert_eq!(-10.0, lookup(-1.0, &haystack, &codomain));
  }

  #[test]
  fn lookup_zero_width_test() {
    let haystack = [0.0, 2.0, 2.0, 3.0];
    let codomain = [0.0, 10.0, 20.0, 30.0];

    assert_eq!(20.0, lookup(1.0, &haystack, &codomain));
    assert_eq!(10.0, lookup(2.0, &haystack, &codomain));
  }

  #[test]
  fn lookup_rounds_test() {
    let haystack = [0.0, 3.0, 6.0, 9.0];
    let codomain = [0.0, 1.0, 2.0, 3.0];

    assert_eq!(0.6667, lookup(2.0, &haystack, &codomain));
    assert_eq!(1.6667, lookup(5.0, &haystack, &codomain));
  }

  #[test]
  fn round_trip_test() {
    let t = (0..=200).map(|i| util::round(i as f64 * 0.1))
                     .collect::<Vec<_>>();
    let v = (0..=200).map(|i| 20.0 + (i as f64 / 10.0).sin() * 5.0)
                     .collect::<Vec<_>>();
    let td = TimeDistance::integrate(&speed(t.clone(), v)).unwrap();

    for time in t {
      assert_eq!(time, td.distance_to_time(td.time_to_distance(time)));
    }
    assert_eq!(0.0, td.distance_to_time(td.time_to_distance(0.0)));
  }
}

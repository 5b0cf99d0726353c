// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

//! Reads AiM XRK/DRK session files and relates session time to distance
//! travelled, so that channels can be fetched for the whole session or a
//! single lap with either time (s) or distance (m) on the x-axis.
//!
//! ```ignore
//! use xrk_timedist::{AimDecoder, Session, Window};
//!
//! let session = Session::open(AimDecoder::new(), Path::new("./run.xrk"))?;
//! let best = session.best_lap()?.unwrap_or_default();
//! let speed = session.samples("GPS Speed", Window::for_lap(best))?;
//! ```

#[macro_use]
mod error;

mod channel;
mod config;
mod decoder;
mod lap;
mod session;
mod time_distance;
mod util;
mod window;

#[cfg(test)]
mod testing;

pub use channel::{Channel, ChannelData, Channels};
pub use config::{SessionConfig, DEFAULT_REFERENCE_CHANNEL};
#[cfg(feature = "aim")]
pub use decoder::AimDecoder;
pub use decoder::{ChannelKind, Decoder};
pub use error::Inconsistency;
pub use lap::{LapInfo, LapTable};
pub use session::{Metadata, Session};
pub use time_distance::{lookup, TimeDistance};
pub use util::{round, PRECISION};
pub use window::Window;

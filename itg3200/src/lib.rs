//! Driver for the ITG-3200 3-axis gyroscope.
//!
//! ```ignore
//! let mut gyro = Itg3200::new(i2c, embassy_time::Delay, Config::default())?;
//! if let Err(e) = gyro.init().await {
//!     // Not fatal, the device may already be configured.
//! }
//! gyro.calibrate().await?;
//! let reading = gyro.values().await?;
//! ```
#![cfg_attr(not(test), no_std)]

mod fmt; // must be first, the other modules use its macros

pub mod calibration;
pub mod config;
pub mod error;
pub mod itg3200;
pub mod measurement;
pub mod raw_sample;
pub mod registers;
pub mod shared;

// Re-export the public API things
// This avoids having to do itg3200::itg3200::Itg3200, etc
pub use calibration::{Calibration, CalibrationOffset, Step};
pub use config::{sample_rate_divisor, Clamp, Config, Divisor, LowPassFilter};
pub use error::{ConfigError, Error};
pub use itg3200::Itg3200;
pub use measurement::{Measurement, Reading};
pub use raw_sample::{decode_axis, RawSample};
pub use shared::SharedItg3200;

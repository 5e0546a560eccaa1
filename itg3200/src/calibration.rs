//! Zero-rate bias estimation.
//!
//! The device must be at rest while calibrating. Every sample is then
//! assumed to read the true rate of zero, so the negated mean of the
//! samples is the offset that cancels the bias on later reads.

use crate::measurement::Measurement;

/// Samples averaged by one calibration run.
pub const CALIBRATION_SAMPLES: u8 = 5;
/// Time between calibration samples, independent of the configured rate.
pub const CALIBRATION_INTERVAL_MS: u32 = 50;

/// Per-axis bias correction in degrees per second, added to every rate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationOffset {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl CalibrationOffset {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

/// Outcome of feeding one sample to a [`Calibration`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Sampling { remaining: u8 },
    Done(CalibrationOffset),
}

/// Calibration state machine, driven by one [`Calibration::tick`] per
/// sample from whatever schedules the reads.
///
/// Samples must be decoded with [`CalibrationOffset::ZERO`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    state: State,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum State {
    #[default]
    Idle,
    Sampling {
        ticks: u8,
        sum: [f32; 3],
    },
    Done(CalibrationOffset),
}

impl Calibration {
    pub const fn new() -> Self {
        Self { state: State::Idle }
    }

    pub fn tick(&mut self, sample: &Measurement) -> Step {
        let (ticks, sum) = match self.state {
            State::Done(offset) => return Step::Done(offset),
            State::Idle => (0, [0.0; 3]),
            State::Sampling { ticks, sum } => (ticks, sum),
        };

        let ticks = ticks + 1;
        let sum = [sum[0] + sample.x, sum[1] + sample.y, sum[2] + sample.z];
        trace!("Calibration tick {=u8}/{=u8}", ticks, CALIBRATION_SAMPLES);

        if ticks < CALIBRATION_SAMPLES {
            self.state = State::Sampling { ticks, sum };
            return Step::Sampling {
                remaining: CALIBRATION_SAMPLES - ticks,
            };
        }

        let n = f32::from(CALIBRATION_SAMPLES);
        let offset = CalibrationOffset {
            x: -(sum[0] / n),
            y: -(sum[1] / n),
            z: -(sum[2] / n),
        };
        self.state = State::Done(offset);
        Step::Done(offset)
    }

    pub fn is_sampling(&self) -> bool {
        matches!(self.state, State::Sampling { .. })
    }

    pub fn offset(&self) -> Option<CalibrationOffset> {
        match self.state {
            State::Done(offset) => Some(offset),
            _ => None,
        }
    }
}

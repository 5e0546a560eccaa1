use crate::calibration::CalibrationOffset;

/// One decoded sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Degrees Celsius
    pub temperature: f32,
    /// Degrees per second
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A measurement tagged with whether a calibration offset was applied.
///
/// `Uncalibrated` readings were decoded with a zero offset because the
/// driver has not been calibrated yet. The angular rates still carry the
/// sensor's zero-rate bias.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    Calibrated(Measurement),
    Uncalibrated(Measurement),
}

impl Reading {
    pub(crate) fn new(measurement: Measurement, offset: Option<CalibrationOffset>) -> Self {
        match offset {
            Some(_) => Reading::Calibrated(measurement),
            None => Reading::Uncalibrated(measurement),
        }
    }

    pub fn measurement(&self) -> &Measurement {
        match self {
            Reading::Calibrated(m) | Reading::Uncalibrated(m) => m,
        }
    }

    pub fn is_calibrated(&self) -> bool {
        matches!(self, Reading::Calibrated(_))
    }
}

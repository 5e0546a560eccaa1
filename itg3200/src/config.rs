use crate::error::ConfigError;
use crate::registers::dlpf_fs;

/// Internal sample clock with the 256 Hz low pass filter.
pub const INTERNAL_SAMPLE_HZ: u32 = 8_000;
/// Internal sample clock with every other low pass filter setting.
pub const INTERNAL_SAMPLE_HZ_FILTERED: u32 = 1_000;

pub const DEFAULT_SAMPLE_RATE_MS: u32 = 100;

/// DLPF_CFG field of the DLPF_FS register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LowPassFilter {
    #[default]
    Hz256 = 0,
    Hz188 = 1,
    Hz98 = 2,
    Hz42 = 3,
    Hz20 = 4,
    Hz10 = 5,
    Hz5 = 6,
}

impl LowPassFilter {
    /// The clock the sample rate divider counts down from.
    pub const fn internal_sample_hz(self) -> u32 {
        match self {
            LowPassFilter::Hz256 => INTERNAL_SAMPLE_HZ,
            _ => INTERNAL_SAMPLE_HZ_FILTERED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Output sample period in milliseconds, must be positive.
    pub sample_rate_ms: u32,
    pub filter: LowPassFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate_ms: DEFAULT_SAMPLE_RATE_MS,
            filter: LowPassFilter::default(),
        }
    }
}

impl Config {
    pub fn with_sample_rate_ms(sample_rate_ms: u32) -> Self {
        Self {
            sample_rate_ms,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate_ms == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        Ok(())
    }

    /// Value for the SMPLRT_DIV register.
    pub fn divisor(&self) -> Divisor {
        sample_rate_divisor_at(self.sample_rate_ms, self.filter.internal_sample_hz())
    }

    /// Value for the DLPF_FS register.
    pub fn dlpf_fs(&self) -> u8 {
        dlpf_fs(self.filter as u8)
    }
}

/// Why a requested sample rate could not be represented exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Clamp {
    /// Requested period is shorter than one internal clock tick.
    TooFine,
    /// Requested period needs a divisor above 255.
    TooCoarse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Divisor {
    pub value: u8,
    pub clamp: Option<Clamp>,
}

/// SMPLRT_DIV for a sample period against the 8 kHz internal clock.
///
/// `floor(8000 * ms / 1000 - 1)`, clamped into `0..=255`.
pub fn sample_rate_divisor(sample_rate_ms: u32) -> Divisor {
    sample_rate_divisor_at(sample_rate_ms, INTERNAL_SAMPLE_HZ)
}

/// SMPLRT_DIV for a sample period against an arbitrary internal clock.
pub fn sample_rate_divisor_at(sample_rate_ms: u32, internal_hz: u32) -> Divisor {
    let ticks = u64::from(internal_hz) * u64::from(sample_rate_ms) / 1000;
    match ticks.checked_sub(1) {
        None => {
            warn!(
                "Sample rate of {=u32}ms is finer than the hardware supports, using divisor 0",
                sample_rate_ms
            );
            Divisor {
                value: 0,
                clamp: Some(Clamp::TooFine),
            }
        }
        Some(divisor) => match u8::try_from(divisor) {
            Ok(value) => Divisor { value, clamp: None },
            Err(_) => {
                debug!(
                    "Sample rate of {=u32}ms clamped to the coarsest divisor",
                    sample_rate_ms
                );
                Divisor {
                    value: u8::MAX,
                    clamp: Some(Clamp::TooCoarse),
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divisor_clamps_to_coarsest() {
        let one_second = sample_rate_divisor(1000);
        assert_eq!(one_second.value, 255);
        assert_eq!(one_second.clamp, Some(Clamp::TooCoarse));

        let default = sample_rate_divisor(100);
        assert_eq!(default.value, 255);
        assert_eq!(default.clamp, Some(Clamp::TooCoarse));
    }

    #[test]
    fn divisor_zero_period_is_too_fine() {
        let d = sample_rate_divisor(0);
        assert_eq!(d.value, 0);
        assert_eq!(d.clamp, Some(Clamp::TooFine));
    }

    #[test]
    fn divisor_in_range() {
        // 8 kHz / (7 + 1) = 1 kHz
        assert_eq!(
            sample_rate_divisor(1),
            Divisor {
                value: 7,
                clamp: None
            }
        );
        // 8000 * 32 / 1000 - 1 = 255 exactly
        assert_eq!(
            sample_rate_divisor(32),
            Divisor {
                value: 255,
                clamp: None
            }
        );
        assert_eq!(sample_rate_divisor(33).clamp, Some(Clamp::TooCoarse));
    }

    #[test]
    fn filtered_clock_divides_from_1khz() {
        assert_eq!(sample_rate_divisor_at(10, INTERNAL_SAMPLE_HZ_FILTERED).value, 9);
        let config = Config {
            sample_rate_ms: 100,
            filter: LowPassFilter::Hz42,
        };
        assert_eq!(config.divisor().value, 99);
        assert_eq!(config.dlpf_fs(), 0x1B);
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.sample_rate_ms, 100);
        assert_eq!(config.dlpf_fs(), 0x18);
        assert!(config.validate().is_ok());
        assert_eq!(
            Config::with_sample_rate_ms(0).validate(),
            Err(ConfigError::ZeroSampleRate)
        );
    }
}

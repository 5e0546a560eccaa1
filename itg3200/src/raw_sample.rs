use crate::calibration::CalibrationOffset;
use crate::measurement::Measurement;
use crate::registers::SAMPLE_LEN;

/// LSB per degree/second at full scale range +-2000 deg/s.
pub const GYRO_SENSITIVITY: f32 = 14.375;
/// LSB per degree Celsius.
pub const TEMP_SENSITIVITY: f32 = 280.0;
/// Datasheet point of -13200 LSB at 35 degrees Celsius. [`decode_axis`] only
/// keeps 12 bits of a negative reading, so typical die temperatures decode
/// well above ambient (0xCC70 reads about 78.9, 0xC180 about 68.9).
pub const TEMP_OFFSET: f32 = 35.0 + 13200.0 / TEMP_SENSITIVITY;

/// Top of the 12-bit range used by the negative branch of [`decode_axis`].
pub const FULL_RANGE_12BIT: i32 = 0x0FFF;

/// Decode one register pair into a physical value.
///
/// A high byte above 15 marks a negative reading. Its upper nibble is
/// dropped and the remaining 12 bits are taken as a distance below
/// [`FULL_RANGE_12BIT`], so `0x0FFF` reads as zero and `0x000` as -4095.
/// Otherwise the pair is an unsigned magnitude, high byte first.
pub fn decode_axis(low: u8, high: u8, offset: f32, sensitivity: f32) -> f32 {
    let value = if high > 15 {
        let combined = i32::from(low) | (i32::from(high & 0x0F) << 8);
        combined - FULL_RANGE_12BIT
    } else {
        i32::from(low) | (i32::from(high) << 8)
    };
    offset + value as f32 / sensitivity
}

/// Burst read of TEMP_OUT_H..GYRO_ZOUT_L, high byte first per channel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RawSample(pub [u8; SAMPLE_LEN]);

impl RawSample {
    pub fn decode(&self, offset: &CalibrationOffset) -> Measurement {
        let [t_h, t_l, x_h, x_l, y_h, y_l, z_h, z_l] = self.0;
        Measurement {
            temperature: decode_axis(t_l, t_h, TEMP_OFFSET, TEMP_SENSITIVITY),
            x: decode_axis(x_l, x_h, offset.x, GYRO_SENSITIVITY),
            y: decode_axis(y_l, y_h, offset.y, GYRO_SENSITIVITY),
            z: decode_axis(z_l, z_h, offset.z, GYRO_SENSITIVITY),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RawSample {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{:#x}", self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_range_is_plain_big_endian() {
        for high in 0..=15u8 {
            for low in [0x00, 0x01, 0x7F, 0x80, 0xFE, 0xFF] {
                let expected = 1.5 + (f32::from(low) + f32::from(high) * 256.0) / GYRO_SENSITIVITY;
                assert_eq!(decode_axis(low, high, 1.5, GYRO_SENSITIVITY), expected);
            }
        }
    }

    #[test]
    fn negative_range_counts_down_from_twelve_bits() {
        // (low, high, raw counts)
        let vectors = [
            (0xFF, 0xFF, 0),
            (0xFE, 0xFF, -1),
            (0x9B, 0xFF, -100),
            (0x00, 0xF0, -4095),
            (0x00, 0x10, -4095),
            (0x70, 0xCC, -911),
        ];
        for (low, high, counts) in vectors {
            assert_eq!(decode_axis(low, high, 0.0, 1.0), counts as f32);
        }
    }

    #[test]
    fn boundary_between_ranges() {
        assert_eq!(decode_axis(0xFF, 0x0F, 0.0, 1.0), 4095.0);
        assert_eq!(decode_axis(0xFF, 0x10, 0.0, 1.0), -3840.0);
    }

    #[test]
    fn decode_applies_offset_to_rates_only() {
        // x = 115 counts = 8 deg/s exactly
        let raw = RawSample([0x00, 0x00, 0x00, 0x73, 0x00, 0x73, 0x00, 0x73]);
        let offset = CalibrationOffset {
            x: -8.0,
            y: -7.0,
            z: 0.0,
        };
        let m = raw.decode(&offset);
        assert_eq!(m.x, 0.0);
        assert_eq!(m.y, 1.0);
        assert_eq!(m.z, 8.0);
        assert_eq!(m.temperature, TEMP_OFFSET);
    }

    #[test]
    fn temperature_datasheet_points_stay_in_twelve_bit_range() {
        let at_35c = RawSample([0xCC, 0x70, 0, 0, 0, 0, 0, 0]).decode(&CalibrationOffset::ZERO);
        assert_eq!(at_35c.temperature, TEMP_OFFSET - 911.0 / TEMP_SENSITIVITY);
        assert!((at_35c.temperature - 78.89).abs() < 0.01);

        let room = RawSample([0xC1, 0x80, 0, 0, 0, 0, 0, 0]).decode(&CalibrationOffset::ZERO);
        assert_eq!(room.temperature, TEMP_OFFSET - 3711.0 / TEMP_SENSITIVITY);
        assert!((room.temperature - 68.89).abs() < 0.01);
    }

    #[test]
    fn temperature_uses_fixed_scale() {
        // 280 counts is one degree above the fixed offset
        let raw = RawSample([0x01, 0x18, 0, 0, 0, 0, 0, 0]);
        let m = raw.decode(&CalibrationOffset::ZERO);
        assert!((m.temperature - (TEMP_OFFSET + 1.0)).abs() < 1e-4);
    }
}

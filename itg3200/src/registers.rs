//! Register map of the ITG-3200.
//!
//! Only the registers needed to bring the device up and stream samples are
//! listed here.

// The LSB of the address byte is the R/W bit added by the I2C protocol.
// AD0 pulled low selects 0x68, pulled high 0x69.
pub const ITG3200_ADDRESS: u8 = 0x68;

pub const ITG3200_REGISTER_WHO_AM_I: u8 = 0x00;
pub const ITG3200_REGISTER_SMPLRT_DIV: u8 = 0x15;
pub const ITG3200_REGISTER_DLPF_FS: u8 = 0x16;
/// First of eight data registers: TEMP_OUT_H, TEMP_OUT_L, GYRO_XOUT_H, ...
pub const ITG3200_REGISTER_TEMP_OUT_H: u8 = 0x1B;
pub const ITG3200_REGISTER_PWR_MGM: u8 = 0x3E;

/// PWR_MGM bit 7, resets the device and all registers to their defaults.
pub const PWR_MGM_H_RESET: u8 = 0x80;

/// FS_SEL value for the +-2000 deg/s range, the only one the datasheet
/// allows for proper operation.
pub const DLPF_FS_SEL_2000DPS: u8 = 0x03;
pub const DLPF_FS_SEL_SHIFT: u8 = 3;

/// Bits 6..1 of WHO_AM_I hold the upper six bits of the device address.
pub const WHO_AM_I_MASK: u8 = 0x7E;

/// Number of bytes in one burst read from [`ITG3200_REGISTER_TEMP_OUT_H`].
pub const SAMPLE_LEN: usize = 8;

/// Compose the DLPF_FS register value from a DLPF_CFG field.
pub const fn dlpf_fs(dlpf_cfg: u8) -> u8 {
    (DLPF_FS_SEL_2000DPS << DLPF_FS_SEL_SHIFT) | (dlpf_cfg & 0x07)
}

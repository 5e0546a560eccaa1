use embedded_hal::i2c::Error as _;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::calibration::{
    Calibration, CalibrationOffset, Step, CALIBRATION_INTERVAL_MS, CALIBRATION_SAMPLES,
};
use crate::config::Config;
use crate::error::Error;
use crate::measurement::Reading;
use crate::raw_sample::RawSample;
use crate::registers::*;

/// ITG-3200 on an async I2C bus.
///
/// The driver owns the bus handle; share it between devices with a bus
/// manager that serializes access.
pub struct Itg3200<I, D> {
    i2c: I,
    delay: D,
    config: Config,
    offset: Option<CalibrationOffset>,
}

impl<I, D, E> Itg3200<I, D>
where
    I: I2c<Error = E>,
    E: embedded_hal::i2c::Error,
    D: DelayNs,
{
    /// Create a driver, the device is not touched until [`Self::init`].
    pub fn new(i2c: I, delay: D, config: Config) -> Result<Self, Error<E>> {
        config.validate()?;
        Ok(Self {
            i2c,
            delay,
            config,
            offset: None,
        })
    }

    /// Reset the device and program sample rate, filter and range.
    ///
    /// Stops at the first failed write and does not retry. The driver stays
    /// usable after a failure, the device may still be configured from an
    /// earlier run.
    pub async fn init(&mut self) -> Result<&mut Self, Error<E>> {
        let divisor = self.config.divisor();
        let dlpf_fs = self.config.dlpf_fs();
        let writes = [
            (ITG3200_REGISTER_PWR_MGM, PWR_MGM_H_RESET),
            (ITG3200_REGISTER_SMPLRT_DIV, divisor.value),
            (ITG3200_REGISTER_DLPF_FS, dlpf_fs),
        ];
        for (register, value) in writes {
            debug!("ITG-3200 write {=u8:#x} <- {=u8:#x}", register, value);
            if let Err(e) = self.write_register(register, value).await {
                if let Error::Bus(bus) = &e {
                    error!(
                        "ITG-3200 init failed writing {=u8:#x}: {:?}",
                        register,
                        bus.kind()
                    );
                }
                return Err(e);
            }
        }
        Ok(self)
    }

    pub async fn who_am_i(&mut self) -> Result<u8, Error<E>> {
        let mut data = [0u8; 1];
        self.i2c
            .write_read(ITG3200_ADDRESS, &[ITG3200_REGISTER_WHO_AM_I], &mut data)
            .await
            .map_err(Error::Bus)?;
        Ok(data[0])
    }

    /// Check WHO_AM_I against the device address. A mismatch is logged and
    /// reported as `false`, it is not an error.
    pub async fn verify_identity(&mut self) -> Result<bool, Error<E>> {
        let id = self.who_am_i().await?;
        let matches = (id & WHO_AM_I_MASK) == (ITG3200_ADDRESS & WHO_AM_I_MASK);
        if !matches {
            error!("ITG-3200 WHO_AM_I mismatch: {=u8:#x}", id);
        }
        Ok(matches)
    }

    pub async fn read_raw(&mut self) -> Result<RawSample, Error<E>> {
        let mut raw = RawSample::default();
        self.i2c
            .write_read(ITG3200_ADDRESS, &[ITG3200_REGISTER_TEMP_OUT_H], &mut raw.0)
            .await
            .map_err(Error::Bus)?;
        trace!("ITG-3200 raw {}", raw);
        Ok(raw)
    }

    /// Read and decode one sample.
    ///
    /// Before the first successful [`Self::calibrate`] the rates are decoded
    /// with a zero offset and returned as [`Reading::Uncalibrated`].
    pub async fn values(&mut self) -> Result<Reading, Error<E>> {
        let offset = match self.offset {
            Some(offset) => offset,
            None => {
                warn!("ITG-3200 not calibrated, reading with zero offset");
                CalibrationOffset::ZERO
            }
        };
        let raw = self.read_raw().await?;
        Ok(Reading::new(raw.decode(&offset), self.offset))
    }

    /// Estimate the zero-rate bias. The device has to be at rest.
    ///
    /// Takes [`CALIBRATION_SAMPLES`] samples [`CALIBRATION_INTERVAL_MS`]
    /// apart. On a failed read the run is abandoned and the previous
    /// calibration, if any, stays in place.
    pub async fn calibrate(&mut self) -> Result<CalibrationOffset, Error<E>> {
        info!(
            "Calibrating ITG-3200 over {=u8} samples, keep it still",
            CALIBRATION_SAMPLES
        );
        let mut calibration = Calibration::new();
        loop {
            self.delay.delay_ms(CALIBRATION_INTERVAL_MS).await;
            let raw = match self.read_raw().await {
                Ok(raw) => raw,
                Err(e) => {
                    error!("ITG-3200 calibration aborted by a failed read");
                    return Err(e);
                }
            };
            if let Step::Done(offset) = calibration.tick(&raw.decode(&CalibrationOffset::ZERO)) {
                info!("ITG-3200 calibrated: {}", offset);
                self.offset = Some(offset);
                return Ok(offset);
            }
        }
    }

    pub fn calibration(&self) -> Option<CalibrationOffset> {
        self.offset
    }

    /// Give back the bus and delay.
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }

    async fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<E>> {
        self.i2c
            .write(ITG3200_ADDRESS, &[register, value])
            .await
            .map_err(Error::Bus)
    }
}

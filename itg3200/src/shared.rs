use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::calibration::CalibrationOffset;
use crate::error::Error;
use crate::itg3200::Itg3200;
use crate::measurement::Reading;

/// An [`Itg3200`] shared between tasks.
///
/// Reads and calibrations queue up behind whatever holds the device. Only a
/// second calibration started while one is running is refused with
/// [`Error::Busy`], so two calibrations never interleave their samples.
pub struct SharedItg3200<M: RawMutex, I, D> {
    inner: Mutex<M, Itg3200<I, D>>,
    calibrating: Mutex<M, ()>,
}

impl<M, I, D, E> SharedItg3200<M, I, D>
where
    M: RawMutex,
    I: I2c<Error = E>,
    E: embedded_hal::i2c::Error,
    D: DelayNs,
{
    pub const fn new(driver: Itg3200<I, D>) -> Self {
        Self {
            inner: Mutex::new(driver),
            calibrating: Mutex::new(()),
        }
    }

    pub async fn values(&self) -> Result<Reading, Error<E>> {
        self.inner.lock().await.values().await
    }

    pub async fn calibrate(&self) -> Result<CalibrationOffset, Error<E>> {
        let _calibrating = self.calibrating.try_lock().map_err(|_| {
            warn!("ITG-3200 calibration already running");
            Error::Busy
        })?;
        self.inner.lock().await.calibrate().await
    }

    pub async fn calibration(&self) -> Option<CalibrationOffset> {
        self.inner.lock().await.calibration()
    }
}

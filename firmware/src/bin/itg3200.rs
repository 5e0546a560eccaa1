//! Stream readings from an ITG-3200 gyroscope on I2C3, press the user button
//! to calibrate.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Pull;
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::mode::Async;
use embassy_stm32::time::Hertz;
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_time::{Delay, Duration, Ticker};
use itg3200::{Config, Itg3200, Reading, SharedItg3200};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    I2C3_EV => i2c::EventInterruptHandler<peripherals::I2C3>;
    I2C3_ER => i2c::ErrorInterruptHandler<peripherals::I2C3>;
});

type Gyro = SharedItg3200<ThreadModeRawMutex, I2c<'static, Async>, Delay>;

static GYRO: StaticCell<Gyro> = StaticCell::new();

#[embassy_executor::task]
async fn poll(gyro: &'static Gyro, period: Duration) {
    let mut ticker = Ticker::every(period);
    loop {
        match gyro.values().await {
            Ok(Reading::Calibrated(m)) => {
                info!("{}C x {} y {} z {} deg/s", m.temperature, m.x, m.y, m.z)
            }
            Ok(Reading::Uncalibrated(m)) => {
                info!(
                    "{}C x {} y {} z {} deg/s (uncalibrated)",
                    m.temperature, m.x, m.y, m.z
                )
            }
            Err(e) => error!("ITG-3200 read failed: {}", e),
        }
        ticker.next().await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Hello ITG-3200!");
    let p = embassy_stm32::init(Default::default());

    let mut button = ExtiInput::new(p.PA0, p.EXTI0, Pull::Down);

    let i2c = I2c::new(
        p.I2C3,
        p.PA8,
        p.PC9,
        Irqs,
        p.DMA1_CH4,
        p.DMA1_CH2,
        Hertz(400_000),
        Default::default(),
    );

    let config = Config::default();
    let mut gyro = match Itg3200::new(i2c, Delay, config) {
        Ok(gyro) => gyro,
        Err(e) => {
            error!("Invalid ITG-3200 configuration: {}", e);
            return;
        }
    };

    match gyro.verify_identity().await {
        Ok(true) => debug!("ITG-3200 found"),
        Ok(false) => warn!("Unexpected WHO_AM_I, continuing anyway"),
        Err(e) => error!("WHO_AM_I read failed: {}", e),
    }
    // The device may still be configured from before a reset of the MCU.
    if let Err(e) = gyro.init().await {
        warn!("ITG-3200 init failed, continuing: {}", e);
    }

    let gyro = GYRO.init(SharedItg3200::new(gyro));
    let period = Duration::from_millis(config.sample_rate_ms.into());
    unwrap!(spawner.spawn(poll(gyro, period)));

    loop {
        button.wait_for_rising_edge().await;
        match gyro.calibrate().await {
            Ok(offset) => info!("Calibration offset: {}", offset),
            Err(e) => error!("Calibration failed: {}", e),
        }
    }
}

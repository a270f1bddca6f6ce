use embassy_time::{Duration, Instant, Ticker};
use encoder::{Direction, PulseCounter};
use esp_println::println;
use hal::{
    gpio::{GpioPin, Output, PushPull},
    prelude::_embedded_hal_digital_v2_OutputPin,
};

const MEASUREMENT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug)]
pub struct SpeedReading {
    pub pulses: u32,
    pub direction: Direction,
    pub total_pulses: u64,
    pub time_ms: u64,
}

/// Closes one measurement interval per tick and reports the reading.
/// The LED is held high while the sensor is rotating.
#[embassy_executor::task]
pub async fn measurement_task(
    counter: &'static PulseCounter,
    mut motion_led: GpioPin<Output<PushPull>, 26>,
) {
    let mut ticker = Ticker::every(MEASUREMENT_INTERVAL);

    // Running total since boot, kept for field calibration.
    let mut total_pulses = 0u64;

    loop {
        ticker.next().await;

        let pulses = counter.reduce_interval();
        let direction = counter.direction();
        total_pulses = total_pulses.wrapping_add(u64::from(pulses));

        let reading = SpeedReading {
            pulses,
            direction,
            total_pulses,
            time_ms: Instant::now().as_millis(),
        };
        println!("{reading:?}");

        if direction == Direction::Stopped {
            motion_led.set_low().unwrap();
        } else {
            motion_led.set_high().unwrap();
        }
    }
}

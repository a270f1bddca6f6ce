use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use encoder::{EncoderInput, PulseCounter};
use hal::{
    gpio::{GpioPin, Unknown},
    prelude::_embedded_hal_async_digital_Wait,
};

pub fn start_encoder_task(
    spawner: &Spawner,
    counter: &'static PulseCounter,
    velocity_pin: GpioPin<Unknown, 15>,
    direction_pin: GpioPin<Unknown, 4>,
) {
    spawner
        .spawn(encoder_edge_task(counter, velocity_pin, direction_pin))
        .ok();
}

/// One task owns both phase pins, so at most one edge is classified at
/// a time.
#[embassy_executor::task]
async fn encoder_edge_task(
    counter: &'static PulseCounter,
    velocity_pin: GpioPin<Unknown, 15>,
    direction_pin: GpioPin<Unknown, 4>,
) {
    let mut input = EncoderInput::new(
        velocity_pin.into_pull_up_input(),
        direction_pin.into_pull_up_input(),
        counter,
    );

    loop {
        match select(
            input.velocity.wait_for_rising_edge(),
            input.direction.wait_for_rising_edge(),
        )
        .await
        {
            Either::First(r) => r.unwrap(),
            Either::Second(r) => r.unwrap(),
        }
        input.on_edge();
    }
}

#![no_std]
#![no_main]
#![feature(type_alias_impl_trait)]

mod encoder_input;
mod speed_report;

use embassy_executor::{Spawner, _export::StaticCell};
use encoder::PulseCounter;
use esp_backtrace as _;
use hal::{
    clock::ClockControl,
    embassy,
    gpio::IO,
    interrupt,
    peripherals::{self, Peripherals},
    prelude::*,
    timer::TimerGroup,
};

/// Shared between the edge-watch task and the measurement task.
static PULSE_COUNTER: PulseCounter = PulseCounter::new();

#[entry]
fn entry() -> ! {
    static EXECUTOR: StaticCell<embassy::executor::Executor> = StaticCell::new();
    let executor = EXECUTOR.init(embassy::executor::Executor::new());
    executor.run(|spawner| {
        spawner.spawn(main(spawner)).ok();
    });
}

#[embassy_executor::task]
async fn main(spawner: Spawner) {
    let peripherals = Peripherals::take();

    let system = peripherals.DPORT.split();
    let clocks = ClockControl::boot_defaults(system.clock_control).freeze();
    let mut peripheral_clock_control = system.peripheral_clock_control;

    let timer_group0 = TimerGroup::new(peripherals.TIMG0, &clocks, &mut peripheral_clock_control);
    embassy::init(&clocks, timer_group0.timer0);

    let io = IO::new(peripherals.GPIO, peripherals.IO_MUX);

    // The async GPIO edge wakers run off the GPIO interrupt.
    interrupt::enable(peripherals::Interrupt::GPIO, interrupt::Priority::Priority1).unwrap();

    encoder_input::start_encoder_task(&spawner, &PULSE_COUNTER, io.pins.gpio15, io.pins.gpio4);

    spawner
        .spawn(speed_report::measurement_task(
            &PULSE_COUNTER,
            io.pins.gpio26.into_push_pull_output(),
        ))
        .ok();
}

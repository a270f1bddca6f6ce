//! Quadrature pulse counting for the rotation sensor, portable across
//! targets. The firmware wires the phase pins and the measurement
//! cadence; everything that touches the counts lives here.
#![cfg_attr(not(test), no_std)]

pub mod counter;
pub mod input;

pub use counter::{Direction, PulseCounter};
pub use input::EncoderInput;

use crate::counter::PulseCounter;
use embedded_hal::digital::v2::InputPin;

/// The two quadrature phase pins of the sensor, sampled together on
/// every rising edge of either one. The pins are public so the owning
/// task can await edges on them directly.
pub struct EncoderInput<'a, V, D>
where
    V: InputPin,
    D: InputPin,
{
    pub velocity: V,
    pub direction: D,
    counter: &'a PulseCounter,
}

impl<'a, V, D> EncoderInput<'a, V, D>
where
    V: InputPin,
    D: InputPin,
{
    pub fn new(velocity: V, direction: D, counter: &'a PulseCounter) -> Self {
        Self {
            velocity,
            direction,
            counter,
        }
    }

    /// Sample both phase levels and count the edge. A failed read is
    /// treated as an inconclusive edge and discarded; nothing
    /// propagates out of edge context.
    pub fn on_edge(&self) {
        let (Ok(velocity_high), Ok(direction_high)) =
            (self.velocity.is_high(), self.direction.is_high())
        else {
            return;
        };
        self.counter.record_edge(velocity_high, direction_high);
    }
}

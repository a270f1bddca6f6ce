use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};
use strum::FromRepr;

/// Direction of rotation resolved over one measurement interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromRepr)]
#[repr(u8)]
pub enum Direction {
    Stopped = 0,
    Forward,
    Backward,
}

/// Pulse accumulators shared between the edge-watch task and the task
/// that consumes one reading per measurement interval. Safe to keep in
/// a `static` and reference from both sides.
pub struct PulseCounter {
    forward: AtomicU32,
    backward: AtomicU32,
    pulses: AtomicU32,
    direction: AtomicU8,
}

impl PulseCounter {
    pub const fn new() -> Self {
        Self {
            forward: AtomicU32::new(0),
            backward: AtomicU32::new(0),
            pulses: AtomicU32::new(0),
            direction: AtomicU8::new(Direction::Stopped as u8),
        }
    }

    /// Count one rising edge from the sampled phase levels. A level
    /// pair matching neither rotation pattern counts nothing.
    pub fn record_edge(&self, velocity_high: bool, direction_high: bool) {
        match (velocity_high, direction_high) {
            (true, false) => {
                self.forward.fetch_add(1, Ordering::Release);
            }
            (false, true) => {
                self.backward.fetch_add(1, Ordering::Release);
            }
            _ => {}
        }
    }

    /// Close the current measurement interval: total the accumulators,
    /// resolve the direction, reset for the next interval and return
    /// the pulse total.
    ///
    /// Each accumulator is read and cleared in a single swap, so an
    /// edge arriving mid-reduction lands either in this interval or in
    /// the next one, never in neither.
    pub fn reduce_interval(&self) -> u32 {
        let forward = self.forward.swap(0, Ordering::Acquire);
        let backward = self.backward.swap(0, Ordering::Acquire);
        let total = forward.wrapping_add(backward);

        // Equal non-zero counts resolve to Backward; Forward requires
        // a strict majority.
        let direction = if backward < forward {
            Direction::Forward
        } else if total == 0 {
            Direction::Stopped
        } else {
            Direction::Backward
        };

        self.pulses.store(total, Ordering::Release);
        self.direction.store(direction as u8, Ordering::Release);
        total
    }

    /// Pulse total resolved by the most recent [`Self::reduce_interval`].
    pub fn pulses(&self) -> u32 {
        self.pulses.load(Ordering::Acquire)
    }

    /// Direction resolved by the most recent [`Self::reduce_interval`].
    ///
    /// The two resolved fields are separate atomics, so a read racing
    /// a reduction may pair the previous pulse total with the new
    /// direction. Stale, never torn.
    pub fn direction(&self) -> Direction {
        Direction::from_repr(self.direction.load(Ordering::Acquire)).unwrap_or(Direction::Stopped)
    }

    #[cfg(test)]
    fn raw_counts(&self) -> (u32, u32) {
        (
            self.forward.load(Ordering::Acquire),
            self.backward.load(Ordering::Acquire),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(counter: &PulseCounter, forward: u32, backward: u32) {
        for _ in 0..forward {
            counter.record_edge(true, false);
        }
        for _ in 0..backward {
            counter.record_edge(false, true);
        }
    }

    #[test]
    fn starts_at_zero_stopped() {
        let counter = PulseCounter::new();
        assert_eq!(counter.pulses(), 0);
        assert_eq!(counter.direction(), Direction::Stopped);
    }

    #[test]
    fn forward_majority() {
        let counter = PulseCounter::new();
        edges(&counter, 5, 2);
        assert_eq!(counter.reduce_interval(), 7);
        assert_eq!(counter.pulses(), 7);
        assert_eq!(counter.direction(), Direction::Forward);
    }

    #[test]
    fn backward_majority() {
        let counter = PulseCounter::new();
        edges(&counter, 1, 4);
        assert_eq!(counter.reduce_interval(), 5);
        assert_eq!(counter.direction(), Direction::Backward);
    }

    #[test]
    fn equal_counts_resolve_backward() {
        let counter = PulseCounter::new();
        edges(&counter, 3, 3);
        assert_eq!(counter.reduce_interval(), 6);
        assert_eq!(counter.direction(), Direction::Backward);
    }

    #[test]
    fn no_edges_resolve_stopped() {
        let counter = PulseCounter::new();
        assert_eq!(counter.reduce_interval(), 0);
        assert_eq!(counter.direction(), Direction::Stopped);
    }

    #[test]
    fn ambiguous_level_pairs_count_nothing() {
        let counter = PulseCounter::new();
        counter.record_edge(true, true);
        counter.record_edge(false, false);
        assert_eq!(counter.reduce_interval(), 0);
        assert_eq!(counter.direction(), Direction::Stopped);
    }

    #[test]
    fn reduction_resets_accumulators() {
        let counter = PulseCounter::new();
        edges(&counter, 2, 2);
        counter.reduce_interval();
        assert_eq!(counter.raw_counts(), (0, 0));
        assert_eq!(counter.reduce_interval(), 0);
        assert_eq!(counter.direction(), Direction::Stopped);
    }

    #[test]
    fn back_to_back_reductions_keep_intervals_separate() {
        let counter = PulseCounter::new();
        edges(&counter, 4, 0);
        assert_eq!(counter.reduce_interval(), 4);
        assert_eq!(counter.direction(), Direction::Forward);
        edges(&counter, 0, 1);
        assert_eq!(counter.reduce_interval(), 1);
        assert_eq!(counter.direction(), Direction::Backward);
    }

    #[test]
    fn concurrent_edges_are_never_lost() {
        use std::thread;

        const EDGES: u32 = 200_000;

        let counter = PulseCounter::new();
        let mut harvested = 0u64;

        thread::scope(|s| {
            let injector = s.spawn(|| {
                for i in 0..EDGES {
                    counter.record_edge(i % 2 == 0, i % 2 != 0);
                }
            });

            while !injector.is_finished() {
                harvested += u64::from(counter.reduce_interval());
                thread::yield_now();
            }
            injector.join().unwrap();
        });

        harvested += u64::from(counter.reduce_interval());
        assert_eq!(harvested, u64::from(EDGES));
    }
}

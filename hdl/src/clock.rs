use std::cell::{Cell, RefCell};

use tracing::{debug, trace};

/// Discrete-time broadcaster driving every sequential chip.
///
/// A clock holds non-owning callbacks; the chips themselves live in an arena
/// that outlives the clock (`'a`). Chips register during their own construction,
/// and registration order is the order in which they observe each tick. All
/// subscriptions must be made before the first [`Clock::tick`]; connecting from
/// inside a tick callback panics.
pub struct Clock<'a> {
    cycle: Cell<u64>,
    subscribers: RefCell<Vec<&'a dyn Fn()>>,
}

impl<'a> Clock<'a> {
    pub fn new() -> Self {
        Clock {
            cycle: Cell::new(0),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Appends a callback that runs once per tick, after every earlier subscriber.
    pub fn connect(&self, callback: &'a dyn Fn()) {
        let mut subscribers = self
            .subscribers
            .try_borrow_mut()
            .unwrap_or_else(|_| panic!("cannot connect to a clock while it is ticking"));
        subscribers.push(callback);
        debug!(subscriber = subscribers.len(), "clock subscriber connected");
    }

    /// Runs every subscriber once in registration order, then advances the cycle count.
    pub fn tick(&self) {
        let subscribers = self.subscribers.borrow();
        trace!(
            cycle = self.cycle.get(),
            subscribers = subscribers.len(),
            "clock tick"
        );
        for callback in subscribers.iter() {
            callback();
        }
        self.cycle.set(self.cycle.get() + 1);
    }

    /// Number of completed ticks.
    pub fn cycle(&self) -> u64 {
        self.cycle.get()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl Default for Clock<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use bumpalo::Bump;

    use super::Clock;

    #[test]
    fn clock_without_subscribers_still_counts_cycles() {
        let clock = Clock::new();
        assert_eq!(clock.cycle(), 0);
        clock.tick();
        assert_eq!(clock.cycle(), 1);
        clock.tick();
        assert_eq!(clock.cycle(), 2);
    }

    #[test]
    fn tick_calls_every_subscriber_once_in_registration_order() {
        let calls = RefCell::new(Vec::new());
        let alloc = Bump::new();
        let clock = Clock::new();
        for id in 0..3 {
            let calls = &calls;
            clock.connect(alloc.alloc(move || calls.borrow_mut().push(id)));
        }
        assert_eq!(clock.subscriber_count(), 3);
        assert!(calls.borrow().is_empty());

        clock.tick();
        assert_eq!(*calls.borrow(), vec![0, 1, 2]);
        assert_eq!(clock.cycle(), 1);

        clock.tick();
        assert_eq!(*calls.borrow(), vec![0, 1, 2, 0, 1, 2]);
        assert_eq!(clock.cycle(), 2);
    }

    #[test]
    fn each_clock_only_drives_its_own_subscribers() {
        let first_calls = Cell::new(0);
        let alloc = Bump::new();
        let first = Clock::new();
        let second = Clock::new();
        let counter = &first_calls;
        first.connect(alloc.alloc(move || counter.set(counter.get() + 1)));

        second.tick();
        assert_eq!(first_calls.get(), 0);
        first.tick();
        assert_eq!(first_calls.get(), 1);
    }

    #[test]
    #[should_panic(expected = "cannot connect to a clock while it is ticking")]
    fn connecting_during_a_tick_panics() {
        let alloc = Bump::new();
        let clock = Clock::new();
        let late: &dyn Fn() = alloc.alloc(|| {});
        let clock_ref = &clock;
        clock.connect(alloc.alloc(move || clock_ref.connect(late)));
        clock.tick();
    }
}

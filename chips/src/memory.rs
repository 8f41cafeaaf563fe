//! Clocked storage: the data flip-flop and the registers built on it.
//!
//! Every chip here is allocated in the arena it is constructed with and
//! subscribes to the clock as part of construction, so the order in which
//! chips are built is the order in which they latch on each tick.

use std::cell::Cell;

use bumpalo::Bump;
use hdl::{Bit, Clock, Word};

use crate::gates::mux;

/// Edge-triggered delay element: on each tick the output takes the value the
/// input held at that moment.
#[derive(Default)]
pub struct DataFlipFlop {
    input: Cell<Bit>,
    output: Cell<Bit>,
}

impl DataFlipFlop {
    pub fn new<'a>(alloc: &'a Bump, clock: &Clock<'a>) -> &'a Self {
        let dff: &'a DataFlipFlop = alloc.alloc(DataFlipFlop::default());
        clock.connect(alloc.alloc(move || dff.tick()));
        dff
    }

    pub fn set_input(&self, value: Bit) {
        self.input.set(value);
    }

    /// The value that will be latched on the next tick.
    pub fn input(&self) -> Bit {
        self.input.get()
    }

    pub fn output(&self) -> Bit {
        self.output.get()
    }

    fn tick(&self) {
        self.output.set(self.input.get());
    }
}

/// What a bit register's flip-flop latches: its own output while `load` is 0
/// (hold), the new `input` while `load` is 1.
pub fn next_input(output: Bit, input: Bit, load: Bit) -> Bit {
    mux(output, input, load)
}

/// One bit of storage with a load-gated write.
pub struct BitRegister {
    input: Cell<Bit>,
    load: Cell<Bit>,
    dff: DataFlipFlop,
}

impl BitRegister {
    pub fn new<'a>(alloc: &'a Bump, clock: &Clock<'a>) -> &'a Self {
        let register: &'a BitRegister = alloc.alloc(BitRegister {
            input: Cell::new(false),
            load: Cell::new(false),
            dff: DataFlipFlop::default(),
        });
        clock.connect(alloc.alloc(move || register.tick()));
        register
    }

    pub fn set_in(&self, value: Bit) {
        self.input.set(value);
    }

    pub fn set_load(&self, value: Bit) {
        self.load.set(value);
    }

    /// The committed value; unaffected by `set_in`/`set_load` until the next tick.
    pub fn get_out(&self) -> Bit {
        self.dff.output()
    }

    fn tick(&self) {
        self.dff.set_input(next_input(
            self.dff.output(),
            self.input.get(),
            self.load.get(),
        ));
        self.dff.tick();
    }
}

/// Sixteen independent bit registers sharing one load signal.
pub struct Register16<'a> {
    bits: [&'a BitRegister; 16],
}

impl<'a> Register16<'a> {
    pub fn new(alloc: &'a Bump, clock: &Clock<'a>) -> &'a Self {
        let bits = std::array::from_fn(|_| BitRegister::new(alloc, clock));
        alloc.alloc(Register16 { bits })
    }

    pub fn set_input(&self, input: Word) {
        for (bit, value) in self.bits.iter().zip(input) {
            bit.set_in(value);
        }
    }

    pub fn set_load(&self, value: Bit) {
        for bit in &self.bits {
            bit.set_load(value);
        }
    }

    pub fn get_out(&self) -> Word {
        self.bits.map(|bit| bit.get_out())
    }
}

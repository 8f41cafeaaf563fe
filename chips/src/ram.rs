//! Addressable memories: writes are clocked, reads are combinational and only
//! ever see committed values.

use std::cell::Cell;

use bumpalo::Bump;
use hdl::bus::{to_u16, to_unsigned};
use hdl::{Bit, Clock, HdlError, Word, FALSE16};
use tracing::{debug, trace, warn};

use crate::gates::{dmux8way, mux8way16};
use crate::memory::Register16;

/// The interface shared by every addressable memory.
///
/// Address buses are MSB first and exactly [`Memory::address_width`] bits wide.
pub trait Memory {
    /// Number of 16-bit slots.
    fn size(&self) -> usize;

    fn address_width(&self) -> usize {
        self.size().trailing_zeros() as usize
    }

    /// Latches the value written on the next tick while load is set.
    fn set_input_bus(&self, input: Word);

    /// Selects the slot for reads immediately and for writes on the next tick.
    fn set_address_bus(&self, address: &[Bit]) -> Result<(), HdlError>;

    fn set_load(&self, value: Bit);

    /// Contents of the addressed slot as of the last tick.
    fn get_output_bus(&self) -> Word;

    /// Drives all three inputs. The address is checked before anything is latched.
    fn set_inputs(&self, input: Word, address: &[Bit], load: Bit) -> Result<(), HdlError> {
        self.set_address_bus(address)?;
        self.set_input_bus(input);
        self.set_load(load);
        Ok(())
    }
}

fn check_width(address: &[Bit], expected: usize) -> Result<(), HdlError> {
    if address.len() == expected {
        Ok(())
    } else {
        Err(HdlError::BusWidth {
            expected,
            actual: address.len(),
        })
    }
}

/// A power-of-two number of 16-bit slots backed by arena storage.
pub struct Ram<'a> {
    slots: &'a [Cell<Word>],
    input: Cell<Word>,
    address: Cell<usize>,
    load: Cell<Bit>,
}

impl<'a> Ram<'a> {
    pub fn new(alloc: &'a Bump, clock: &Clock<'a>, size: usize) -> Result<&'a Self, HdlError> {
        if !size.is_power_of_two() {
            warn!(size, "memory size must be a non-zero power of two");
            return Err(HdlError::NonPowerOfTwoSize { size });
        }
        let slots = alloc.alloc_slice_fill_with(size, |_| Cell::new(FALSE16));
        let ram: &'a Ram<'a> = alloc.alloc(Ram {
            slots,
            input: Cell::new(FALSE16),
            address: Cell::new(0),
            load: Cell::new(false),
        });
        clock.connect(alloc.alloc(move || ram.tick()));
        debug!(size, address_width = ram.address_width(), "ram constructed");
        Ok(ram)
    }

    fn tick(&self) {
        if !self.load.get() {
            return;
        }
        let address = self.address.get();
        let value = self.input.get();
        self.slots[address].set(value);
        trace!(address, value = to_u16(&value), "ram write");
    }
}

impl Memory for Ram<'_> {
    fn size(&self) -> usize {
        self.slots.len()
    }

    fn set_input_bus(&self, input: Word) {
        self.input.set(input);
    }

    fn set_address_bus(&self, address: &[Bit]) -> Result<(), HdlError> {
        check_width(address, self.address_width())?;
        // at most address_width bits, so always a valid slot index
        self.address.set(to_unsigned(address) as usize);
        Ok(())
    }

    fn set_load(&self, value: Bit) {
        self.load.set(value);
    }

    fn get_output_bus(&self) -> Word {
        self.slots[self.address.get()].get()
    }
}

/// Eight words of memory wired purely from registers: `dmux8way` routes the
/// load signal and `mux8way16` selects the output.
pub struct Ram8<'a> {
    registers: [&'a Register16<'a>; 8],
    address: Cell<[Bit; 3]>,
    load: Cell<Bit>,
}

impl<'a> Ram8<'a> {
    pub fn new(alloc: &'a Bump, clock: &Clock<'a>) -> &'a Self {
        let registers = std::array::from_fn(|_| Register16::new(alloc, clock));
        debug!("ram8 constructed");
        alloc.alloc(Ram8 {
            registers,
            address: Cell::new([false; 3]),
            load: Cell::new(false),
        })
    }

    /// The address bus is MSB first; the selector trees take the low bit first.
    fn selector(&self) -> [Bit; 3] {
        let [high, mid, low] = self.address.get();
        [low, mid, high]
    }

    fn route_load(&self) {
        let loads = dmux8way(self.load.get(), self.selector());
        for (register, load) in self.registers.iter().zip(loads) {
            register.set_load(load);
        }
    }
}

impl Memory for Ram8<'_> {
    fn size(&self) -> usize {
        self.registers.len()
    }

    fn set_input_bus(&self, input: Word) {
        for register in &self.registers {
            register.set_input(input);
        }
    }

    fn set_address_bus(&self, address: &[Bit]) -> Result<(), HdlError> {
        let address: [Bit; 3] = address.try_into().map_err(|_| HdlError::BusWidth {
            expected: 3,
            actual: address.len(),
        })?;
        self.address.set(address);
        self.route_load();
        Ok(())
    }

    fn set_load(&self, value: Bit) {
        self.load.set(value);
        self.route_load();
    }

    fn get_output_bus(&self) -> Word {
        mux8way16(
            self.registers.map(|register| register.get_out()),
            self.selector(),
        )
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use hdl::bus::{from_u16, from_unsigned};
    use hdl::Clock;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn ram_sizes_must_be_powers_of_two() {
        let alloc = Bump::new();
        let clock = Clock::new();
        assert_eq!(
            Ram::new(&alloc, &clock, 3).err(),
            Some(HdlError::NonPowerOfTwoSize { size: 3 })
        );
        assert_eq!(
            Ram::new(&alloc, &clock, 0).err(),
            Some(HdlError::NonPowerOfTwoSize { size: 0 })
        );
        assert_eq!(clock.subscriber_count(), 0);

        let four = Ram::new(&alloc, &clock, 4).unwrap();
        assert_eq!(four.size(), 4);
        assert_eq!(four.address_width(), 2);
        let one = Ram::new(&alloc, &clock, 1).unwrap();
        assert_eq!(one.address_width(), 0);
        assert_eq!(clock.subscriber_count(), 2);
    }

    #[test]
    fn ram_stores_each_word_at_its_own_address() {
        let alloc = Bump::new();
        let clock = Clock::new();
        let ram = Ram::new(&alloc, &clock, 4).unwrap();
        let addresses = [[false, false], [false, true], [true, false], [true, true]];
        let expected = [1, 2, 3, 4].map(from_u16);

        ram.set_load(true);
        for (address, value) in addresses.iter().zip(expected) {
            ram.set_address_bus(address).unwrap();
            ram.set_input_bus(value);
            clock.tick();
        }

        ram.set_load(false);
        for (address, value) in addresses.iter().zip(expected) {
            ram.set_address_bus(address).unwrap();
            assert_eq!(ram.get_output_bus(), value, "address {address:?}");
        }
    }

    #[test]
    fn ram_reads_see_the_old_value_until_the_write_is_clocked() {
        let alloc = Bump::new();
        let clock = Clock::new();
        let ram = Ram::new(&alloc, &clock, 8).unwrap();
        ram.set_inputs(from_u16(42), &[true, false, true], true).unwrap();
        assert_eq!(ram.get_output_bus(), FALSE16);

        clock.tick();
        assert_eq!(ram.get_output_bus(), from_u16(42));

        ram.set_inputs(from_u16(7), &[true, false, true], false).unwrap();
        clock.tick();
        assert_eq!(ram.get_output_bus(), from_u16(42));
    }

    #[test]
    fn ram_rejects_address_buses_of_the_wrong_width() {
        let alloc = Bump::new();
        let clock = Clock::new();
        let ram = Ram::new(&alloc, &clock, 4).unwrap();
        assert_eq!(
            ram.set_address_bus(&[true, false, true]),
            Err(HdlError::BusWidth {
                expected: 2,
                actual: 3
            })
        );
        // nothing is latched when the address is rejected
        assert_eq!(
            ram.set_inputs(from_u16(9), &[true], true).err(),
            Some(HdlError::BusWidth {
                expected: 2,
                actual: 1
            })
        );
        clock.tick();
        assert_eq!(ram.get_output_bus(), FALSE16);
    }

    #[test]
    fn single_slot_ram_uses_an_empty_address_bus() {
        let alloc = Bump::new();
        let clock = Clock::new();
        let ram = Ram::new(&alloc, &clock, 1).unwrap();
        ram.set_inputs(from_u16(5), &[], true).unwrap();
        clock.tick();
        assert_eq!(ram.get_output_bus(), from_u16(5));
    }

    #[test]
    fn ram8_stores_each_word_at_its_own_address() {
        let alloc = Bump::new();
        let clock = Clock::new();
        let ram = Ram8::new(&alloc, &clock);
        assert_eq!(ram.size(), 8);
        assert_eq!(ram.address_width(), 3);

        for slot in 0..8u16 {
            let address = from_unsigned::<3>(u64::from(slot));
            ram.set_inputs(from_u16(100 + slot), &address, true).unwrap();
            clock.tick();
        }
        ram.set_load(false);
        for slot in 0..8u16 {
            let address = from_unsigned::<3>(u64::from(slot));
            ram.set_address_bus(&address).unwrap();
            assert_eq!(ram.get_output_bus(), from_u16(100 + slot), "slot {slot}");
        }
    }

    #[test]
    fn ram8_only_writes_the_addressed_register() {
        let alloc = Bump::new();
        let clock = Clock::new();
        let ram = Ram8::new(&alloc, &clock);
        ram.set_inputs(from_u16(0xABCD), &[false, true, true], true).unwrap();
        assert_eq!(ram.get_output_bus(), FALSE16);
        clock.tick();
        assert_eq!(ram.get_output_bus(), from_u16(0xABCD));

        ram.set_load(false);
        for slot in (0..8u64).filter(|slot| *slot != 3) {
            ram.set_address_bus(&from_unsigned::<3>(slot)).unwrap();
            assert_eq!(ram.get_output_bus(), FALSE16, "slot {slot}");
        }
        assert!(ram.set_address_bus(&[true, true]).is_err());
    }

    proptest! {
        #[test]
        fn ram_behaves_like_an_array_of_words(
            writes in prop::collection::vec((0..16u64, any::<u16>(), any::<bool>()), 1..64)
        ) {
            let alloc = Bump::new();
            let clock = Clock::new();
            let ram = Ram::new(&alloc, &clock, 16).unwrap();
            let mut model = [0u16; 16];
            for (slot, value, load) in writes {
                ram.set_inputs(from_u16(value), &from_unsigned::<4>(slot), load).unwrap();
                clock.tick();
                if load {
                    model[slot as usize] = value;
                }
                prop_assert_eq!(to_u16(&ram.get_output_bus()), model[slot as usize]);
            }
        }
    }
}

//! The chips of a 16-bit computer, built up from a single NAND primitive.
//!
//! Combinational chips are plain functions over `bool` buses. Sequential
//! chips are allocated in a [`bumpalo::Bump`] arena and subscribe to an
//! [`hdl::Clock`] when constructed.

pub mod alu;
pub mod arithmetic;
pub mod gates;
pub mod memory;
pub mod ram;

pub use alu::{alu16, AluCommand, AluControl, AluOutput};
pub use arithmetic::{adder, full_adder, half_adder, inc16, AdderOutput};
pub use memory::{BitRegister, DataFlipFlop, Register16};
pub use ram::{Memory, Ram, Ram8};

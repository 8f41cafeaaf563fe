//! Two's-complement adders built from the gate library. Overflow wraps silently.

use hdl::{Bit, Bus, Word, ONE16};
use hdl_macro::StructuredData;

use crate::gates::{and, or, xor};

#[derive(StructuredData, PartialEq, Eq, Debug, Clone, Copy)]
pub struct AdderOutput {
    pub carry: Bit,
    pub sum: Bit,
}

pub fn half_adder(a: Bit, b: Bit) -> AdderOutput {
    AdderOutput {
        carry: and(a, b),
        sum: xor(a, b),
    }
}

pub fn full_adder(a: Bit, b: Bit, c: Bit) -> AdderOutput {
    let first = half_adder(a, b);
    let second = half_adder(c, first.sum);
    AdderOutput {
        carry: or(first.carry, second.carry),
        sum: second.sum,
    }
}

/// Ripple-carry addition, least significant position (`N - 1`) first.
pub fn adder<const N: usize>(a: Bus<N>, b: Bus<N>) -> Bus<N> {
    let mut out = [false; N];
    let mut carry = false;
    for i in (0..N).rev() {
        let bit = full_adder(a[i], b[i], carry);
        out[i] = bit.sum;
        carry = bit.carry;
    }
    out
}

pub fn inc16(input: Word) -> Word {
    adder(input, ONE16)
}

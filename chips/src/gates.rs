//! Boolean gates. `nand` is the only primitive; everything else is wired from it.
//!
//! Selector buses (`sel`) of the multi-way chips are low-order first: `sel[0]`
//! picks within each pair, the last selector bit picks between the halves.

use hdl::{Bit, Word};

pub fn nand(a: Bit, b: Bit) -> Bit {
    !(a && b)
}

pub fn not(a: Bit) -> Bit {
    nand(a, a)
}

pub fn and(a: Bit, b: Bit) -> Bit {
    not(nand(a, b))
}

pub fn or(a: Bit, b: Bit) -> Bit {
    nand(not(a), not(b))
}

pub fn xor(a: Bit, b: Bit) -> Bit {
    and(or(a, b), nand(a, b))
}

/// `a` when `sel` is 0, `b` when `sel` is 1.
pub fn mux(a: Bit, b: Bit, sel: Bit) -> Bit {
    or(and(not(sel), a), and(sel, b))
}

/// `(in_, 0)` when `sel` is 0, `(0, in_)` when `sel` is 1.
pub fn dmux(in_: Bit, sel: Bit) -> (Bit, Bit) {
    (and(not(sel), in_), and(sel, in_))
}

pub fn dmux4way(in_: Bit, sel: [Bit; 2]) -> [Bit; 4] {
    let (low_pair, high_pair) = dmux(in_, sel[1]);
    let (a, b) = dmux(low_pair, sel[0]);
    let (c, d) = dmux(high_pair, sel[0]);
    [a, b, c, d]
}

pub fn dmux8way(in_: Bit, sel: [Bit; 3]) -> [Bit; 8] {
    let (low_half, high_half) = dmux(in_, sel[2]);
    let [a, b, c, d] = dmux4way(low_half, [sel[0], sel[1]]);
    let [e, f, g, h] = dmux4way(high_half, [sel[0], sel[1]]);
    [a, b, c, d, e, f, g, h]
}

fn zip<T1: Copy, T2: Copy, const N: usize>(in1: [T1; N], in2: [T2; N]) -> [(T1, T2); N] {
    std::array::from_fn(|i| (in1[i], in2[i]))
}

pub fn not16(input: Word) -> Word {
    input.map(not)
}

pub fn and16(in1: Word, in2: Word) -> Word {
    zip(in1, in2).map(|(a, b)| and(a, b))
}

pub fn or16(in1: Word, in2: Word) -> Word {
    zip(in1, in2).map(|(a, b)| or(a, b))
}

/// The whole of `a` when `sel` is 0, the whole of `b` when `sel` is 1.
pub fn mux16(a: Word, b: Word, sel: Bit) -> Word {
    zip(a, b).map(|(a, b)| mux(a, b, sel))
}

/// 1 if any input bit is 1.
pub fn or8way(input: [Bit; 8]) -> Bit {
    or(
        or(or(input[0], input[1]), or(input[2], input[3])),
        or(or(input[4], input[5]), or(input[6], input[7])),
    )
}

/// 1 only if every input bit is 1.
pub fn and8way(input: [Bit; 8]) -> Bit {
    and(
        and(and(input[0], input[1]), and(input[2], input[3])),
        and(and(input[4], input[5]), and(input[6], input[7])),
    )
}

/// `input[i]` where `i = sel[0] + 2 * sel[1]`.
pub fn mux4way(input: [Bit; 4], sel: [Bit; 2]) -> Bit {
    let low = mux(input[0], input[1], sel[0]);
    let high = mux(input[2], input[3], sel[0]);
    mux(low, high, sel[1])
}

/// `input[i]` where `i = sel[0] + 2 * sel[1] + 4 * sel[2]`.
pub fn mux8way(input: [Bit; 8], sel: [Bit; 3]) -> Bit {
    let low = mux4way([input[0], input[1], input[2], input[3]], [sel[0], sel[1]]);
    let high = mux4way([input[4], input[5], input[6], input[7]], [sel[0], sel[1]]);
    mux(low, high, sel[2])
}

pub fn mux4way16(input: [Word; 4], sel: [Bit; 2]) -> Word {
    let low = mux16(input[0], input[1], sel[0]);
    let high = mux16(input[2], input[3], sel[0]);
    mux16(low, high, sel[1])
}

pub fn mux8way16(input: [Word; 8], sel: [Bit; 3]) -> Word {
    let low = mux4way16([input[0], input[1], input[2], input[3]], [sel[0], sel[1]]);
    let high = mux4way16([input[4], input[5], input[6], input[7]], [sel[0], sel[1]]);
    mux16(low, high, sel[2])
}

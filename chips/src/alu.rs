use std::fmt;
use std::str::FromStr;

use hdl::{Bit, HdlError, StructuredData, Word, FALSE16};
use hdl_macro::StructuredData;

use crate::arithmetic::adder;
use crate::gates::{and16, mux16, not, not16, or, or8way};

/// The six ALU control bits, in the order they appear in an instruction.
#[derive(StructuredData, PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct AluControl {
    /// Zero the x input.
    pub zx: Bit,
    /// Negate the (possibly zeroed) x input.
    pub nx: Bit,
    pub zy: Bit,
    pub ny: Bit,
    /// 1 selects `x + y`, 0 selects `x & y`.
    pub f: Bit,
    /// Negate the selected result.
    pub no: Bit,
}

#[derive(StructuredData, PartialEq, Eq, Debug, Clone, Copy)]
pub struct AluOutput {
    pub out: [Bit; 16],
    /// Set when every bit of `out` is 0.
    pub zr: Bit,
    /// Set when `out` is negative, i.e. its most significant bit is 1.
    pub ng: Bit,
}

fn preset(input: Word, zero: Bit, negate: Bit) -> Word {
    let zeroed = mux16(input, FALSE16, zero);
    mux16(zeroed, not16(zeroed), negate)
}

/// 16-bit ALU. Combinational; the control bits alone decide the operation.
pub fn alu16(x: Word, y: Word, control: AluControl) -> AluOutput {
    let x = preset(x, control.zx, control.nx);
    let y = preset(y, control.zy, control.ny);

    let selected = mux16(and16(x, y), adder(x, y), control.f);
    let out = mux16(selected, not16(selected), control.no);

    let high = std::array::from_fn(|i| out[i]);
    let low = std::array::from_fn(|i| out[i + 8]);
    AluOutput {
        out,
        zr: not(or(or8way(high), or8way(low))),
        ng: out[0],
    }
}

/// The 18 operations reachable through the control bits.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum AluCommand {
    Zero,
    One,
    NegativeOne,
    X,
    Y,
    NotX,
    NotY,
    NegativeX,
    NegativeY,
    IncrementX,
    IncrementY,
    DecrementX,
    DecrementY,
    XPlusY,
    XMinusY,
    YMinusX,
    XAndY,
    XOrY,
}

// zx nx zy ny f no, indexed by command discriminant
const COMMAND_TABLE: [(&str, [u8; 6]); 18] = [
    ("0", [1, 0, 1, 0, 1, 0]),
    ("1", [1, 1, 1, 1, 1, 1]),
    ("-1", [1, 1, 1, 0, 1, 0]),
    ("X", [0, 0, 1, 1, 0, 0]),
    ("Y", [1, 1, 0, 0, 0, 0]),
    ("!X", [0, 0, 1, 1, 0, 1]),
    ("!Y", [1, 1, 0, 0, 0, 1]),
    ("-X", [0, 0, 1, 1, 1, 1]),
    ("-Y", [1, 1, 0, 0, 1, 1]),
    ("X+1", [0, 1, 1, 1, 1, 1]),
    ("Y+1", [1, 1, 0, 1, 1, 1]),
    ("X-1", [0, 0, 1, 1, 1, 0]),
    ("Y-1", [1, 1, 0, 0, 1, 0]),
    ("X+Y", [0, 0, 0, 0, 1, 0]),
    ("X-Y", [0, 1, 0, 0, 1, 1]),
    ("Y-X", [0, 0, 0, 1, 1, 1]),
    ("X&Y", [0, 0, 0, 0, 0, 0]),
    ("X|Y", [0, 1, 0, 1, 0, 1]),
];

impl AluCommand {
    pub const ALL: [AluCommand; 18] = [
        AluCommand::Zero,
        AluCommand::One,
        AluCommand::NegativeOne,
        AluCommand::X,
        AluCommand::Y,
        AluCommand::NotX,
        AluCommand::NotY,
        AluCommand::NegativeX,
        AluCommand::NegativeY,
        AluCommand::IncrementX,
        AluCommand::IncrementY,
        AluCommand::DecrementX,
        AluCommand::DecrementY,
        AluCommand::XPlusY,
        AluCommand::XMinusY,
        AluCommand::YMinusX,
        AluCommand::XAndY,
        AluCommand::XOrY,
    ];

    pub fn control(self) -> AluControl {
        let (_, bits) = COMMAND_TABLE[self as usize];
        AluControl::from_flat(bits.map(|bit| bit == 1))
    }

    pub fn mnemonic(self) -> &'static str {
        COMMAND_TABLE[self as usize].0
    }

    /// Runs the command through [`alu16`].
    pub fn apply(self, x: Word, y: Word) -> AluOutput {
        alu16(x, y, self.control())
    }
}

impl fmt::Display for AluCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for AluCommand {
    type Err = HdlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AluCommand::ALL
            .into_iter()
            .find(|command| command.mnemonic() == s)
            .ok_or_else(|| HdlError::UnknownAluMnemonic(s.to_owned()))
    }
}

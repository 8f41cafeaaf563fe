use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HdlError {
    /// Addressable memory must hold a non-zero power of two slots.
    #[error("memory size {size} is not a power of two")]
    NonPowerOfTwoSize { size: usize },
    /// A runtime-width bus was driven with the wrong number of bits.
    #[error("bus width mismatch: expected {expected} bits, got {actual}")]
    BusWidth { expected: usize, actual: usize },
    #[error("unknown ALU mnemonic `{0}`")]
    UnknownAluMnemonic(String),
}

//! Buses are fixed-width `bool` arrays with the most significant bit at index 0.

/// A single signal.
pub type Bit = bool;

/// An `N`-bit bus, most significant bit first.
pub type Bus<const N: usize> = [Bit; N];

/// The 16-bit bus every data path of the machine uses.
pub type Word = Bus<16>;

pub const FALSE16: Word = [false; 16];
pub const TRUE16: Word = [true; 16];
pub const ONE16: Word = [
    false, false, false, false, false, false, false, false, false, false, false, false, false,
    false, false, true,
];

/// The `N` low-order bits of `value`, most significant first. Higher bits are dropped.
///
/// ```
/// assert_eq!(hdl::bus::from_unsigned::<4>(9), [true, false, false, true]);
/// assert_eq!(hdl::bus::from_unsigned::<4>(18), [false, false, true, false]);
/// ```
pub fn from_unsigned<const N: usize>(value: u64) -> Bus<N> {
    std::array::from_fn(|i| {
        let shift = N - 1 - i;
        shift < u64::BITS as usize && (value >> shift) & 1 == 1
    })
}

/// Reads an MSB-first bus of any width as an unsigned integer.
pub fn to_unsigned(bus: &[Bit]) -> u64 {
    bus.iter().fold(0, |acc, &bit| (acc << 1) | u64::from(bit))
}

pub fn from_u16(value: u16) -> Word {
    from_unsigned(u64::from(value))
}

pub fn to_u16(bus: &Word) -> u16 {
    // a 16-bit bus always fits
    to_unsigned(bus) as u16
}

/// Two's-complement encoding of `value`.
pub fn from_i16(value: i16) -> Word {
    from_u16(value as u16)
}

pub fn to_i16(bus: &Word) -> i16 {
    to_u16(bus) as i16
}

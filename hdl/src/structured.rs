/// A named group of signals that can be flattened into a single array and back.
///
/// Fields flatten in declaration order: a scalar field takes one position and an
/// `[T; K]` field takes `K` consecutive positions. `#[derive(StructuredData)]`
/// from `hdl_macro` writes the impl.
pub trait StructuredData<T, const N: usize> {
    fn from_flat(input: [T; N]) -> Self;
    fn to_flat(self) -> [T; N];
}

// The helpers below are called from derived impls, where the widths are
// computed from the struct definition and always agree.

#[doc(hidden)]
pub fn take_one<T, I: Iterator<Item = T>>(signals: &mut I) -> T {
    signals
        .next()
        .unwrap_or_else(|| panic!("flat input is shorter than the structure it fills"))
}

#[doc(hidden)]
pub fn take<T, I: Iterator<Item = T>, const K: usize>(signals: &mut I) -> [T; K] {
    std::array::from_fn(|_| take_one(&mut *signals))
}

#[doc(hidden)]
pub fn collect<T, const N: usize>(flat: Vec<T>) -> [T; N] {
    let len = flat.len();
    flat.try_into()
        .unwrap_or_else(|_| panic!("expected {N} flattened signals, found {len}"))
}

//! Framework pieces shared by every chip: MSB-first bit buses, the
//! [`StructuredData`] flattening trait, the discrete-time [`Clock`] and the
//! error type.

pub mod bus;
pub mod clock;
pub mod error;
pub mod structured;

pub use bus::{Bit, Bus, Word, FALSE16, ONE16, TRUE16};
pub use clock::Clock;
pub use error::HdlError;
pub use structured::StructuredData;

// Symbol codecs used by the container's data lines
//
// Only the decode direction is provided.

pub mod radix64;

pub use radix64::{Radix64Decoder, symbol_value, ALPHABET};

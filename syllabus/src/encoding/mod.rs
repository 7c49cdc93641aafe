//! Order-preserving binary encoding.
//!
//! Values are encoded so that comparing the bytes as unsigned strings gives
//! the same result as comparing the values. Each value can be written
//! ascending or descending, and encodings of either direction can follow one
//! another inside one key.
//!
//! # Byte layout
//!
//! A value is a one-byte tag, a payload and, for strings, lists and objects,
//! a trailing separator. There are no length prefixes.
//!
//! | value | tag | payload |
//! |---|---|---|
//! | null | `01` | |
//! | false / true | `02` / `03` | |
//! | NaN | `04` | |
//! | number | `05` | 8 bytes, order-adjusted IEEE-754 |
//! | string | `06` | UTF-8 bytes, separator |
//! | list | `07` | elements, separator |
//! | object | `08` | (name string, value)*, separator |
//!
//! Every logical byte is escaped: `00` becomes `00 FF` and `FF` becomes
//! `FF 00`. The ascending separator is `00 01` and sorts below every escaped
//! byte. The descending encoder inverts each logical byte before escaping and
//! uses `FF FF`, which sorts above every escaped byte.
//!
//! Decoding accepts only what the encoder produces. Lists and objects nested
//! deeper than [MAX_NESTING_DEPTH], and object members that do not follow in
//! strictly ascending name order, fail with a decoding error.

mod constants;
mod decoder;
mod encoder;
mod index_key;
mod tag;

pub use constants::{MAX_NESTING_DEPTH, MAX_SEPARATOR, MIN_SEPARATOR};
pub use decoder::*;
pub use encoder::*;
pub use index_key::*;
pub use tag::*;

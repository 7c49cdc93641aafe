//! Types shared by every layer of the storage core.
//!
//! - [`Value`] and its total order
//! - validated identifiers ([`FieldName`]) and [`FieldPath`]
//! - [`ByteArray`], the key and value type of the store
//! - [`Direction`] of an indexed value
//! - [`UpgradableLock`], a reader/writer lock with in-place upgrade
//! - the `Atomic` helper for shared mutable state

mod bytes;
mod constants;
mod direction;
mod fields;
pub(crate) mod identifier;
mod lock;
pub mod util;
mod value;

pub use bytes::*;
pub use constants::*;
pub use direction::*;
pub use fields::*;
pub use lock::*;
pub use util::*;
pub use value::*;

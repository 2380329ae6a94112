//! FxStrength Common Types
//!
//! Shared types used across the strength service, including currencies,
//! the static pair table, timestamps and the clock abstraction.

pub mod currency;
pub mod error;
pub mod time;

pub use currency::*;
pub use error::*;
pub use time::*;

//! Address allocation within department ranges
//!
//! Provides reservation and release of individual addresses inside a
//! department's declared range, plus free-address lookups.

mod pool;

pub use pool::AddressPool;

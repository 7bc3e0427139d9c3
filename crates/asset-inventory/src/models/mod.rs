//! Data models for the asset inventory

mod department;
mod equipment;

pub use department::{AddressRange, Department};
pub use equipment::{Equipment, MacAddress, NewEquipment};

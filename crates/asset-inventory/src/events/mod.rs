//! Inventory activity events
//!
//! Every mutation of the inventory (equipment created or deleted, address
//! allocated or released) and every login attempt produces an
//! [`InventoryEvent`]. The [`ActivityLog`] keeps a bounded, newest-first
//! history for the dashboard's recent-changes feed and fans events out to
//! live subscribers.
//!
//! # Usage
//!
//! ```rust,ignore
//! let log = ActivityLog::new(50);
//! let mut rx = log.subscribe();
//!
//! log.record(InventoryEvent::address_allocated("IT", ip));
//! let event = rx.recv().await?;
//! println!("{}", event.description());
//! ```

mod log;
mod messages;

pub use log::ActivityLog;
pub use messages::{AddressEvent, EquipmentEvent, InventoryEvent, LoginEvent};

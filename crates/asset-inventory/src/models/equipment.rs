//! Equipment records and hardware identifiers

use crate::RejectReason;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use uuid::Uuid;

/// A 48-bit hardware address
///
/// Parsed from six hex pairs joined by a single separator kind (`:` or `-`),
/// case-insensitive. Always displayed upper-case and colon-separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl FromStr for MacAddress {
    type Err = RejectReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let separator = if s.contains(':') { ':' } else { '-' };
        let mut parts = s.split(separator);
        let mut bytes = [0u8; 6];

        for byte in bytes.iter_mut() {
            let part = parts.next().ok_or(RejectReason::MacFormatInvalid)?;
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(RejectReason::MacFormatInvalid);
            }
            *byte = u8::from_str_radix(part, 16).map_err(|_| RejectReason::MacFormatInvalid)?;
        }

        if parts.next().is_some() {
            return Err(RejectReason::MacFormatInvalid);
        }

        Ok(Self(bytes))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            a, b, c, d, e, g
        )
    }
}

impl TryFrom<String> for MacAddress {
    type Error = RejectReason;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.to_string()
    }
}

/// A tracked asset bound to one department and one allocated address
///
/// Records are immutable once created; replacing one means deleting it
/// and creating a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    /// Generated identifier
    pub id: Uuid,
    /// Owning department name (lookup key, not ownership)
    pub department: String,
    /// Physical location, e.g. an office number
    pub location: String,
    /// Inventory tag
    pub inventory_tag: String,
    /// Responsible person
    pub owner: String,
    /// Address allocated from the department's range
    pub ip_address: Ipv4Addr,
    /// Storage device serial number
    pub storage_serial: String,
    /// Normalized hardware address
    pub mac_address: MacAddress,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Equipment {
    /// Build a record from already validated identifiers
    pub fn new(fields: NewEquipment, ip_address: Ipv4Addr, mac_address: MacAddress) -> Self {
        Self {
            id: Uuid::new_v4(),
            department: fields.department,
            location: fields.location,
            inventory_tag: fields.inventory_tag,
            owner: fields.owner,
            ip_address,
            storage_serial: fields.storage_serial,
            mac_address,
            created_at: Utc::now(),
        }
    }
}

/// Raw, unvalidated equipment fields as entered by an operator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEquipment {
    pub department: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub inventory_tag: String,
    #[serde(default)]
    pub owner: String,
    pub ip_address: String,
    #[serde(default)]
    pub storage_serial: String,
    pub mac_address: String,
}

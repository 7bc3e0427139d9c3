//! Department and address range models

use crate::validator::parse_ipv4;
use crate::{Error, Result};
use ipnet::{Ipv4AddrRange, Ipv4Net};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Inclusive last-octet range under a fixed three-octet prefix
///
/// The textual form is `A.B.C.low-high`, e.g. `192.168.1.1-50`. It is parsed
/// once on construction; membership checks only compare octets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AddressRange {
    prefix: [u8; 3],
    low: u8,
    high: u8,
}

impl AddressRange {
    /// Create a range from its structured parts
    pub fn new(prefix: [u8; 3], low: u8, high: u8) -> Result<Self> {
        if low > high {
            return Err(Error::RangeMalformed(format!(
                "{}.{}.{}.{}-{}: lower bound exceeds upper bound",
                prefix[0], prefix[1], prefix[2], low, high
            )));
        }
        Ok(Self { prefix, low, high })
    }

    /// The fixed first three octets
    pub fn prefix(&self) -> [u8; 3] {
        self.prefix
    }

    /// Inclusive lower bound of the last octet
    pub fn low(&self) -> u8 {
        self.low
    }

    /// Inclusive upper bound of the last octet
    pub fn high(&self) -> u8 {
        self.high
    }

    /// First address in the range
    pub fn first(&self) -> Ipv4Addr {
        self.address(self.low)
    }

    /// Last address in the range
    pub fn last(&self) -> Ipv4Addr {
        self.address(self.high)
    }

    /// Check whether an address falls inside the range
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        let [a, b, c, d] = ip.octets();
        [a, b, c] == self.prefix && (self.low..=self.high).contains(&d)
    }

    /// Number of addresses the range holds
    pub fn capacity(&self) -> usize {
        usize::from(self.high - self.low) + 1
    }

    /// Iterate every address of the range in ascending order
    pub fn iter(&self) -> Ipv4AddrRange {
        Ipv4AddrRange::new(self.first(), self.last())
    }

    /// The /24 network the range lives in
    pub fn network(&self) -> Ipv4Net {
        Ipv4Net::new_assert(self.address(0), 24)
    }

    fn address(&self, last: u8) -> Ipv4Addr {
        let [a, b, c] = self.prefix;
        Ipv4Addr::new(a, b, c, last)
    }
}

impl FromStr for AddressRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::RangeMalformed(s.to_string());

        let (start, end) = s.split_once('-').ok_or_else(malformed)?;
        let start = parse_ipv4(start).ok_or_else(malformed)?;

        // Upper bound is a bare decimal last octet
        if end.is_empty() || !end.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let high: u8 = end.parse().map_err(|_| malformed())?;

        let [a, b, c, low] = start.octets();
        if low > high {
            return Err(malformed());
        }

        Ok(Self {
            prefix: [a, b, c],
            low,
            high,
        })
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.prefix;
        write!(f, "{}.{}.{}.{}-{}", a, b, c, self.low, self.high)
    }
}

impl TryFrom<String> for AddressRange {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AddressRange> for String {
    fn from(range: AddressRange) -> Self {
        range.to_string()
    }
}

/// An organizational unit owning a reserved address range
///
/// Serialize only: departments are built through [`Department::parse`] or a
/// seed, and registration runs [`Department::verify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    /// Unique human-readable name, also the lookup key
    pub name: String,
    /// Reserved address range
    pub range: AddressRange,
    /// Addresses currently bound to equipment
    #[serde(default)]
    pub allocated: BTreeSet<Ipv4Addr>,
}

impl Department {
    /// Create a department with no allocated addresses
    pub fn new(name: impl Into<String>, range: AddressRange) -> Self {
        Self {
            name: name.into(),
            range,
            allocated: BTreeSet::new(),
        }
    }

    /// Create a department from the textual range form
    pub fn parse(name: impl Into<String>, range: &str) -> Result<Self> {
        Ok(Self::new(name, range.parse()?))
    }

    /// Seed the allocated set
    pub fn with_allocated(mut self, allocated: impl IntoIterator<Item = Ipv4Addr>) -> Self {
        self.allocated.extend(allocated);
        self
    }

    /// Check if an address is already allocated
    pub fn is_allocated(&self, ip: Ipv4Addr) -> bool {
        self.allocated.contains(&ip)
    }

    /// Number of addresses still free in the range
    pub fn free_count(&self) -> usize {
        let in_range = self
            .allocated
            .iter()
            .filter(|ip| self.range.contains(**ip))
            .count();
        self.range.capacity().saturating_sub(in_range)
    }

    /// Share of the range in use, 0.0 to 100.0
    pub fn utilization_percent(&self) -> f64 {
        let capacity = self.range.capacity();
        (capacity - self.free_count()) as f64 / capacity as f64 * 100.0
    }

    /// Allocated addresses lying outside the range
    pub fn stray_addresses(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.allocated
            .iter()
            .copied()
            .filter(|ip| !self.range.contains(*ip))
    }

    /// Verify every allocated address lies within the range
    pub fn verify(&self) -> Result<()> {
        match self.stray_addresses().next() {
            Some(address) => Err(Error::AllocationInconsistent {
                department: self.name.clone(),
                range: self.range.to_string(),
                address,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(s: &str) -> AddressRange {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_range() {
        let r = range("192.168.1.1-50");
        assert_eq!(r.prefix(), [192, 168, 1]);
        assert_eq!(r.low(), 1);
        assert_eq!(r.high(), 50);
        assert_eq!(r.capacity(), 50);
        assert_eq!(r.first(), Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(r.last(), Ipv4Addr::new(192, 168, 1, 50));
    }

    #[test]
    fn test_range_display_roundtrips_text() {
        assert_eq!(range("10.0.0.1-5").to_string(), "10.0.0.1-5");
    }

    #[test]
    fn test_single_address_range() {
        let r = range("10.0.0.7-7");
        assert_eq!(r.capacity(), 1);
        assert!(r.contains(Ipv4Addr::new(10, 0, 0, 7)));
        assert!(!r.contains(Ipv4Addr::new(10, 0, 0, 8)));
    }

    #[test]
    fn test_malformed_ranges_fail_closed() {
        for text in [
            "",
            "192.168.1.1",
            "192.168.1.1-",
            "192.168.1-50",
            "192.168.1.1-abc",
            "192.168.1.1-256",
            "192.168.1.1-+5",
            "192.168.1.10-5",
            "192.168.1.1-5-7",
            " 192.168.1.1-50",
            "192.168.1.1-50 ",
        ] {
            let result = text.parse::<AddressRange>();
            assert!(
                matches!(result, Err(Error::RangeMalformed(_))),
                "expected {:?} to be malformed",
                text
            );
        }
    }

    #[test]
    fn test_new_rejects_inverted_bounds() {
        assert!(AddressRange::new([10, 0, 0], 9, 3).is_err());
        assert!(AddressRange::new([10, 0, 0], 3, 9).is_ok());
    }

    #[test]
    fn test_contains_checks_prefix() {
        let r = range("192.168.1.1-50");
        assert!(r.contains(Ipv4Addr::new(192, 168, 1, 1)));
        assert!(r.contains(Ipv4Addr::new(192, 168, 1, 50)));
        assert!(!r.contains(Ipv4Addr::new(192, 168, 1, 0)));
        assert!(!r.contains(Ipv4Addr::new(192, 168, 1, 51)));
        assert!(!r.contains(Ipv4Addr::new(192, 168, 2, 10)));
    }

    #[test]
    fn test_iter_and_network() {
        let r = range("10.0.0.1-5");
        let all: Vec<Ipv4Addr> = r.iter().collect();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0], Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(all[4], Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(r.network().to_string(), "10.0.0.0/24");
    }

    #[test]
    fn test_range_serde_uses_text_form() {
        let json = serde_json::to_string(&range("10.0.0.1-5")).unwrap();
        assert_eq!(json, "\"10.0.0.1-5\"");

        let back: AddressRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, range("10.0.0.1-5"));
        assert!(serde_json::from_str::<AddressRange>("\"nonsense\"").is_err());
    }

    #[test]
    fn test_department_counts() {
        let dept = Department::parse("IT", "10.0.0.1-5")
            .unwrap()
            .with_allocated([Ipv4Addr::new(10, 0, 0, 2), Ipv4Addr::new(10, 0, 0, 3)]);

        assert!(dept.is_allocated(Ipv4Addr::new(10, 0, 0, 2)));
        assert_eq!(dept.free_count(), 3);
        assert!((dept.utilization_percent() - 40.0).abs() < f64::EPSILON);
        assert!(dept.verify().is_ok());
    }

    #[test]
    fn test_department_verify_reports_stray_address() {
        let dept = Department::parse("IT", "10.0.0.1-5")
            .unwrap()
            .with_allocated([Ipv4Addr::new(10, 0, 0, 9)]);

        let err = dept.verify().unwrap_err();
        assert!(err.is_consistency_fault());
        assert_eq!(dept.free_count(), 5);
    }
}

//! IPv4 assignment checks

use super::{DepartmentDirectory, ValidationResult};
use crate::models::Department;
use crate::RejectReason;
use std::net::Ipv4Addr;

/// Parse strict dotted-decimal IPv4
///
/// Exactly four octets in 0..=255. Whitespace, signs, empty or extra
/// segments and leading zeros (`192.168.01.1`) are all rejected.
pub fn parse_ipv4(candidate: &str) -> Option<Ipv4Addr> {
    candidate.parse().ok()
}

/// Range and uniqueness checks against a single department
pub fn check_department(address: Ipv4Addr, department: &Department) -> ValidationResult {
    if !department.range.contains(address) {
        return ValidationResult::Rejected(RejectReason::OutOfRange);
    }
    if department.is_allocated(address) {
        return ValidationResult::Rejected(RejectReason::AlreadyAllocated);
    }
    ValidationResult::Accepted
}

/// Run every check and return the parsed address on success
pub fn check_assignment<D>(
    candidate: &str,
    department: &str,
    directory: &D,
) -> Result<Ipv4Addr, RejectReason>
where
    D: DepartmentDirectory + ?Sized,
{
    let address = parse_ipv4(candidate).ok_or(RejectReason::FormatInvalid)?;

    let outcome = directory
        .inspect(department, |dept| check_department(address, dept))
        .ok_or(RejectReason::DepartmentUnknown)?;

    match outcome {
        ValidationResult::Accepted => Ok(address),
        ValidationResult::Rejected(reason) => Err(reason),
    }
}

/// Decide whether `candidate` may be bound to `department`
pub fn validate_assignment<D>(candidate: &str, department: &str, directory: &D) -> ValidationResult
where
    D: DepartmentDirectory + ?Sized,
{
    check_assignment(candidate, department, directory).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> Vec<Department> {
        vec![
            Department::parse("IT Отдел", "192.168.1.1-50")
                .unwrap()
                .with_allocated([Ipv4Addr::new(192, 168, 1, 10), Ipv4Addr::new(192, 168, 1, 11)]),
            Department::parse("HR Отдел", "192.168.3.1-50").unwrap(),
        ]
    }

    fn rejected(reason: RejectReason) -> ValidationResult {
        ValidationResult::Rejected(reason)
    }

    #[test]
    fn test_parse_ipv4_strict() {
        assert_eq!(parse_ipv4("10.0.0.3"), Some(Ipv4Addr::new(10, 0, 0, 3)));
        assert_eq!(parse_ipv4("0.0.0.0"), Some(Ipv4Addr::UNSPECIFIED));
        assert_eq!(parse_ipv4("255.255.255.255"), Some(Ipv4Addr::BROADCAST));

        for text in [
            "",
            "10.0.0",
            "10.0.0.3.4",
            "10.0.0.256",
            "10.0.0.a",
            "10..0.3",
            " 10.0.0.3",
            "10.0.0.3 ",
            "10.0. 0.3",
            "10.0.0.-3",
            "10.0.0.+3",
            "10.0.0.03",
            "10.0.0.3.",
        ] {
            assert_eq!(parse_ipv4(text), None, "expected {:?} to be rejected", text);
        }
    }

    #[test]
    fn test_malformed_reports_format_regardless_of_department() {
        let dir = directory();
        for text in ["192.168.1", "192.168.1.300", "abc.def.ghi.jkl", "192.168.1.5.6"] {
            assert_eq!(
                validate_assignment(text, "IT Отдел", &dir),
                rejected(RejectReason::FormatInvalid)
            );
            assert_eq!(
                validate_assignment(text, "No such department", &dir),
                rejected(RejectReason::FormatInvalid)
            );
        }
    }

    #[test]
    fn test_unknown_department() {
        let dir = directory();
        assert_eq!(
            validate_assignment("192.168.1.20", "Warehouse", &dir),
            rejected(RejectReason::DepartmentUnknown)
        );
        // Department names match exactly
        assert_eq!(
            validate_assignment("192.168.1.20", "it отдел", &dir),
            rejected(RejectReason::DepartmentUnknown)
        );
    }

    #[test]
    fn test_range_boundaries() {
        let dir = directory();
        let check = |ip: &str| validate_assignment(ip, "IT Отдел", &dir);

        assert_eq!(check("192.168.1.0"), rejected(RejectReason::OutOfRange));
        assert_eq!(check("192.168.1.1"), ValidationResult::Accepted);
        assert_eq!(check("192.168.1.50"), ValidationResult::Accepted);
        assert_eq!(check("192.168.1.51"), rejected(RejectReason::OutOfRange));
        assert_eq!(check("192.168.2.10"), rejected(RejectReason::OutOfRange));
    }

    #[test]
    fn test_already_allocated() {
        let dir = directory();
        assert_eq!(
            validate_assignment("192.168.1.10", "IT Отдел", &dir),
            rejected(RejectReason::AlreadyAllocated)
        );
        // Allocation is per department
        assert_eq!(
            validate_assignment("192.168.3.10", "HR Отдел", &dir),
            ValidationResult::Accepted
        );
    }

    #[test]
    fn test_out_of_range_wins_over_allocation() {
        // A stray allocated address still reports the range failure first
        let dir = vec![Department::parse("IT", "10.0.0.1-5")
            .unwrap()
            .with_allocated([Ipv4Addr::new(10, 0, 0, 9)])];
        assert_eq!(
            validate_assignment("10.0.0.9", "IT", &dir),
            rejected(RejectReason::OutOfRange)
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let dir = directory();
        for candidate in ["192.168.1.20", "192.168.1.10", "192.168.9.1", "bogus"] {
            let first = validate_assignment(candidate, "IT Отдел", &dir);
            for _ in 0..5 {
                assert_eq!(validate_assignment(candidate, "IT Отдел", &dir), first);
            }
        }
    }

    #[test]
    fn test_check_assignment_returns_address() {
        let dir = directory();
        assert_eq!(
            check_assignment("192.168.3.7", "HR Отдел", &dir),
            Ok(Ipv4Addr::new(192, 168, 3, 7))
        );
        assert_eq!(
            check_assignment("192.168.3.7", "Nope", &dir),
            Err(RejectReason::DepartmentUnknown)
        );
    }

    #[test]
    fn test_end_to_end_with_commit() {
        let mut dir = vec![Department::parse("IT", "10.0.0.1-5").unwrap()];

        assert_eq!(validate_assignment("10.0.0.3", "IT", &dir), ValidationResult::Accepted);
        dir[0].allocated.insert(Ipv4Addr::new(10, 0, 0, 3));

        assert_eq!(
            validate_assignment("10.0.0.3", "IT", &dir),
            rejected(RejectReason::AlreadyAllocated)
        );
        assert_eq!(
            validate_assignment("10.0.0.9", "IT", &dir),
            rejected(RejectReason::OutOfRange)
        );
    }
}

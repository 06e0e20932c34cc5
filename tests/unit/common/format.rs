//! Unit tests for display formatting

use gapscreen::common::format::{format_fixed, format_signed_pct};

#[test]
fn test_groups_thousands() {
    assert_eq!(format_fixed(1234567.891, 2), "1,234,567.89");
    assert_eq!(format_fixed(999.0, 2), "999.00");
    assert_eq!(format_fixed(5_000_000.0, 0), "5,000,000");
    assert_eq!(format_fixed(-1234.5, 1), "-1,234.5");
}

#[test]
fn test_negative_zero_has_no_sign() {
    assert_eq!(format_fixed(-0.001, 2), "0.00");
}

#[test]
fn test_signed_percentage() {
    assert_eq!(format_signed_pct(0.5234), "+0.52%");
    assert_eq!(format_signed_pct(-1.0), "-1.00%");
    assert_eq!(format_signed_pct(0.0), "+0.00%");
}

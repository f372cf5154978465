// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Memory Units

use proptest::prelude::*;
use testbed_topology::domain::units::{gb, mb, GIB, MIB};

proptest! {
    /// Whole megabyte magnitudes convert exactly
    #[test]
    fn prop_mb_is_exact(m in 0u64..=1_000_000) {
        prop_assert_eq!(mb(m as f64).unwrap().bytes(), m * MIB);
    }

    /// One gigabyte is 1024 megabytes at every magnitude
    #[test]
    fn prop_gb_is_1024_mb(m in 0u64..=100_000) {
        let g = gb(m as f64).unwrap();
        prop_assert_eq!(g.bytes(), m * GIB);
        prop_assert_eq!(g, mb((m * 1024) as f64).unwrap());
    }

    /// Conversion is monotonic
    #[test]
    fn prop_mb_monotonic(a in 0.0f64..1.0e6, b in 0.0f64..1.0e6) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(mb(lo).unwrap() <= mb(hi).unwrap());
    }

    /// Negative magnitudes never produce a size
    #[test]
    fn prop_negative_rejected(m in -1.0e9f64..-1.0e-9) {
        prop_assert!(mb(m).is_err());
        prop_assert!(gb(m).is_err());
    }
}

#[test]
fn test_non_finite_rejected() {
    for m in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(mb(m).is_err());
        assert!(gb(m).is_err());
    }
}

#[test]
fn test_overflow_rejected() {
    assert!(gb(1.0e12).is_err());
    assert!(mb(f64::MAX).is_err());
}

//! Derivation of the tick denominator.
//!
//! The smallest integer divisible by every simple divisor is their least
//! common multiple, so no search is needed: fold the divisors through
//! `lcm`, then check the NTSC constraints against the result. The linear
//! scans at the bottom of this module exist only to cross-check that answer
//! in tests.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::constraints::RateConstraint;

/// The tick must not be finer than a nanosecond, so a second holds at most
/// this many ticks.
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Why no denominator exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infeasibility {
    /// A divisor or NTSC base was zero or negative.
    InvalidConstraint(RateConstraint),
    /// The LCM no longer fits in an `i64`.
    Overflow,
    /// The LCM is larger than the bound.
    ExceedsBound { lcm: i64, upper_bound: i64 },
    /// The LCM leaves a fractional NTSC frame.
    InexactNtsc { base: i64, denominator: i64 },
}

/// No tick denominator satisfies the constraint set under the bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFound {
    pub reason: Infeasibility,
}

impl NotFound {
    const fn new(reason: Infeasibility) -> Self {
        Self { reason }
    }
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no tick denominator found: ")?;
        match self.reason {
            Infeasibility::InvalidConstraint(constraint) => {
                write!(f, "invalid constraint {constraint:?}")
            }
            Infeasibility::Overflow => write!(f, "least common multiple overflows i64"),
            Infeasibility::ExceedsBound { lcm, upper_bound } => {
                write!(f, "least common multiple {lcm} exceeds {upper_bound}")
            }
            Infeasibility::InexactNtsc { base, denominator } => write!(
                f,
                "{denominator} ticks per second leaves a fractional frame at {base} * 1000/1001 Hz"
            ),
        }
    }
}

impl std::error::Error for NotFound {}

/// Greatest common divisor of the magnitudes, by Euclid's algorithm.
#[must_use]
pub const fn gcd(a: i64, b: i64) -> i64 {
    let mut a = a.unsigned_abs();
    let mut b = b.unsigned_abs();
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    // gcd(i64::MIN, 0) is 2^63, which only fits as u64.
    if a > i64::MAX as u64 { i64::MIN } else { a as i64 }
}

/// Least common multiple of two positive integers, computed as
/// `a / gcd(a, b) * b`. Returns `None` on overflow.
#[must_use]
pub const fn lcm(a: i64, b: i64) -> Option<i64> {
    if a <= 0 || b <= 0 {
        return None;
    }
    (a / gcd(a, b)).checked_mul(b)
}

/// Find the smallest tick count per second satisfying every constraint,
/// no larger than `upper_bound`.
pub fn solve(constraints: &[RateConstraint], upper_bound: i64) -> Result<i64, NotFound> {
    let mut denominator: i64 = 1;

    for &constraint in constraints {
        let RateConstraint::Exact {
            rate_hz,
            subdivisions,
        } = constraint
        else {
            continue;
        };
        if rate_hz <= 0 || subdivisions <= 0 {
            return Err(rejected(Infeasibility::InvalidConstraint(constraint)));
        }
        let divisor = rate_hz
            .checked_mul(subdivisions)
            .ok_or_else(|| rejected(Infeasibility::Overflow))?;
        denominator =
            lcm(denominator, divisor).ok_or_else(|| rejected(Infeasibility::Overflow))?;
        trace!(%constraint, divisor, denominator, "lcm step");
    }
    debug!(denominator, "lcm of simple divisors");

    if denominator > upper_bound {
        return Err(rejected(Infeasibility::ExceedsBound {
            lcm: denominator,
            upper_bound,
        }));
    }

    for &constraint in constraints {
        let RateConstraint::NtscApprox { base } = constraint else {
            continue;
        };
        if base <= 0 {
            return Err(rejected(Infeasibility::InvalidConstraint(constraint)));
        }
        if !constraint.is_satisfied_by(denominator) {
            return Err(rejected(Infeasibility::InexactNtsc { base, denominator }));
        }
        trace!(base, denominator, "ntsc frame is exact");
    }

    debug!(denominator, "solved");
    Ok(denominator)
}

fn rejected(reason: Infeasibility) -> NotFound {
    let err = NotFound::new(reason);
    warn!(%err, "constraint set is infeasible");
    err
}

/// First `n` in `1..=upper_bound` satisfying every constraint.
///
/// O(`upper_bound`). Cross-check for [`solve`], not a production path.
#[must_use]
pub fn scan_ascending(constraints: &[RateConstraint], upper_bound: i64) -> Option<i64> {
    (1..=upper_bound).find(|&n| satisfies_all(constraints, n))
}

/// Largest `n` in `1..=upper_bound` satisfying every constraint, scanning
/// down from the bound.
///
/// O(`upper_bound`). For the standard set under [`NANOS_PER_SECOND`] this
/// lands on the same value as [`solve`], because twice the LCM is already
/// past the bound.
#[must_use]
pub fn scan_descending(constraints: &[RateConstraint], upper_bound: i64) -> Option<i64> {
    (1..=upper_bound)
        .rev()
        .find(|&n| satisfies_all(constraints, n))
}

fn satisfies_all(constraints: &[RateConstraint], n: i64) -> bool {
    constraints.iter().all(|c| c.is_satisfied_by(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintSet;

    #[test]
    fn gcd_basics() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(44_100, 48_000), 300);
    }

    #[test]
    fn lcm_basics() {
        assert_eq!(lcm(4, 6), Some(12));
        assert_eq!(lcm(44_100, 48_000), Some(7_056_000));
        assert_eq!(lcm(0, 6), None);
        assert_eq!(lcm(i64::MAX, i64::MAX - 1), None);
    }

    #[test]
    fn standard_set() {
        let set = ConstraintSet::standard();
        assert_eq!(solve(set.as_slice(), NANOS_PER_SECOND), Ok(705_600_000));
    }

    #[test]
    fn empty_set_is_one() {
        assert_eq!(solve(&[], NANOS_PER_SECOND), Ok(1));
    }

    #[test]
    fn prime_above_bound() {
        let err = solve(&[RateConstraint::divisor(1_000_000_007)], NANOS_PER_SECOND)
            .expect_err("prime above bound");
        assert_eq!(
            err.reason,
            Infeasibility::ExceedsBound {
                lcm: 1_000_000_007,
                upper_bound: NANOS_PER_SECOND,
            }
        );
    }

    #[test]
    fn overflow_is_not_found() {
        let constraints = [
            RateConstraint::divisor(i64::MAX),
            RateConstraint::divisor(i64::MAX - 1),
        ];
        let err = solve(&constraints, i64::MAX).expect_err("overflow");
        assert_eq!(err.reason, Infeasibility::Overflow);

        let huge = RateConstraint::Exact {
            rate_hz: i64::MAX,
            subdivisions: 2,
        };
        let err = solve(&[huge], i64::MAX).expect_err("divisor overflow");
        assert_eq!(err.reason, Infeasibility::Overflow);
    }

    #[test]
    fn invalid_constraints() {
        let err = solve(&[RateConstraint::divisor(0)], NANOS_PER_SECOND).expect_err("zero");
        assert!(matches!(err.reason, Infeasibility::InvalidConstraint(_)));

        let err = solve(&[RateConstraint::ntsc(-24)], NANOS_PER_SECOND).expect_err("negative");
        assert!(matches!(err.reason, Infeasibility::InvalidConstraint(_)));
    }

    #[test]
    fn ntsc_without_room() {
        // LCM of 24 alone cannot hold a 24_000 division.
        let constraints = [RateConstraint::divisor(24), RateConstraint::ntsc(24)];
        let err = solve(&constraints, NANOS_PER_SECOND).expect_err("inexact");
        assert_eq!(
            err.reason,
            Infeasibility::InexactNtsc {
                base: 24,
                denominator: 24,
            }
        );
    }

    #[test]
    fn display() {
        let err = NotFound::new(Infeasibility::ExceedsBound {
            lcm: 11,
            upper_bound: 10,
        });
        assert_eq!(
            err.to_string(),
            "no tick denominator found: least common multiple 11 exceeds 10"
        );
    }

    #[test]
    fn scans_agree_on_small_sets() {
        let constraints = [
            RateConstraint::divisor(24),
            RateConstraint::divisor(25),
            RateConstraint::divisor(30),
            RateConstraint::divisor(48),
        ];
        let solved = solve(&constraints, 10_000).expect("solvable");
        assert_eq!(solved, 1200);
        assert_eq!(scan_ascending(&constraints, 10_000), Some(solved));
        assert_eq!(scan_descending(&constraints, 10_000), Some(9600));
        assert_eq!(scan_ascending(&constraints, 1000), None);
    }
}

//! The rates a tick denominator must divide exactly.

use std::fmt;

/// Video frame rates in Hz.
pub const FRAME_RATES: [i64; 9] = [24, 25, 30, 48, 50, 60, 90, 100, 120];

/// Each frame rate is required in 1/1000 divisions, leaving room for
/// simulation substeps.
pub const FRAME_SUBDIVISIONS: i64 = 1000;

/// Audio sample rates in Hz.
pub const AUDIO_SAMPLE_RATES: [i64; 10] = [
    8_000, 16_000, 22_050, 24_000, 32_000, 44_100, 48_000, 88_200, 96_000, 192_000,
];

/// Bases of the NTSC rates, each meaning `base * 1000/1001` Hz.
pub const NTSC_BASES: [i64; 4] = [24, 30, 60, 120];

pub const NTSC_NUMERATOR: i64 = 1000;
pub const NTSC_DENOMINATOR: i64 = 1001;

/// One requirement on the number of ticks per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateConstraint {
    /// `rate_hz * subdivisions` must divide the denominator.
    Exact { rate_hz: i64, subdivisions: i64 },
    /// A frame at `base * 1000/1001` Hz must be a whole number of ticks.
    NtscApprox { base: i64 },
}

impl RateConstraint {
    /// A bare divisor: the denominator must be a multiple of `divisor`.
    #[must_use]
    pub const fn divisor(divisor: i64) -> Self {
        Self::Exact {
            rate_hz: divisor,
            subdivisions: 1,
        }
    }

    #[must_use]
    pub const fn frame_rate(rate_hz: i64) -> Self {
        Self::Exact {
            rate_hz,
            subdivisions: FRAME_SUBDIVISIONS,
        }
    }

    #[must_use]
    pub const fn ntsc(base: i64) -> Self {
        Self::NtscApprox { base }
    }

    /// The simple divisor this constraint imposes, or `None` for NTSC
    /// constraints (and for divisors too large for `i64`).
    #[must_use]
    pub const fn simple_divisor(self) -> Option<i64> {
        match self {
            Self::Exact {
                rate_hz,
                subdivisions,
            } => rate_hz.checked_mul(subdivisions),
            Self::NtscApprox { .. } => None,
        }
    }

    /// Test a candidate denominator against this constraint.
    ///
    /// NTSC hits 1000 frames every `base * 1001` ticks-per-frame units, so
    /// the check is `(n * 1001) % (1001 * (n / (base * 1000))) == 0`. A
    /// candidate too small to hold one `base * 1000` division fails.
    #[must_use]
    pub fn is_satisfied_by(self, n: i64) -> bool {
        if n <= 0 {
            return false;
        }
        match self {
            Self::Exact {
                rate_hz,
                subdivisions,
            } if rate_hz > 0 && subdivisions > 0 => {
                self.simple_divisor().is_some_and(|d| n % d == 0)
            }
            Self::Exact { .. } => false,
            Self::NtscApprox { base } => {
                let Some(units_per_frame) = ntsc_units_per_frame(base, n) else {
                    return false;
                };
                n.checked_mul(NTSC_DENOMINATOR)
                    .is_some_and(|scaled| scaled % units_per_frame == 0)
            }
        }
    }

    /// Ticks in one frame (or sample) of this rate at `n` ticks per second.
    ///
    /// Exact rates give `n / rate_hz`; NTSC rates give
    /// `1001 * (n / (base * 1000))`. Returns `None` for non-positive rates.
    #[must_use]
    pub fn ticks_per_frame(self, n: i64) -> Option<i64> {
        match self {
            Self::Exact { rate_hz, .. } if rate_hz > 0 => Some(n / rate_hz),
            Self::Exact { .. } => None,
            Self::NtscApprox { base } => ntsc_units_per_frame(base, n),
        }
    }
}

fn ntsc_units_per_frame(base: i64, n: i64) -> Option<i64> {
    let per_division = base.checked_mul(NTSC_NUMERATOR).filter(|&d| d > 0)?;
    NTSC_DENOMINATOR
        .checked_mul(n / per_division)
        .filter(|&units| units > 0)
}

impl fmt::Display for RateConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Exact {
                rate_hz,
                subdivisions: 1,
            } => write!(f, "{rate_hz} Hz"),
            Self::Exact {
                rate_hz,
                subdivisions,
            } => write!(f, "{rate_hz} Hz x{subdivisions}"),
            Self::NtscApprox { base } => write!(
                f,
                "{base} * {NTSC_NUMERATOR}/{NTSC_DENOMINATOR} (~{:.3}) Hz",
                base as f64 * NTSC_NUMERATOR as f64 / NTSC_DENOMINATOR as f64
            ),
        }
    }
}

/// An ordered list of rate constraints.
///
/// Order has no effect on the solution; it is kept so derivation output is
/// reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    constraints: Vec<RateConstraint>,
}

impl ConstraintSet {
    #[must_use]
    pub fn new(constraints: Vec<RateConstraint>) -> Self {
        Self { constraints }
    }

    /// Frame rates (x1000), then NTSC bases, then audio sample rates.
    #[must_use]
    pub fn standard() -> Self {
        let constraints = FRAME_RATES
            .iter()
            .map(|&rate| RateConstraint::frame_rate(rate))
            .chain(NTSC_BASES.iter().map(|&base| RateConstraint::ntsc(base)))
            .chain(
                AUDIO_SAMPLE_RATES
                    .iter()
                    .map(|&rate| RateConstraint::divisor(rate)),
            )
            .collect();
        Self { constraints }
    }

    pub fn push(&mut self, constraint: RateConstraint) {
        self.constraints.push(constraint);
    }

    pub fn iter(&self) -> impl Iterator<Item = &RateConstraint> {
        self.constraints.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[RateConstraint] {
        &self.constraints
    }

    /// Simple divisors in set order. Overflowing divisors are skipped; the
    /// solver reports them separately.
    pub fn divisors(&self) -> impl Iterator<Item = i64> + '_ {
        self.constraints.iter().filter_map(|c| c.simple_divisor())
    }

    pub fn ntsc_bases(&self) -> impl Iterator<Item = i64> + '_ {
        self.constraints.iter().filter_map(|c| match *c {
            RateConstraint::NtscApprox { base } => Some(base),
            RateConstraint::Exact { .. } => None,
        })
    }

    #[must_use]
    pub fn is_satisfied_by(&self, n: i64) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied_by(n))
    }
}

impl From<Vec<RateConstraint>> for ConstraintSet {
    fn from(constraints: Vec<RateConstraint>) -> Self {
        Self::new(constraints)
    }
}

impl FromIterator<RateConstraint> for ConstraintSet {
    fn from_iter<I: IntoIterator<Item = RateConstraint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Extend<RateConstraint> for ConstraintSet {
    fn extend<I: IntoIterator<Item = RateConstraint>>(&mut self, iter: I) {
        self.constraints.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ConstraintSet {
    type Item = &'a RateConstraint;
    type IntoIter = std::slice::Iter<'a, RateConstraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: i64 = 705_600_000;

    #[test]
    fn standard_set_layout() {
        let set = ConstraintSet::standard();
        assert_eq!(set.len(), 9 + 4 + 10);
        assert_eq!(set.ntsc_bases().collect::<Vec<_>>(), NTSC_BASES);
        assert_eq!(set.divisors().next(), Some(24_000));
        assert_eq!(set.divisors().last(), Some(192_000));
    }

    #[test]
    fn exact_constraint() {
        assert!(RateConstraint::frame_rate(24).is_satisfied_by(48_000));
        assert!(!RateConstraint::frame_rate(24).is_satisfied_by(24));
        assert!(RateConstraint::divisor(44_100).is_satisfied_by(N));
    }

    #[test]
    fn non_positive_inputs_never_satisfy() {
        assert!(!RateConstraint::divisor(0).is_satisfied_by(N));
        assert!(!RateConstraint::divisor(-5).is_satisfied_by(N));
        assert!(!RateConstraint::divisor(5).is_satisfied_by(0));
        assert!(!RateConstraint::ntsc(0).is_satisfied_by(N));
    }

    #[test]
    fn ntsc_constraint() {
        for base in NTSC_BASES {
            assert!(RateConstraint::ntsc(base).is_satisfied_by(N), "base {base}");
        }
        // Too small to hold a single base * 1000 division.
        assert!(!RateConstraint::ntsc(30).is_satisfied_by(29_999));
        // 30_000 * 7 = 210_000: units per frame 7007, 210_000 * 1001 / 7007 = 30_000.
        assert!(RateConstraint::ntsc(30).is_satisfied_by(210_000));
        // floor(90_001 / 30_000) = 3 and 90_001 is not a multiple of 3.
        assert!(!RateConstraint::ntsc(30).is_satisfied_by(90_001));
    }

    #[test]
    fn frame_table() {
        assert_eq!(RateConstraint::frame_rate(24).ticks_per_frame(N), Some(29_400_000));
        assert_eq!(RateConstraint::frame_rate(90).ticks_per_frame(N), Some(7_840_000));
        assert_eq!(RateConstraint::divisor(192_000).ticks_per_frame(N), Some(3675));
        assert_eq!(RateConstraint::ntsc(24).ticks_per_frame(N), Some(29_429_400));
        assert_eq!(RateConstraint::ntsc(120).ticks_per_frame(N), Some(5_885_880));
        assert_eq!(RateConstraint::divisor(0).ticks_per_frame(N), None);
    }

    #[test]
    fn display() {
        assert_eq!(RateConstraint::frame_rate(24).to_string(), "24 Hz x1000");
        assert_eq!(RateConstraint::divisor(44_100).to_string(), "44100 Hz");
        assert_eq!(
            RateConstraint::ntsc(30).to_string(),
            "30 * 1000/1001 (~29.970) Hz"
        );
    }

    #[test]
    fn collect_and_extend() {
        let mut set: ConstraintSet = [RateConstraint::divisor(7)].into_iter().collect();
        set.extend([RateConstraint::ntsc(24)]);
        set.push(RateConstraint::divisor(11));
        assert_eq!(set.divisors().collect::<Vec<_>>(), vec![7, 11]);
        assert_eq!((&set).into_iter().count(), 3);
    }
}

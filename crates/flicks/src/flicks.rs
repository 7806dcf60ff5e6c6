//! The flick: the fundamental unit of time.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};
use std::time::Duration;

/// Flicks in one second.
///
/// The least common multiple of every frame rate (x1000) and audio sample
/// rate in [`ConstraintSet::standard`](crate::ConstraintSet::standard), which
/// also divides every NTSC frame exactly. [`solve`](crate::solve) derives it.
///
/// | rate                   | flicks per frame |
/// |------------------------|------------------|
/// | 24 Hz                  | 29,400,000       |
/// | 25 Hz                  | 28,224,000       |
/// | 30 Hz                  | 23,520,000       |
/// | 48 Hz                  | 14,700,000       |
/// | 50 Hz                  | 14,112,000       |
/// | 60 Hz                  | 11,760,000       |
/// | 90 Hz                  | 7,840,000        |
/// | 100 Hz                 | 7,056,000        |
/// | 120 Hz                 | 5,880,000        |
/// | 8 kHz                  | 88,200           |
/// | 16 kHz                 | 44,100           |
/// | 22.05 kHz              | 32,000           |
/// | 24 kHz                 | 29,400           |
/// | 32 kHz                 | 22,050           |
/// | 44.1 kHz               | 16,000           |
/// | 48 kHz                 | 14,700           |
/// | 88.2 kHz               | 8,000            |
/// | 96 kHz                 | 7,350            |
/// | 192 kHz                | 3,675            |
/// | 24000/1001 (~23.976)   | 29,429,400       |
/// | 30000/1001 (~29.97)    | 23,543,520       |
/// | 60000/1001 (~59.94)    | 11,771,760       |
/// | 120000/1001 (~119.88)  | 5,885,880        |
pub const FLICKS_PER_SECOND: i64 = 705_600_000;

/// A signed count of flicks (1/705,600,000 of a second).
///
/// Integer arithmetic on flicks is exact: a whole frame at any supported
/// rate is a whole number of flicks, so stepping frame by frame never drifts.
/// Only conversion from real seconds (or from a coarser rational unit that
/// does not divide a second into whole flicks) can lose precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Flicks(pub i64);

impl Flicks {
    pub const ZERO: Self = Self(0);
    pub const ONE_SECOND: Self = Self(FLICKS_PER_SECOND);
    pub const ONE_TWENTY_FOURTH_OF_SECOND: Self = Self(FLICKS_PER_SECOND / 24);
    pub const ONE_NINETIETH_OF_SECOND: Self = Self(FLICKS_PER_SECOND / 90);
    pub const MIN: Self = Self(i64::MIN);
    pub const MAX: Self = Self(i64::MAX);

    #[must_use]
    pub const fn new(count: i64) -> Self {
        Self(count)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Convert real seconds to the nearest whole flick. Exact halves round
    /// toward zero, as a truncating duration cast would.
    ///
    /// Any count within 2^50 flicks (about 18 days) survives a round trip
    /// through [`Flicks::to_seconds`] unchanged. Out-of-range values saturate
    /// at [`Flicks::MIN`] / [`Flicks::MAX`] and NaN becomes zero.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn from_seconds(seconds: f64) -> Self {
        let scaled = seconds * FLICKS_PER_SECOND as f64;
        let nearest = if (scaled - scaled.trunc()).abs() == 0.5 {
            scaled.trunc()
        } else {
            scaled.round()
        };
        Self(nearest as i64)
    }

    #[must_use]
    pub fn to_seconds(self) -> f64 {
        self.0 as f64 / FLICKS_PER_SECOND as f64
    }

    /// Convert `count` units of `1 / source_ticks_per_second` seconds.
    ///
    /// Exact whenever [`FLICKS_PER_SECOND`] is a multiple of the source
    /// rate, which holds for every rate in the standard constraint set.
    /// Otherwise rounds like [`Flicks::from_seconds`].
    #[must_use]
    pub fn cast_from(count: i64, source_ticks_per_second: i64) -> Self {
        Self::from_ratio(count, 1, source_ticks_per_second)
    }

    /// Express this duration in units of `1 / target_ticks_per_second`
    /// seconds, rounded to the nearest unit.
    #[must_use]
    pub fn cast_to(self, target_ticks_per_second: i64) -> i64 {
        self.to_ratio(1, target_ticks_per_second)
    }

    /// Convert `count` units of `num / den` seconds.
    ///
    /// Computed in 128 bits as `count * num * N / den`, rounded to nearest
    /// with halves toward zero and saturated to the `i64` range. A zero `den`
    /// saturates by the sign of the numerator.
    #[must_use]
    pub fn from_ratio(count: i64, num: i64, den: i64) -> Self {
        let units = i128::from(count) * i128::from(num);
        let Some(scaled) = units.checked_mul(i128::from(FLICKS_PER_SECOND)) else {
            return if (units < 0) == (den < 0) {
                Self::MAX
            } else {
                Self::MIN
            };
        };
        Self(div_nearest(scaled, i128::from(den)))
    }

    /// Express this duration as a count of `num / den` second units, rounded
    /// to nearest with halves toward zero.
    #[must_use]
    pub fn to_ratio(self, num: i64, den: i64) -> i64 {
        let scaled = i128::from(self.0) * i128::from(den);
        div_nearest(scaled, i128::from(num) * i128::from(FLICKS_PER_SECOND))
    }

    /// A deterministic 64-bit hash of the raw count, stable across runs and
    /// toolchain versions.
    #[must_use]
    pub fn hash_value(self) -> u64 {
        fxhash::hash64(&self.0)
    }

    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    #[must_use]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    #[must_use]
    pub const fn checked_mul(self, rhs: i64) -> Option<Self> {
        match self.0.checked_mul(rhs) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

/// `num / den` rounded to the nearest integer with halves toward zero,
/// saturated to the `i64` range.
fn div_nearest(num: i128, den: i128) -> i64 {
    if den == 0 {
        return match num.signum() {
            1 => i64::MAX,
            -1 => i64::MIN,
            _ => 0,
        };
    }
    let mut q = num / den;
    let r = num % den;
    if r.unsigned_abs() * 2 > den.unsigned_abs() {
        q += num.signum() * den.signum();
    }
    i64::try_from(q).unwrap_or(if q < 0 { i64::MIN } else { i64::MAX })
}

impl fmt::Display for Flicks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} flicks", self.0)
    }
}

impl From<Duration> for Flicks {
    /// Rounds to the nearest flick and saturates at [`Flicks::MAX`].
    fn from(d: Duration) -> Self {
        let scaled = d.as_nanos() as i128 * i128::from(FLICKS_PER_SECOND);
        Self(div_nearest(scaled, i128::from(crate::NANOS_PER_SECOND)))
    }
}

/// A negative flick count has no [`Duration`] equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegativeDuration(pub Flicks);

impl fmt::Display for NegativeDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot convert negative {} to Duration", self.0)
    }
}

impl std::error::Error for NegativeDuration {}

impl TryFrom<Flicks> for Duration {
    type Error = NegativeDuration;

    /// Rounds to the nearest nanosecond.
    fn try_from(f: Flicks) -> Result<Self, Self::Error> {
        if f.is_negative() {
            return Err(NegativeDuration(f));
        }
        let nanos = div_nearest(
            i128::from(f.0) * i128::from(crate::NANOS_PER_SECOND),
            i128::from(FLICKS_PER_SECOND),
        );
        Ok(Duration::from_nanos(nanos as u64))
    }
}

impl Add for Flicks {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Flicks {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Flicks {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Flicks {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Flicks {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<i64> for Flicks {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self {
        Self(self.0 * rhs)
    }
}

impl Mul<Flicks> for i64 {
    type Output = Flicks;

    fn mul(self, rhs: Flicks) -> Flicks {
        Flicks(self * rhs.0)
    }
}

impl MulAssign<i64> for Flicks {
    fn mul_assign(&mut self, rhs: i64) {
        self.0 *= rhs;
    }
}

impl Div<i64> for Flicks {
    type Output = Self;

    fn div(self, rhs: i64) -> Self {
        Self(self.0 / rhs)
    }
}

impl DivAssign<i64> for Flicks {
    fn div_assign(&mut self, rhs: i64) {
        self.0 /= rhs;
    }
}

/// How many whole `rhs` fit in `self`.
impl Div for Flicks {
    type Output = i64;

    fn div(self, rhs: Self) -> i64 {
        self.0 / rhs.0
    }
}

impl Rem for Flicks {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self {
        Self(self.0 % rhs.0)
    }
}

impl RemAssign for Flicks {
    fn rem_assign(&mut self, rhs: Self) {
        self.0 %= rhs.0;
    }
}

impl Sum for Flicks {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Flicks> for Flicks {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

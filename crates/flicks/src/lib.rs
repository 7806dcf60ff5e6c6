//! Flicks: an exact integer unit of time for frame and sample timing.
//!
//! A flick is 1/705,600,000 of a second. That is the smallest unit larger
//! than a nanosecond in which one frame at every common video rate, one
//! sample at every common audio rate, and one frame at the NTSC `1000/1001`
//! rates are all whole numbers. Everything else derives from that number.

mod constraints;
mod flicks;
mod solver;
mod stepping;

pub use constraints::{
    AUDIO_SAMPLE_RATES, ConstraintSet, FRAME_RATES, FRAME_SUBDIVISIONS, NTSC_BASES,
    NTSC_DENOMINATOR, NTSC_NUMERATOR, RateConstraint,
};
pub use flicks::{FLICKS_PER_SECOND, Flicks, NegativeDuration};
pub use solver::{
    Infeasibility, NANOS_PER_SECOND, NotFound, gcd, lcm, scan_ascending, scan_descending, solve,
};
pub use stepping::{StepReport, step_frames};

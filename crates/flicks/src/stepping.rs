//! Frame-by-frame stepping through a timeline in integer ticks.
//!
//! Steps by a fixed per-frame tick count and records what a simulation loop
//! would see. With nanoseconds a 24 fps frame is 41,666,666 ns, so the loop
//! runs one frame too many and only lands on the very first whole second.
//! With flicks every frame boundary is exact.

/// What happened while stepping through `seconds` of frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub ticks_per_second: i64,
    pub frames_per_second: i64,
    pub seconds: i64,
    /// Ticks added per iteration (`ticks_per_second / frames_per_second`).
    pub ticks_per_frame: i64,
    pub iterations: i64,
    /// Iterations whose start time was a whole second.
    pub whole_seconds_hit: i64,
}

impl StepReport {
    #[must_use]
    pub const fn expected_iterations(&self) -> i64 {
        self.frames_per_second * self.seconds
    }

    /// Whether `frames_per_second` frames add up to exactly one second.
    #[must_use]
    pub const fn frame_is_exact(&self) -> bool {
        self.frames_per_second * self.ticks_per_frame == self.ticks_per_second
    }

    #[must_use]
    pub const fn is_exact(&self) -> bool {
        self.iterations == self.expected_iterations()
            && self.whole_seconds_hit == self.seconds
            && self.frame_is_exact()
    }
}

/// Step from zero to `seconds` in increments of one frame.
///
/// Returns `None` unless every argument is positive, a frame holds at least
/// one tick, and `seconds` of ticks fit in an `i64`. The loop runs about
/// `frames_per_second * seconds` times.
#[must_use]
pub fn step_frames(
    ticks_per_second: i64,
    frames_per_second: i64,
    seconds: i64,
) -> Option<StepReport> {
    if ticks_per_second <= 0 || frames_per_second <= 0 || seconds <= 0 {
        return None;
    }
    if ticks_per_second < frames_per_second {
        return None;
    }

    let ticks_per_frame = ticks_per_second / frames_per_second;
    let end = ticks_per_second.checked_mul(seconds)?;

    let mut iterations = 0;
    let mut whole_seconds_hit = 0;
    let mut t: i64 = 0;
    while t < end {
        if t % ticks_per_second == 0 {
            whole_seconds_hit += 1;
        }
        iterations += 1;
        let Some(next) = t.checked_add(ticks_per_frame) else {
            break;
        };
        t = next;
    }

    Some(StepReport {
        ticks_per_second,
        frames_per_second,
        seconds,
        ticks_per_frame,
        iterations,
        whole_seconds_hit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FLICKS_PER_SECOND, NANOS_PER_SECOND};

    #[test]
    fn nanoseconds_drift_at_24_fps() {
        let report = step_frames(NANOS_PER_SECOND, 24, 6).expect("valid");
        assert_eq!(report.ticks_per_frame, 41_666_666);
        assert_eq!(report.iterations, 145);
        assert_eq!(report.whole_seconds_hit, 1);
        assert!(!report.frame_is_exact());
        assert!(!report.is_exact());
    }

    #[test]
    fn flicks_are_exact_at_24_fps() {
        let report = step_frames(FLICKS_PER_SECOND, 24, 6).expect("valid");
        assert_eq!(report.ticks_per_frame, 29_400_000);
        assert_eq!(report.iterations, 144);
        assert_eq!(report.whole_seconds_hit, 6);
        assert!(report.is_exact());
    }

    #[test]
    fn flicks_are_exact_at_every_frame_rate() {
        for fps in crate::FRAME_RATES {
            let report = step_frames(FLICKS_PER_SECOND, fps, 2).expect("valid");
            assert!(report.is_exact(), "{fps} fps");
        }
    }

    #[test]
    fn rejects_non_positive_inputs() {
        assert_eq!(step_frames(FLICKS_PER_SECOND, 0, 1), None);
        assert_eq!(step_frames(FLICKS_PER_SECOND, 24, 0), None);
        assert_eq!(step_frames(0, 24, 1), None);
        assert_eq!(step_frames(FLICKS_PER_SECOND, -24, 1), None);
    }

    #[test]
    fn rejects_frames_finer_than_a_tick() {
        assert_eq!(step_frames(10, 11, 1), None);
    }

    #[test]
    fn timeline_past_i64_is_none() {
        assert_eq!(step_frames(FLICKS_PER_SECOND, 24, 20_000_000_000), None);
        assert_eq!(step_frames(NANOS_PER_SECOND, 24, i64::MAX), None);
    }
}

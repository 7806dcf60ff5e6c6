//! Text rendering of the per-rate frame table.

use flicks::{NTSC_DENOMINATOR, NTSC_NUMERATOR, RateConstraint, StepReport};

/// One line per rate: how many ticks one frame (or sample) takes at
/// `denominator` ticks per second.
#[must_use]
pub fn frame_lines(constraints: &[RateConstraint], denominator: i64) -> Vec<String> {
    let mut exact = Vec::new();
    let mut ntsc = Vec::new();
    for &constraint in constraints {
        let Some(ticks) = constraint.ticks_per_frame(denominator) else {
            continue;
        };
        match constraint {
            RateConstraint::Exact { rate_hz, .. } => {
                exact.push(format!("1/{rate_hz} fps frame:     {ticks} flicks"));
            }
            RateConstraint::NtscApprox { base } => {
                let approx = base as f64 * NTSC_NUMERATOR as f64 / NTSC_DENOMINATOR as f64;
                ntsc.push(format!(
                    "{NTSC_DENOMINATOR}/{} (~{approx:.3}) fps frame:    {ticks} flicks",
                    base * NTSC_NUMERATOR
                ));
            }
        }
    }

    if !ntsc.is_empty() {
        exact.push(String::new());
        exact.push("NTSC rates:".to_string());
        exact.push(String::new());
        exact.extend(ntsc);
    }
    exact
}

#[must_use]
pub fn step_lines(label: &str, report: &StepReport) -> Vec<String> {
    let precision = if report.frame_is_exact() {
        "  Correct precision!"
    } else {
        "  Precision error!"
    };
    vec![
        format!(
            "{label}: {} ticks per frame at {} fps",
            report.ticks_per_frame, report.frames_per_second
        ),
        format!(
            "  iterations: {} (expected {})",
            report.iterations,
            report.expected_iterations()
        ),
        format!(
            "  whole seconds hit: {} (expected {})",
            report.whole_seconds_hit, report.seconds
        ),
        precision.to_string(),
    ]
}

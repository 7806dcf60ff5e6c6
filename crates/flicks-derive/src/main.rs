//! Flick rate derivation tool.
//!
//! Solves for the tick rate from the standard frame and sample rates, prints
//! the per-rate frame table, converts values, and shows why nanoseconds
//! drift where flicks do not.

mod table;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use flicks::{
    ConstraintSet, FLICKS_PER_SECOND, Flicks, NANOS_PER_SECOND, RateConstraint, StepReport,
    scan_ascending, solve, step_frames,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Most frames the motivation comparison will step through per timeline.
const MAX_MOTIVATION_FRAMES: i64 = 100_000_000;

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

/// Derive and inspect the flick time unit.
#[derive(Parser)]
#[command(name = "flicks-derive", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve for ticks per second and print the frame table
    Derive {
        /// Largest acceptable ticks per second
        #[arg(long, default_value_t = NANOS_PER_SECOND)]
        upper_bound: i64,
        /// Additional sample rate (Hz) the tick must divide
        #[arg(long = "extra-rate")]
        extra_rates: Vec<i64>,
        /// Additional NTSC base, meaning `base * 1000/1001` Hz
        #[arg(long = "extra-ntsc")]
        extra_ntsc: Vec<i64>,
        /// Cross-check with an exhaustive scan (slow)
        #[arg(long)]
        verify: bool,
    },
    /// Convert seconds, or a count at some rate, to flicks
    Convert {
        #[arg(long, allow_negative_numbers = true, conflicts_with_all = ["count", "rate"])]
        seconds: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "rate")]
        count: Option<i64>,
        #[arg(long, requires = "count")]
        rate: Option<i64>,
    },
    /// Step through frames in nanoseconds and in flicks
    Motivation {
        #[arg(long, default_value_t = 24)]
        fps: i64,
        #[arg(long, default_value_t = 6)]
        seconds: i64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Derive {
            upper_bound,
            extra_rates,
            extra_ntsc,
            verify,
        } => derive(upper_bound, &extra_rates, &extra_ntsc, verify),
        Commands::Convert {
            seconds,
            count,
            rate,
        } => convert(seconds, count.zip(rate)),
        Commands::Motivation { fps, seconds } => motivation(fps, seconds),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn derive(upper_bound: i64, extra_rates: &[i64], extra_ntsc: &[i64], verify: bool) -> Result<()> {
    let mut constraints = ConstraintSet::standard();
    constraints.extend(extra_rates.iter().map(|&r| RateConstraint::divisor(r)));
    constraints.extend(extra_ntsc.iter().map(|&b| RateConstraint::ntsc(b)));
    info!(
        constraints = constraints.len(),
        upper_bound, "solving for ticks per second"
    );

    let denominator = solve(constraints.as_slice(), upper_bound)
        .with_context(|| format!("deriving a tick rate under {upper_bound}"))?;

    println!("Value = {denominator}");
    for line in table::frame_lines(constraints.as_slice(), denominator) {
        println!("{line}");
    }

    if denominator != FLICKS_PER_SECOND {
        warn!(
            denominator,
            expected = FLICKS_PER_SECOND,
            "derived rate differs from the flick constant"
        );
    }

    if verify {
        info!(upper_bound, "scanning every candidate, this takes a while");
        match scan_ascending(constraints.as_slice(), upper_bound) {
            Some(found) if found == denominator => info!(found, "scan agrees"),
            Some(found) => bail!("scan found {found}, solver found {denominator}"),
            None => bail!("scan found nothing under {upper_bound}"),
        }
    }
    Ok(())
}

fn convert(seconds: Option<f64>, count_at_rate: Option<(i64, i64)>) -> Result<()> {
    let flicks = match (seconds, count_at_rate) {
        (Some(s), _) => Flicks::from_seconds(s),
        (None, Some((count, rate))) => {
            if rate <= 0 {
                bail!("rate must be positive, got {rate}");
            }
            if FLICKS_PER_SECOND % rate != 0 {
                warn!(rate, "rate does not divide a second into whole flicks");
            }
            Flicks::cast_from(count, rate)
        }
        (None, None) => bail!("pass --seconds, or --count with --rate"),
    };
    println!("{flicks}");
    println!("{} s", flicks.to_seconds());
    Ok(())
}

fn motivation(fps: i64, seconds: i64) -> Result<()> {
    let (nanos, flicks) = motivation_reports(fps, seconds)?;
    println!("First failure:");
    for line in table::step_lines("nanoseconds", &nanos) {
        println!("{line}");
    }
    println!();
    println!("Then success:");
    for line in table::step_lines("flicks", &flicks) {
        println!("{line}");
    }
    Ok(())
}

fn motivation_reports(fps: i64, seconds: i64) -> Result<(StepReport, StepReport)> {
    if fps <= 0 || seconds <= 0 {
        bail!("fps and seconds must be positive");
    }
    if fps > NANOS_PER_SECOND {
        bail!("fps must not exceed {NANOS_PER_SECOND}");
    }
    match fps.checked_mul(seconds) {
        Some(frames) if frames <= MAX_MOTIVATION_FRAMES => {}
        _ => bail!("{fps} fps for {seconds} s is more than {MAX_MOTIVATION_FRAMES} frames"),
    }
    let nanos = step_frames(NANOS_PER_SECOND, fps, seconds)
        .with_context(|| format!("{seconds} s does not fit in nanoseconds"))?;
    let flicks = step_frames(FLICKS_PER_SECOND, fps, seconds)
        .with_context(|| format!("{seconds} s does not fit in flicks"))?;
    Ok((nanos, flicks))
}

//! Log setup for the pipeline binaries.
//!
//! Both backends share one default filter: dependencies only report
//! warnings, the `streetpano*` crates log at the requested level, and
//! `RUST_LOG` overrides either. Plain log lines are tagged with the stage
//! that emitted them:
//!
//! ```text
//! [  0.412s  INFO tiles] stitched 8x4 tiles into 4096x2048
//! [  1.930s DEBUG walk] [3/10] pano=CAoSLEFG... links=2
//! ```

use std::io::Write;
use std::time::Instant;

use log::LevelFilter;

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

/// `-v` count to level: info by default, then debug, then trace.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Filter directives used when `RUST_LOG` is not set.
pub fn default_directives(level: LevelFilter) -> String {
    format!("warn,streetpano={}", level.as_str().to_ascii_lowercase())
}

/// Short stage name for a log target, e.g. `streetpano_tiles::stitch` -> `tiles`.
///
/// Targets outside the workspace keep their crate name.
pub fn stage_for_target(target: &str) -> &str {
    let krate = target.split("::").next().unwrap_or(target);
    match krate {
        "streetpano_core" => "core",
        "streetpano_tiles" => "tiles",
        "streetpano_projection" => "project",
        "streetpano_walk" => "walk",
        "streetpano" => "pipeline",
        other => other,
    }
}

/// Install an `env_logger` backend writing stage-tagged lines to stderr.
///
/// Fails if another logger is already installed.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let started = Instant::now();
    env_logger::Builder::new()
        .parse_filters(&default_directives(level))
        .parse_default_env()
        .format(move |buf, record| {
            writeln!(
                buf,
                "[{:7.3}s {:>5} {}] {}",
                started.elapsed().as_secs_f64(),
                record.level(),
                stage_for_target(record.target()),
                record.args()
            )
        })
        .try_init()
}

/// Install a `tracing` subscriber with the same default filter; `json`
/// switches to one JSON object per event with span timings flattened in.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, level: LevelFilter) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    }
}

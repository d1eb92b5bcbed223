//! Colorful console output for MCLP solves.
//!
//! Provides a custom `tracing` layer that formats pipeline events with colors,
//! and a colored rendering of [`mclp_core::Report`].
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (model built, solve start/end)
//! - **WARN**: Timeouts and objective mismatches
//! - **DEBUG**: Adapter configuration and backend calls

mod report;

pub use report::{print_report, render_report};

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "mclp=info,mclp_solver=info";

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(MclpConsoleLayer)
            .try_init();
    });
}

/// Initializes uncolored logging to stderr, without banner or console layer.
///
/// Safe to call multiple times; only the first call of either `init`
/// function has effect.
pub fn init_plain() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(io::stderr)
            .try_init();
    });
}

fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 __  __  ____ _     ____
|  \/  |/ ___| |   |  _ \
| |\/| | |   | |   | |_) |
| |  | | |___| |___|  __/
|_|  |_|\____|_____|_|
"#;

    let version_line = format!("   v{} - Maximal Covering Location\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats pipeline events with colors.
pub struct MclpConsoleLayer;

impl<S: Subscriber> Layer<S> for MclpConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("mclp") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    backend: Option<String>,
    status: Option<String>,
    error: Option<String>,
    site_count: Option<u64>,
    variable_count: Option<u64>,
    constraint_count: Option<u64>,
    max_facilities: Option<u64>,
    threshold: Option<u64>,
    time_limit_ms: Option<u64>,
    limit_ms: Option<u64>,
    duration_ms: Option<u64>,
    open_count: Option<u64>,
    covered_count: Option<u64>,
    objective: Option<f64>,
    reported: Option<f64>,
    recomputed: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "backend" => self.backend = Some(s),
            "status" => self.status = Some(s),
            "error" => self.error = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "site_count" => self.site_count = Some(value),
            "variable_count" => self.variable_count = Some(value),
            "constraint_count" => self.constraint_count = Some(value),
            "max_facilities" => self.max_facilities = Some(value),
            "threshold" => self.threshold = Some(value),
            "time_limit_ms" => self.time_limit_ms = Some(value),
            "limit_ms" => self.limit_ms = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "open_count" => self.open_count = Some(value),
            "covered_count" => self.covered_count = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "objective" => self.objective = Some(value),
            "reported" => self.reported = Some(value),
            "recomputed" => self.recomputed = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "backend" => self.backend = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    if level > Level::INFO {
        return String::new();
    }

    let event = v.event.as_deref().unwrap_or("");

    match event {
        "model_built" => format_model_built(v),
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "solve_timeout" => format_solve_timeout(v),
        "solve_failed" => format_solve_failed(v),
        "objective_mismatch" => format_objective_mismatch(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(value: Option<u64>) -> String {
    value
        .unwrap_or(0)
        .to_formatted_string(&Locale::en)
        .bright_yellow()
        .to_string()
}

fn format_model_built(v: &EventVisitor) -> String {
    format!(
        "{} {} Model built │ {} sites │ {} variables │ {} constraints │ p = {} │ b = {}",
        format_elapsed(),
        "◆".bright_blue(),
        count(v.site_count),
        count(v.variable_count),
        count(v.constraint_count),
        count(v.max_facilities),
        count(v.threshold),
    )
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let backend = v.backend.as_deref().unwrap_or("unknown");
    let time_limit = v.time_limit_ms.unwrap_or(0);

    let mut output = format!(
        "{} {} Solving │ backend {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        backend.white().bold(),
    );

    if time_limit > 0 {
        output.push_str(&format!(
            " │ {} limit",
            format_duration_ms(time_limit).bright_yellow()
        ));
    }

    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let duration = format_duration_ms(v.duration_ms.unwrap_or(0));

    if v.status.as_deref() != Some("optimal") {
        return format!(
            "{} {} Solving complete │ {} │ {}",
            format_elapsed(),
            "■".bright_cyan().bold(),
            duration.yellow(),
            "INFEASIBLE".bright_red().bold(),
        );
    }

    format!(
        "{} {} Solving complete │ {} │ {} │ objective {} │ {} open │ {} covered",
        format_elapsed(),
        "■".bright_cyan().bold(),
        duration.yellow(),
        "OPTIMAL".bright_green().bold(),
        format_objective(v.objective.unwrap_or(0.0)).bright_magenta().bold(),
        count(v.open_count),
        count(v.covered_count),
    )
}

fn format_solve_timeout(v: &EventVisitor) -> String {
    format!(
        "{} {} Time limit of {} reached",
        format_elapsed(),
        "⏱".bright_red(),
        format_duration_ms(v.limit_ms.unwrap_or(0)).bright_yellow(),
    )
}

fn format_solve_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} Solver failed │ {}",
        format_elapsed(),
        "✗".bright_red().bold(),
        v.error.as_deref().unwrap_or("unknown error").bright_red(),
    )
}

fn format_objective_mismatch(v: &EventVisitor) -> String {
    format!(
        "{} {} Backend objective {} differs from recomputed {}",
        format_elapsed(),
        "!".yellow().bold(),
        format_objective(v.reported.unwrap_or(0.0)),
        format_objective(v.recomputed.unwrap_or(0.0)),
    )
}

fn format_objective(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        (value as i64).to_formatted_string(&Locale::en)
    } else {
        format!("{:.3}", value)
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

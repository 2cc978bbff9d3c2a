//! Search profile collected from tracing spans.
//!
//! Enable with `--features instrumentation`. The engine entry point, both
//! search functions, chess move generation and chess evaluation open a span
//! each; the profile reports how often each ran and how long it took. Times are
//! inclusive, so a recursive `alpha_beta_minimax` span also counts its children.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Mutex;
use std::time::Instant;

use once_cell::sync::Lazy;
use tracing::span;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

/// Spans in the order a search runs through them. Anything else is listed
/// after these, slowest first.
const SEARCH_STAGES: [&str; 5] = [
    "get_best_move",
    "alpha_beta_search",
    "alpha_beta_minimax",
    "generate_moves",
    "evaluate",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpanTiming {
    pub calls: u64,
    pub total_nanos: u64,
    pub slowest_nanos: u64,
}

impl SpanTiming {
    fn record(&mut self, nanos: u64) {
        self.calls += 1;
        self.total_nanos += nanos;
        self.slowest_nanos = self.slowest_nanos.max(nanos);
    }

    fn average_micros(&self) -> f64 {
        self.total_nanos as f64 / self.calls.max(1) as f64 / 1_000.0
    }
}

static PROFILE: Lazy<Mutex<HashMap<&'static str, SpanTiming>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

struct ProfileLayer;

impl<S> Layer<S> for ProfileLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_enter(&self, id: &span::Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(Instant::now());
        }
    }

    fn on_exit(&self, id: &span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let Some(start) = span.extensions_mut().remove::<Instant>() else {
            return;
        };
        record_span(span.name(), start.elapsed().as_nanos() as u64);
    }
}

fn record_span(name: &'static str, nanos: u64) {
    if let Ok(mut profile) = PROFILE.lock() {
        profile.entry(name).or_default().record(nanos);
    }
}

/// Installs the profile layer. Span events are also printed when `RUST_LOG`
/// is set to anything other than `off`.
pub fn init_tracing() {
    let verbose = std::env::var("RUST_LOG").map_or(false, |filter| !filter.is_empty() && filter != "off");

    let result = if verbose {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .compact();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(ProfileLayer)
            .with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("trace"))
            .with(ProfileLayer);
        tracing::subscriber::set_global_default(subscriber)
    };

    if let Err(err) = result {
        eprintln!("failed to install tracing subscriber: {}", err);
    }
}

/// Search stages first, in pipeline order, then every other span by total time.
fn ordered(profile: &HashMap<&'static str, SpanTiming>) -> Vec<(&'static str, SpanTiming)> {
    let mut rows: Vec<_> = SEARCH_STAGES
        .iter()
        .filter_map(|stage| profile.get(stage).map(|timing| (*stage, *timing)))
        .collect();
    let mut others: Vec<_> = profile
        .iter()
        .filter(|(name, _)| !SEARCH_STAGES.contains(name))
        .map(|(name, timing)| (*name, *timing))
        .collect();
    others.sort_by_key(|(_, timing)| std::cmp::Reverse(timing.total_nanos));
    rows.extend(others);
    rows
}

/// Renders the profile as a table. The share column is relative to the time
/// spent in `get_best_move`, or to the slowest span when no engine search ran.
fn render(profile: &HashMap<&'static str, SpanTiming>) -> String {
    let rows = ordered(profile);
    let reference = profile
        .get("get_best_move")
        .map(|timing| timing.total_nanos)
        .or_else(|| rows.iter().map(|(_, timing)| timing.total_nanos).max())
        .unwrap_or(0)
        .max(1);

    let mut out = String::new();
    let _ = writeln!(out, "{:=<84}", "");
    let _ = writeln!(
        out,
        "{:<22} {:>10} {:>12} {:>12} {:>14} {:>8}",
        "Search stage", "Calls", "Total (ms)", "Avg (µs)", "Slowest (µs)", "Share"
    );
    let _ = writeln!(out, "{:-<84}", "");
    for (name, timing) in rows {
        let _ = writeln!(
            out,
            "{:<22} {:>10} {:>12.2} {:>12.2} {:>14.2} {:>7.1}%",
            name,
            timing.calls,
            timing.total_nanos as f64 / 1_000_000.0,
            timing.average_micros(),
            timing.slowest_nanos as f64 / 1_000.0,
            timing.total_nanos as f64 * 100.0 / reference as f64
        );
    }
    out
}

/// Prints the search profile collected so far.
pub fn print_timing_statistics() {
    let Ok(profile) = PROFILE.lock() else {
        return;
    };
    if profile.is_empty() {
        eprintln!("\nNo search profile collected.");
        return;
    }
    eprintln!("\n{}", render(&profile));
}

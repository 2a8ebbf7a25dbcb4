//! Profiling collaborator and scoped spans.
//!
//! Stepping opens one span per behavior per phase.  Spans are closed by a
//! `Drop` guard, so a hook returning `Err` early or panicking still leaves the
//! profiler balanced.

use std::time::Instant;

use log::warn;
use rustc_hash::FxHashMap;

/// Receives begin/end pairs for named sections.
pub trait Profiler {
    fn begin(&mut self, name: &str);
    fn end(&mut self, name: &str);
}

// ── ProfileSpan ───────────────────────────────────────────────────────────────

/// Scope guard: `begin` on [`open`](Self::open), `end` on drop.
///
/// With no profiler the span does nothing, which is how stepping runs
/// unmeasured.
pub struct ProfileSpan<'p, 'n> {
    profiler: Option<&'p mut dyn Profiler>,
    name:     &'n str,
}

impl<'p, 'n> ProfileSpan<'p, 'n> {
    pub fn open(mut profiler: Option<&'p mut dyn Profiler>, name: &'n str) -> Self {
        if let Some(p) = profiler.as_deref_mut() {
            p.begin(name);
        }
        Self { profiler, name }
    }
}

impl Drop for ProfileSpan<'_, '_> {
    fn drop(&mut self) {
        if let Some(p) = self.profiler.as_deref_mut() {
            p.end(self.name);
        }
    }
}

// ── FrameProfiler ─────────────────────────────────────────────────────────────

/// Timing aggregate for one section name.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionSummary {
    pub name:       String,
    pub last_ms:    f32,
    pub average_ms: f32,
    pub max_ms:     f32,
    pub samples:    u64,
}

#[derive(Default)]
struct SectionTiming {
    last_ms:  f32,
    total_ms: f32,
    max_ms:   f32,
    samples:  u64,
}

/// Wall-clock profiler aggregating per-section timings across frames.
///
/// Sections may nest; `end` must match the most recently opened section.
/// A mismatched `end` is not recorded and is counted in
/// [`unbalanced_ends`](Self::unbalanced_ends).
#[derive(Default)]
pub struct FrameProfiler {
    open:       Vec<(String, Instant)>,
    timings:    FxHashMap<String, SectionTiming>,
    unbalanced: u64,
}

impl FrameProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sections begun but not yet ended.
    pub fn open_spans(&self) -> usize {
        self.open.len()
    }

    pub fn unbalanced_ends(&self) -> u64 {
        self.unbalanced
    }

    pub fn section(&self, name: &str) -> Option<SectionSummary> {
        self.timings.get(name).map(|t| summarize(name, t))
    }

    /// All sections, slowest last-frame first.
    pub fn summaries(&self) -> Vec<SectionSummary> {
        let mut out: Vec<SectionSummary> =
            self.timings.iter().map(|(name, t)| summarize(name, t)).collect();
        out.sort_by(|a, b| {
            b.last_ms
                .partial_cmp(&a.last_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        out
    }

    /// Drop all aggregates.  Open sections stay open.
    pub fn reset(&mut self) {
        self.timings.clear();
        self.unbalanced = 0;
    }
}

fn summarize(name: &str, t: &SectionTiming) -> SectionSummary {
    let average_ms = if t.samples == 0 { 0.0 } else { t.total_ms / t.samples as f32 };
    SectionSummary {
        name: name.to_owned(),
        last_ms: t.last_ms,
        average_ms,
        max_ms: t.max_ms,
        samples: t.samples,
    }
}

impl Profiler for FrameProfiler {
    fn begin(&mut self, name: &str) {
        self.open.push((name.to_owned(), Instant::now()));
    }

    fn end(&mut self, name: &str) {
        match self.open.last() {
            Some((top, _)) if top == name => {}
            _ => {
                warn!("profiler: end(`{name}`) does not match the innermost open section");
                self.unbalanced += 1;
                return;
            }
        }
        let Some((name, start)) = self.open.pop() else { return };
        let ms = start.elapsed().as_secs_f32() * 1000.0;
        let entry = self.timings.entry(name).or_default();
        entry.last_ms = ms;
        entry.max_ms = entry.max_ms.max(ms);
        entry.total_ms += ms;
        entry.samples += 1;
    }
}

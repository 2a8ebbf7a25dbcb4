//! Frame time model.
//!
//! # Design
//!
//! The scene advances in fixed frames.  `Frame` is the canonical time unit;
//! the mapping to seconds is held in `FrameClock`:
//!
//!   elapsed_secs = frame * frame_duration_ms / 1000
//!
//! A fixed step keeps runs reproducible: given the same seed and the same
//! scene data, every frame produces identical entity state.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Frame ────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame(pub u64);

impl Frame {
    pub const ZERO: Frame = Frame(0);

    /// Return the frame `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Frame {
        Frame(self.0 + n)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Tracks the current frame and converts frame counts to seconds.
#[derive(Clone, Debug)]
pub struct FrameClock {
    /// Milliseconds one frame represents.  Default: 16.
    pub frame_duration_ms: u32,
    /// Advanced by `FrameClock::advance()` once per frame.
    pub current_frame: Frame,
}

impl FrameClock {
    pub fn new(frame_duration_ms: u32) -> Self {
        Self { frame_duration_ms, current_frame: Frame::ZERO }
    }

    /// Advance the clock by one frame.
    #[inline]
    pub fn advance(&mut self) {
        self.current_frame = self.current_frame.offset(1);
    }

    /// Seconds covered by one frame, as passed to behavior hooks.
    #[inline]
    pub fn delta_secs(&self) -> f32 {
        self.frame_duration_ms as f32 / 1000.0
    }

    /// Elapsed game time in seconds since frame 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_frame.0 as f64 * self.frame_duration_ms as f64 / 1000.0
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3}s)", self.current_frame, self.elapsed_secs())
    }
}

// ── SceneConfig ───────────────────────────────────────────────────────────────

/// Per-scene runtime configuration.
///
/// Usually embedded in the scene JSON and loaded by `rt-scene`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneConfig {
    /// Milliseconds per frame.  Must be non-zero.
    pub frame_duration_ms: u32,

    /// Frames simulated by `Scene::run`.  `run_frames` ignores it.
    pub total_frames: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Measure every behavior step with the scene's `FrameProfiler`.
    pub profiling: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            frame_duration_ms: 16,
            total_frames:      0,
            seed:              0,
            profiling:         false,
        }
    }
}

impl SceneConfig {
    /// The frame at which `run` stops (exclusive upper bound).
    #[inline]
    pub fn end_frame(&self) -> Frame {
        Frame(self.total_frames)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.frame_duration_ms == 0 {
            return Err(CoreError::Config("frame_duration_ms must be non-zero".into()));
        }
        Ok(())
    }

    /// Construct a `FrameClock` pre-configured for this scene.
    pub fn make_clock(&self) -> FrameClock {
        FrameClock::new(self.frame_duration_ms)
    }
}

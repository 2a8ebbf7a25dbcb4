//! Scene callbacks and the event-sheet seam.

use rt_behavior::BehaviorError;
use rt_core::{BehaviorHandle, Frame};

use crate::{Runtime, Scene};

/// Callbacks invoked by [`Scene::step_frame`] at key points in the frame.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: error collector
///
/// ```rust,ignore
/// struct Errors(Vec<String>);
///
/// impl SceneObserver for Errors {
///     fn on_behavior_error(&mut self, _frame: Frame, handle: BehaviorHandle, error: &BehaviorError) {
///         self.0.push(format!("{handle}: {error}"));
///     }
/// }
/// ```
pub trait SceneObserver {
    /// Called at the very start of each frame, before pre-events.
    fn on_frame_start(&mut self, _frame: Frame) {}

    /// Called when a behavior hook returns an error.  The frame continues.
    fn on_behavior_error(&mut self, _frame: Frame, _handle: BehaviorHandle, _error: &BehaviorError) {}

    /// Called after post-events, before the clock advances.
    ///
    /// `stepped` is the number of behavior steps run this frame (both phases).
    fn on_frame_end(&mut self, _frame: Frame, _stepped: usize) {}

    /// Called once after the final frame of [`Scene::run`].
    fn on_scene_end(&mut self, _final_frame: Frame) {}
}

/// A [`SceneObserver`] that does nothing.
pub struct NoopObserver;

impl SceneObserver for NoopObserver {}

/// The game logic that runs between the two behavior phases.
///
/// Closures `FnMut(&mut Scene, &mut Runtime, Frame)` implement it directly.
pub trait EventSheet {
    fn run_events(&mut self, scene: &mut Scene, rt: &mut Runtime, frame: Frame);
}

impl<F> EventSheet for F
where
    F: FnMut(&mut Scene, &mut Runtime, Frame),
{
    fn run_events(&mut self, scene: &mut Scene, rt: &mut Runtime, frame: Frame) {
        self(scene, rt, frame)
    }
}

/// An empty event sheet.
pub struct NoEvents;

impl EventSheet for NoEvents {
    fn run_events(&mut self, _scene: &mut Scene, _rt: &mut Runtime, _frame: Frame) {}
}

//! Scene state passed to every behavior hook.

use rt_core::{EntityRng, Frame, Resources};

/// What a behavior hook may see of the scene besides its owner.
///
/// Built by the scene once per entity per phase.  The owner's
/// [`EntityState`][rt_core::EntityState] is passed next to it as a separate
/// `&mut`, so a hook can mutate its owner and scene resources at the same time.
pub struct SceneContext<'a> {
    /// Current frame.
    pub frame: Frame,

    /// Seconds covered by this frame.
    pub delta_secs: f32,

    /// Scene-wide services, e.g. the spatial `BoundsIndex`.
    pub resources: &'a mut Resources,

    /// The owner entity's deterministic RNG.
    pub rng: &'a mut EntityRng,
}

impl<'a> SceneContext<'a> {
    #[inline]
    pub fn new(
        frame:      Frame,
        delta_secs: f32,
        resources:  &'a mut Resources,
        rng:        &'a mut EntityRng,
    ) -> Self {
        Self { frame, delta_secs, resources, rng }
    }
}

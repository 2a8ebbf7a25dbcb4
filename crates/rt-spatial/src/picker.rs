//! Behavior kind that targets the nearest other indexed entity.

use rt_behavior::{Behavior, BehaviorData, BehaviorResult, SceneContext};
use rt_core::{EntityId, EntityState};

use crate::BoundsIndex;

/// After events, looks up the closest indexed entity (other than its owner)
/// to the owner's center, within `radius` (default: unlimited).
///
/// Reads whatever the index holds at that point of the phase, so entities
/// whose tracker has not run yet this frame are seen at their previous
/// bounds.  Requires a `BoundsIndex` resource; stepping without one is an
/// error.
#[derive(Clone, Debug, PartialEq)]
pub struct NearestPicker {
    pub radius: f32,
    target:     Option<EntityId>,
}

impl NearestPicker {
    pub const TYPE_NAME: &'static str = "NearestPicker";

    pub fn from_data(data: &BehaviorData) -> Self {
        Self {
            radius: data.f32_or("radius", f32::INFINITY),
            target: None,
        }
    }

    /// The entity picked by the last post-events step.
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }
}

impl Behavior for NearestPicker {
    fn do_step_post_events(
        &mut self,
        owner: &mut EntityState,
        ctx:   &mut SceneContext<'_>,
    ) -> BehaviorResult<()> {
        let index = BoundsIndex::from_resources(ctx.resources)?;
        self.target = index
            .nearest(owner.center(), owner.id, self.radius)
            .map(|c| c.entity());
        Ok(())
    }

    fn on_deactivate(&mut self, _owner: &mut EntityState, _ctx: &mut SceneContext<'_>) {
        self.target = None;
    }

    fn update_from_behavior_data(&mut self, _old: &BehaviorData, new: &BehaviorData) -> bool {
        self.radius = new.f32_or("radius", f32::INFINITY);
        true
    }
}

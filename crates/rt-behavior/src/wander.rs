//! Random heading changes.

use rt_core::EntityState;

use crate::{Behavior, BehaviorData, BehaviorResult, SceneContext};

/// Every `interval` seconds, turns the owner by a random amount in
/// `[-max_turn, max_turn]` degrees using the entity RNG.
///
/// `max_turn` is clamped to 180.  At most [`MAX_TURNS_PER_STEP`] turns are
/// taken in one step; intervals beyond that are dropped.
///
/// Pair with a [`Mover`][crate::Mover] on the `angle` axis for a random walk.
/// Not live-patchable: hot-reload recreates it, which also resets the timer.
/// Cap on the turns a single step may take, however small `interval` is.
pub const MAX_TURNS_PER_STEP: u32 = 16;

#[derive(Clone, Debug, PartialEq)]
pub struct Wander {
    pub interval: f32,
    pub max_turn: f32,
    elapsed:      f32,
}

impl Wander {
    pub const TYPE_NAME: &'static str = "Wander";

    pub fn from_data(data: &BehaviorData) -> Self {
        Self {
            interval: data.f32_or("interval", 1.0),
            max_turn: data.f32_or("max_turn", 45.0).abs().min(180.0),
            elapsed:  0.0,
        }
    }
}

impl Behavior for Wander {
    fn do_step_pre_events(
        &mut self,
        owner: &mut EntityState,
        ctx:   &mut SceneContext<'_>,
    ) -> BehaviorResult<()> {
        // A non-positive or NaN interval never fires.
        if self.interval.is_nan() || self.interval <= 0.0 {
            return Ok(());
        }
        self.elapsed += ctx.delta_secs;
        let fires = (self.elapsed / self.interval).floor();
        if fires < 1.0 {
            return Ok(());
        }
        self.elapsed = (self.elapsed - fires * self.interval).clamp(0.0, self.interval);

        if self.max_turn > 0.0 {
            let turns = fires.min(MAX_TURNS_PER_STEP as f32) as u32;
            for _ in 0..turns {
                owner.angle += ctx.rng.gen_range(-self.max_turn..=self.max_turn);
            }
            owner.angle = owner.angle.rem_euclid(360.0);
        }
        Ok(())
    }
}

//! Constant-speed movement.

use rt_core::EntityState;

use crate::{Behavior, BehaviorData, BehaviorResult, SceneContext};

/// Direction a [`Mover`] pushes its owner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum MoveAxis {
    X,
    Y,
    /// Along the owner's `angle` (degrees, 0 = +x).
    #[default]
    Angle,
}

impl MoveAxis {
    fn parse(s: Option<&str>) -> Self {
        match s {
            Some("x") => MoveAxis::X,
            Some("y") => MoveAxis::Y,
            _ => MoveAxis::Angle,
        }
    }
}

/// Moves the owner at `speed` pixels per second during pre-events.
///
/// Fields: `speed` (default 0), `axis` (`"x"`, `"y"` or `"angle"`, default
/// `"angle"`).  Both can be patched live by hot-reload.
#[derive(Clone, Debug, PartialEq)]
pub struct Mover {
    pub speed: f32,
    pub axis:  MoveAxis,
}

impl Mover {
    pub const TYPE_NAME: &'static str = "Mover";

    pub fn from_data(data: &BehaviorData) -> Self {
        Self {
            speed: data.f32_or("speed", 0.0),
            axis:  MoveAxis::parse(data.str("axis")),
        }
    }
}

impl Behavior for Mover {
    fn do_step_pre_events(
        &mut self,
        owner: &mut EntityState,
        ctx:   &mut SceneContext<'_>,
    ) -> BehaviorResult<()> {
        let d = self.speed * ctx.delta_secs;
        match self.axis {
            MoveAxis::X => owner.translate(d, 0.0),
            MoveAxis::Y => owner.translate(0.0, d),
            MoveAxis::Angle => {
                let (sin, cos) = owner.angle.to_radians().sin_cos();
                owner.translate(d * cos, d * sin);
            }
        }
        Ok(())
    }

    fn update_from_behavior_data(&mut self, _old: &BehaviorData, new: &BehaviorData) -> bool {
        *self = Mover::from_data(new);
        true
    }
}

//! The default behavior kind: attached, steppable, inert.

use crate::Behavior;

/// A [`Behavior`] that keeps every default hook.
///
/// Registered under the empty type name.  The registry also falls back to it
/// for unknown type names, so a broken or missing extension degrades to
/// inert entities instead of stopping the frame loop.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultBehavior;

impl Behavior for DefaultBehavior {}

//! The identity behind the current request.

/// Resolves the user performing the current operation.
pub trait CurrentActor: Send + Sync {
    fn actor_id(&self) -> i64;
}

/// A bare user id acting as the current actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorId(pub i64);

impl CurrentActor for ActorId {
    fn actor_id(&self) -> i64 {
        self.0
    }
}

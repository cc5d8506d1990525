//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod actor;
mod auth;
mod notifier;
mod repository;

pub use actor::{ActorId, CurrentActor};
pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use notifier::{Notifier, NotifyError};
pub use repository::{
    BaseRepository, CommentMutation, CommentRepository, PostMutation, PostRepository,
    TagRepository, UserRepository,
};

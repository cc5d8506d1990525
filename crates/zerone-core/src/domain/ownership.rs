//! Ownership checks for mutable resources.

use crate::error::DomainError;

/// A resource that belongs to exactly one user.
pub trait Owned {
    fn owner_id(&self) -> i64;
}

/// Fails with [`DomainError::Forbidden`] unless the actor owns the resource.
pub fn ensure_owner(owner_id: i64, actor_id: i64) -> Result<(), DomainError> {
    if owner_id != actor_id {
        return Err(DomainError::Forbidden(format!(
            "user {actor_id} is not the owner of this resource"
        )));
    }
    Ok(())
}

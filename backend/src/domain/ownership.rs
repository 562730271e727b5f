//! Resource ownership guard for owner-restricted mutations.
//!
//! The guard runs after authentication and before any write reaches the
//! store. Ownerless resources (seeded rows) are never mutable through an
//! owner-restricted operation.

use super::{Error, Identity, Pattern, UserId};

/// Denial reasons reported by [`authorize_mutation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipDenied {
    /// No resource with the requested id exists.
    NotFound,
    /// The resource is owned by someone else or by nobody.
    Forbidden,
}

impl From<OwnershipDenied> for Error {
    fn from(value: OwnershipDenied) -> Self {
        match value {
            OwnershipDenied::NotFound => Error::not_found("pattern not found"),
            OwnershipDenied::Forbidden => {
                Error::forbidden("only the owner may modify this pattern")
            }
        }
    }
}

/// Something an identity may own.
pub trait Owned {
    /// Recorded owner, if any.
    fn owner(&self) -> Option<&UserId>;
}

impl Owned for Pattern {
    fn owner(&self) -> Option<&UserId> {
        self.owner_id.as_ref()
    }
}

/// Decide whether `caller` may mutate `resource`.
///
/// `resource` is `None` when the caller's lookup found nothing.
///
/// # Examples
/// ```
/// use backend::domain::{authorize_mutation, OwnershipDenied, Pattern};
/// # use backend::domain::{AccessToken, Identity, PasswordDigest, UserId, UserName};
/// # let caller = Identity::new(
/// #     UserId::random(),
/// #     UserName::new("alice").unwrap(),
/// #     PasswordDigest::new("digest").unwrap(),
/// #     AccessToken::from_bytes(&[0; 128]),
/// # );
///
/// let missing: Option<&Pattern> = None;
/// assert_eq!(authorize_mutation(&caller, missing), Err(OwnershipDenied::NotFound));
/// ```
pub fn authorize_mutation<R: Owned>(
    caller: &Identity,
    resource: Option<&R>,
) -> Result<(), OwnershipDenied> {
    let resource = resource.ok_or(OwnershipDenied::NotFound)?;
    match resource.owner() {
        Some(owner) if owner == caller.id() => Ok(()),
        _ => Err(OwnershipDenied::Forbidden),
    }
}

use super::*;
use std::sync::Arc;

/// Principal a request acts as: a member resolved from a bearer token,
/// or the [`Lurker`] sentinel.
///
/// Cloning shares the underlying record. There is intentionally no
/// `PartialEq`: compare ids for ownership, and ask the [`Lurker`] whether
/// an identity is anonymous.
#[derive(Debug, Clone)]
pub struct Identity(Arc<Member>);

impl Identity {
    pub fn member(&self) -> &Member {
        &self.0
    }
    pub(crate) fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for Identity {
    type Target = Member;
    fn deref(&self) -> &Member {
        &self.0
    }
}

impl From<Member> for Identity {
    fn from(member: Member) -> Self {
        Self(Arc::new(member))
    }
}
